pub mod chat_completion;
pub mod chat_summary;

pub use chat_completion::ChatCompletionClient;
pub use chat_summary::ChatSummaryService;
