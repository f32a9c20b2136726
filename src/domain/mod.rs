pub mod completion;
pub mod message;
pub mod summary;
