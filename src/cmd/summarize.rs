use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

use crate::context::AppContext;
use crate::domain::message::ChatMessage;
use crate::domain::summary::SummaryOutcome;
use crate::error::AppResult;
use crate::workflow::summary::summarize_conversation;

#[derive(Debug, Clone)]
pub struct SummarizeCommandArgs {
    pub input: PathBuf,
}

pub async fn run(ctx: &AppContext, args: SummarizeCommandArgs) -> AppResult<SummaryOutcome> {
    let contents = read_input(&args.input).await?;
    let messages = ChatMessage::parse_list(&contents)?;
    summarize_conversation(ctx, &messages).await
}

async fn read_input(path: &Path) -> AppResult<String> {
    if path == Path::new("-") {
        let mut contents = String::new();
        tokio::io::stdin().read_to_string(&mut contents).await?;
        Ok(contents)
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
