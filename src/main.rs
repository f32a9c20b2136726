use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use chatsum::cmd::config::{self as config_cmd, ConfigArgs};
use chatsum::cmd::summarize::{self, SummarizeCommandArgs};
use chatsum::config::{AppConfig, LlmProvider};
use chatsum::context::AppContext;
use chatsum::error::AppResult;
use chatsum::infra::llm::OpenAiClient;
use chatsum::infra::summary::LlmChatSummaryService;
use chatsum::services::ChatCompletionClient;

#[derive(Parser)]
#[command(
    name = "chatsum",
    author,
    version,
    about = "Summarize chat conversations with an LLM"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a JSON array of chat messages.
    Summarize(SummarizeArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct SummarizeArgs {
    /// Path to the message file, or '-' for stdin.
    input: PathBuf,
}

#[tokio::main]
async fn main() {
    chatsum::setup_logging();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Summarize(args) => run_summarize(args).await,
    }
}

async fn run_summarize(args: SummarizeArgs) -> AppResult<()> {
    let config = AppConfig::load()?;

    if config.openai_api_key.is_none() {
        warn!("OpenAI API key not configured; chat completion calls will fail.");
    }

    if let LlmProvider::Custom(provider) = &config.llm_provider {
        warn!(%provider, "custom LLM provider not yet implemented, using OpenAI fallback");
    }

    let client: Arc<dyn ChatCompletionClient> = Arc::new(OpenAiClient::from_config(&config));
    let summary = Arc::new(LlmChatSummaryService::new(client));
    let context = AppContext::new(summary);

    let outcome = summarize::run(&context, SummarizeCommandArgs { input: args.input }).await?;

    println!("{}", outcome.summary);

    Ok(())
}
