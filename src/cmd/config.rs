use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{StoredConfig, config_file_path};
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring chatsum.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt("LLM provider (openai/custom)", &mut cfg.llm_provider, false)?;
    apply_prompt("OpenAI API key", &mut cfg.openai_api_key, true)?;
    apply_prompt(
        "OpenAI-compatible base URL (e.g., https://api.openai.com/v1)",
        &mut cfg.openai_base_url,
        false,
    )?;
    apply_prompt("Model", &mut cfg.openai_model, false)?;

    let mut max_tokens = cfg.max_tokens.map(|value| value.to_string());
    apply_prompt("Max completion tokens", &mut max_tokens, false)?;
    cfg.max_tokens = parse_max_tokens(max_tokens.as_deref())?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("LLM provider: {}", display_value(&cfg.llm_provider));
    println!("OpenAI API key: {}", mask_secret(&cfg.openai_api_key));
    println!("Base URL: {}", display_value(&cfg.openai_base_url));
    println!("Model: {}", display_value(&cfg.openai_model));
    println!(
        "Max completion tokens: {}",
        display_value(&cfg.max_tokens.map(|value| value.to_string()))
    );

    Ok(())
}

fn parse_max_tokens(value: Option<&str>) -> AppResult<Option<u32>> {
    value
        .map(|raw| {
            raw.parse::<u32>().map_err(|err| {
                AppError::Configuration(format!("invalid max completion tokens '{raw}': {err}"))
            })
        })
        .transpose()
}

fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    match prompt(field, target.as_deref(), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::from_input(&input))
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_secrets() {
        assert_eq!(mask_secret(&Some("sk-abcdef123".to_string())), "sk-***123");
        assert_eq!(mask_secret(&Some("short".to_string())), "***");
        assert_eq!(mask_secret(&Some(String::new())), "<not set>");
        assert_eq!(mask_secret(&None), "<not set>");
    }

    #[test]
    fn displays_unset_values() {
        assert_eq!(display_value(&Some("gpt-4o".to_string())), "gpt-4o");
        assert_eq!(display_value(&Some(String::new())), "<not set>");
        assert_eq!(display_value(&None), "<not set>");
    }

    #[test]
    fn interprets_prompt_input() {
        assert_eq!(PromptAction::from_input("\n"), PromptAction::Keep);
        assert_eq!(PromptAction::from_input(" - \n"), PromptAction::Clear);
        assert_eq!(
            PromptAction::from_input("gpt-4o\n"),
            PromptAction::Set("gpt-4o".to_string())
        );
    }

    #[test]
    fn parses_max_tokens_input() {
        assert_eq!(parse_max_tokens(None).unwrap(), None);
        assert_eq!(parse_max_tokens(Some("256")).unwrap(), Some(256));
        assert!(matches!(
            parse_max_tokens(Some("many")),
            Err(AppError::Configuration(_))
        ));
    }
}
