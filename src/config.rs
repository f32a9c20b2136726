use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const CONFIG_DIR_NAME: &str = "chatsum";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm_provider: LlmProvider,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Custom(String),
}

impl LlmProvider {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "openai" => LlmProvider::OpenAi,
            other => LlmProvider::Custom(other.to_string()),
        }
    }
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(stored, |key| env::var(key).ok())
    }

    /// Environment values win over the stored file; defaults fill the rest.
    pub fn resolve<F>(stored: StoredConfig, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let llm_provider = lookup("CHATSUM_LLM_PROVIDER")
            .or(stored.llm_provider)
            .map(|provider| LlmProvider::parse(&provider))
            .unwrap_or(LlmProvider::OpenAi);

        let openai_api_key = lookup("CHATSUM_OPENAI_API_KEY")
            .or_else(|| lookup("OPENAI_API_KEY"))
            .or(stored.openai_api_key);

        let openai_base_url = lookup("CHATSUM_OPENAI_BASE_URL")
            .or(stored.openai_base_url)
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

        let openai_model = lookup("CHATSUM_OPENAI_MODEL")
            .or(stored.openai_model)
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

        let max_tokens = match lookup("CHATSUM_MAX_TOKENS") {
            Some(raw) => Some(raw.trim().parse::<u32>().map_err(|err| {
                AppError::Configuration(format!("invalid CHATSUM_MAX_TOKENS '{raw}': {err}"))
            })?),
            None => stored.max_tokens,
        };

        Ok(Self {
            llm_provider,
            openai_api_key,
            openai_base_url,
            openai_model,
            max_tokens,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    /// A missing file yields the default (empty) configuration.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    config_directory_from(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME"))
}

fn config_directory_from(
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> AppResult<PathBuf> {
    if let Some(dir) = xdg_config_home.filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir).join(CONFIG_DIR_NAME));
    }
    home.filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("cannot locate config directory: HOME is not set".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
