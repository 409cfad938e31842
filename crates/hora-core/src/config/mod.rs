mod defaults;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::HoraError;
use defaults::*;

/// Environment variable overriding `bot.token`.
pub const ENV_TOKEN: &str = "TOKEN";
/// Environment variable overriding `bot.chat_id`.
pub const ENV_CHAT_ID: &str = "CHAT_ID";
/// Environment variable overriding `log.level`.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Top-level hora configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub log: LogConfig,
    /// File the values were read from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Telegram bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub token: String,
    /// The single chat the bot announces to and replies in.
    #[serde(default)]
    pub chat_id: i64,
    /// Server-side long-poll budget for `getUpdates`, in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
    /// Bot API root, without the `/bot<token>` segment.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Post a timestamp to the chat when the bot starts.
    #[serde(default = "default_true")]
    pub announce_startup: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_id: 0,
            poll_timeout_secs: default_poll_timeout(),
            api_url: default_api_url(),
            announce_startup: default_true(),
        }
    }
}

/// Where the update cursor survives restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_offset_path")]
    pub offset_path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            offset_path: default_offset_path(),
        }
    }
}

impl StateConfig {
    /// Offset file location with `~` expanded.
    pub fn offset_path(&self) -> PathBuf {
        PathBuf::from(shellexpand(&self.offset_path))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing sections take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, HoraError> {
        toml::from_str(content)
            .map_err(|e| HoraError::Config(format!("failed to parse config: {e}")))
    }

    /// Overlay `TOKEN`, `CHAT_ID` and `LOG_LEVEL` from `lookup` onto the file values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), HoraError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.is_empty()) {
            self.bot.token = token;
        }
        if let Some(raw) = lookup(ENV_CHAT_ID).filter(|c| !c.is_empty()) {
            self.bot.chat_id = raw.trim().parse().map_err(|e| {
                HoraError::Config(format!("invalid {ENV_CHAT_ID} '{raw}': {e}"))
            })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|l| !l.is_empty()) {
            self.log.level = level;
        }
        Ok(())
    }

    /// Reject configurations the bot cannot run with.
    pub fn validate(&self) -> Result<(), HoraError> {
        if self.bot.token.trim().is_empty() {
            return Err(HoraError::Config(format!(
                "bot token is empty. Set it in config.toml or the {ENV_TOKEN} env var."
            )));
        }
        if self.bot.chat_id == 0 {
            return Err(HoraError::Config(format!(
                "chat_id is not set. Set it in config.toml or the {ENV_CHAT_ID} env var."
            )));
        }
        Ok(())
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Read configuration from a TOML file without environment overrides.
///
/// Falls back to defaults if the file does not exist.
pub fn read(path: &str) -> Result<Config, HoraError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| HoraError::Config(format!("failed to read {}: {}", path.display(), e)))?;
    let mut config = Config::from_toml(&content)?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

/// Load configuration from a TOML file, then apply environment overrides.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, HoraError> {
    let mut config = read(path)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}
