mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BotError;
use defaults::*;

/// Top-level dadabot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

/// Bot API credentials and endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub api_key: String,
    /// Deployed application name, the first label of the webhook host.
    #[serde(default)]
    pub app_name: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_webhook_host")]
    pub webhook_host: String,
    /// How many update ids below the current offset push delivery remembers.
    #[serde(default = "default_seen_window")]
    pub seen_window: usize,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            app_name: String::new(),
            api_base_url: default_api_base_url(),
            webhook_host: default_webhook_host(),
            seen_window: default_seen_window(),
        }
    }
}

impl TelegramConfig {
    /// Callback URL registered with `setWebhook`.
    pub fn webhook_url(&self) -> String {
        format!(
            "https://{}.{}/{}",
            self.app_name, self.webhook_host, self.api_key
        )
    }

    /// Reject settings that make every Bot API call fail.
    pub fn validate(&self) -> Result<(), BotError> {
        if self.api_key.trim().is_empty() {
            return Err(BotError::Config(
                "telegram api_key is empty. Set it in config.toml or TELEGRAM_API_KEY env var."
                    .into(),
            ));
        }
        if self.seen_window == 0 {
            return Err(BotError::Config("telegram seen_window must be > 0".into()));
        }
        Ok(())
    }
}

/// Push-delivery HTTP receiver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// General bot settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Explicit log filter. Unset = decided by [`crate::logging::default_level`].
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Apply `TELEGRAM_API_KEY`, `APP_NAME` and `PORT` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup("TELEGRAM_API_KEY") {
            self.telegram.api_key = key;
        }
        if let Some(name) = lookup("APP_NAME") {
            self.telegram.app_name = name;
        }
        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(p) => self.server.port = p,
                Err(e) => tracing::warn!("ignoring invalid PORT '{port}': {e}"),
            }
        }
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, BotError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| BotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, BotError> {
    toml::from_str(content).map_err(|e| BotError::Config(format!("failed to parse config: {e}")))
}
