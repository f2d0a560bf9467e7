use crate::api::DEFAULT_ENDPOINT;
use crate::errors::{ChatError, ChatResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend chat endpoint. Overridable via `CHAT_BACKEND_URL`.
    pub endpoint: String,
    /// When false (the default), Enter is ignored while a request is
    /// outstanding, so replies always land in submission order.
    pub allow_concurrent_sends: bool,
    pub tick_rate_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            allow_concurrent_sends: false,
            tick_rate_ms: 80,
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads the config file (creating a default one on first run), applies
/// environment overrides, and installs the result globally.
pub fn initialize_config() -> ChatResult<()> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        load_config_from(&config_path)?
    } else {
        let config = Config::default();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ChatError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }
        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| ChatError::config_error(format!("Failed to serialize config: {}", e)))?;
        fs::write(&config_path, config_str)
            .map_err(|e| ChatError::config_error(format!("Failed to write config file: {}", e)))?;
        config
    };

    if let Ok(url) = env::var("CHAT_BACKEND_URL") {
        config.endpoint = url;
    }

    validate_config(&config)?;
    *CONFIG.write().unwrap() = config;
    Ok(())
}

pub fn load_config_from(path: &Path) -> ChatResult<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| ChatError::config_error(format!("Failed to read config file: {}", e)))?;
    let config: Config = serde_json::from_str(&config_str)
        .map_err(|e| ChatError::config_error(format!("Failed to parse config: {}", e)))?;
    validate_config(&config)?;
    Ok(config)
}

fn get_config_path() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine home directory"))?;
    Ok(home_dir.join(".config").join("confab").join("config.json"))
}

fn validate_config(config: &Config) -> ChatResult<()> {
    if config.endpoint.is_empty() {
        return Err(ChatError::config_error("Backend endpoint is required"));
    }
    if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
        return Err(ChatError::config_error(
            "Backend endpoint must be an http(s) URL",
        ));
    }
    if config.tick_rate_ms == 0 {
        return Err(ChatError::config_error("tick_rate_ms must be greater than 0"));
    }
    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}
