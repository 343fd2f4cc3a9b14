use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DATA_DIR: &str = ".simsar-console";
const CONFIG_FILE: &str = "console_config.json";

fn default_port() -> u16 {
    8790
}

fn default_session_ttl_hours() -> i64 {
    24 * 7
}

fn default_request_timeout() -> u64 {
    30
}

fn default_locale() -> String {
    "ar".to_string()
}

/// Console service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to allow LAN access
    /// - false: localhost only 127.0.0.1 (default)
    /// - true: bind 0.0.0.0
    #[serde(default)]
    pub allow_lan_access: bool,

    /// Base URL of the backend service that owns the business data.
    /// When unset, proxied routes fail per request with a configuration
    /// error; mock endpoints keep working.
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Session validity (hours)
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,

    /// Outbound request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Message locale for user-facing envelopes
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allow_lan_access: false,
            backend_url: None,
            session_ttl_hours: default_session_ttl_hours(),
            request_timeout: default_request_timeout(),
            locale: default_locale(),
        }
    }
}

impl ConsoleConfig {
    pub fn bind_address(&self) -> &'static str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }

    /// Backend origin with any trailing slash removed, if configured.
    pub fn backend_origin(&self) -> Option<String> {
        self.backend_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
    }
}

pub fn get_data_dir() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Failed to get user home directory")?;
    let data_dir = home.join(DATA_DIR);

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)
            .map_err(|e| format!("Failed to create data directory: {}", e))?;
    }

    Ok(data_dir)
}

/// Load console configuration
pub fn load_console_config() -> Result<ConsoleConfig, String> {
    let data_dir = get_data_dir()?;
    let config_path = data_dir.join(CONFIG_FILE);

    if !config_path.exists() {
        let config = ConsoleConfig::default();
        let _ = save_console_config(&config);
        return Ok(config);
    }

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read config file: {}", e))?;

    serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
}

/// Save console configuration
pub fn save_console_config(config: &ConsoleConfig) -> Result<(), String> {
    let data_dir = get_data_dir()?;
    let config_path = data_dir.join(CONFIG_FILE);

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    fs::write(&config_path, content).map_err(|e| format!("Failed to save config: {}", e))
}
