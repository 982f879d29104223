//! Configuration management for the front-desk console

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// API base URL baked in at build time, used when nothing is configured at runtime
const BUILD_TIME_API_URL: Option<&str> = option_env!("HOTEL_DESK_API_URL");

const FALLBACK_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Fixed per-request timeout, no retry on expiry
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the local storage file
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Optional log file name, rotated daily inside the storage directory
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .set_default("api.base_url", default_api_url())?
            .set_default("api.timeout_secs", 10)?
            .set_default("storage.dir", ".hotel-desk")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // HOTEL_DESK_API__BASE_URL, HOTEL_DESK_LOGGING__LEVEL, ...
            .add_source(
                Environment::with_prefix("HOTEL_DESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Runtime configuration object wins over everything else
            .set_override_option("api.base_url", env::var("API_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

fn default_api_url() -> String {
    BUILD_TIME_API_URL.unwrap_or(FALLBACK_API_URL).to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: 10,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".hotel-desk"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
