//! Application configuration shared by the core and its transports.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the persisted knowledge base, relative to the working directory.
pub const DEFAULT_KB_PATH: &str = "kb.json";

/// Global application configuration (gateway identity + knowledge-base file). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown by the status endpoint.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Path of the JSON file `/save` writes and `/load` reads.
    pub kb_path: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "kbchat".to_string(),
            port: 8001,
            kb_path: DEFAULT_KB_PATH.to_string(),
        }
    }
}

impl CoreConfig {
    pub fn kb_path(&self) -> PathBuf {
        PathBuf::from(&self.kb_path)
    }

    /// Load config from file and environment. Precedence: env `KBCHAT_*` > file (`KBCHAT_CONFIG`
    /// or `config/gateway.toml`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("KBCHAT_CONFIG").unwrap_or_else(|_| "config/gateway.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Same as [`CoreConfig::load`] with an explicit config file; a missing file is skipped.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("kb_path", defaults.kb_path)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix("KBCHAT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        built.try_deserialize()
    }
}
