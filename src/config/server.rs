//! Process settings read from the environment.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CONFIG_DIR: &str = "./config";
const DEFAULT_LOG: &str = "info";

/// Where the server listens and what it loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to bind, from `BURSAR_ADDR`.
    pub addr: String,
    /// School profile directory, from `BURSAR_CONFIG_DIR`.
    pub config_dir: PathBuf,
    /// Maximum log level, from `BURSAR_LOG`.
    pub log_level: tracing::Level,
}

impl ServerConfig {
    /// Reads settings from the environment after loading any `.env` file.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from a key lookup, falling back to defaults.
    ///
    /// An unrecognised log level falls back to `info`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("BURSAR_LOG")
            .unwrap_or_else(|| DEFAULT_LOG.to_string())
            .parse()
            .unwrap_or(tracing::Level::INFO);

        Self {
            addr: lookup("BURSAR_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            config_dir: lookup("BURSAR_CONFIG_DIR")
                .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string())
                .into(),
            log_level,
        }
    }
}
