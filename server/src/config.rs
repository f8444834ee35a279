use std::collections::HashMap;
use std::env;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_STORE_URI: &str = "sqlite://items.sqlite";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub host: String,
    /// Connection string for the item store.
    pub store_uri: String,
    /// Directory holding the built client bundle.
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.into(),
            store_uri: DEFAULT_STORE_URI.into(),
            static_dir: DEFAULT_STATIC_DIR.into(),
        }
    }
}

impl Config {
    /// Loads a `.env` file from the working directory (or a parent) into the
    /// process environment, then reads the config from the environment.
    ///
    /// Variables already set in the environment win over the file.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => warn!("Ignoring unreadable .env file: {e}"),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the config from the env file at `path`, with process environment
    /// variables taking precedence over the file.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let file_vars = dotenvy::from_path_iter(path)?.collect::<Result<HashMap<_, _>, _>>()?;
        Self::from_lookup(|key| env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load = |key: &'static str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        let port = load("PORT", &DEFAULT_PORT.to_string());
        let port = port.trim().parse::<u16>().map_err(|e| {
            ConfigError::Invalid {
                key: "PORT",
                value: port.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            port,
            host: load("HOST", DEFAULT_HOST),
            store_uri: load("MONGO_URI", DEFAULT_STORE_URI),
            static_dir: load("STATIC_DIR", DEFAULT_STATIC_DIR),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
