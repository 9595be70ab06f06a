//! State configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VETRINA_DATA_DIR` - Directory backing the durable storage scope
//!   (default: `.vetrina`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Default durable-scope directory when `VETRINA_DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = ".vetrina";

const DATA_DIR_VAR: &str = "VETRINA_DATA_DIR";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// State-layer configuration.
#[derive(Debug, Clone)]
pub struct StateConfig {
    /// Directory backing the durable storage scope.
    pub data_dir: PathBuf,
}

impl StateConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `VETRINA_DATA_DIR` is set to a non-unicode or
    /// empty value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = match env::var(DATA_DIR_VAR) {
            Ok(dir) if dir.is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    DATA_DIR_VAR.to_owned(),
                    "must not be empty".to_owned(),
                ));
            }
            Ok(dir) => PathBuf::from(dir),
            Err(env::VarError::NotPresent) => PathBuf::from(DEFAULT_DATA_DIR),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidEnvVar(
                    DATA_DIR_VAR.to_owned(),
                    "must be valid unicode".to_owned(),
                ));
            }
        };
        Ok(Self { data_dir })
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}
