//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub session_store_path: PathBuf,
    pub log_level: Level,
    pub seed_demo_resumes: bool,
    /// When set, analysis results are drawn from a seeded generator so
    /// repeated runs produce the same scores. Unset means thread-local
    /// randomness.
    pub rng_seed: Option<u64>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Persistence and Seeding Settings ---
        let session_store_path = std::env::var("SESSION_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./resumelens_session.json"));

        let seed_str =
            std::env::var("SEED_DEMO_RESUMES").unwrap_or_else(|_| "true".to_string());
        let seed_demo_resumes = seed_str.parse::<bool>().map_err(|_| {
            ConfigError::InvalidValue(
                "SEED_DEMO_RESUMES".to_string(),
                format!("'{}' is not a valid boolean", seed_str),
            )
        })?;

        let rng_seed = match std::env::var("RNG_SEED") {
            Ok(s) => Some(s.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RNG_SEED".to_string(),
                    format!("'{}' is not a valid unsigned integer", s),
                )
            })?),
            Err(_) => None,
        };

        Ok(Self {
            bind_address,
            session_store_path,
            log_level,
            seed_demo_resumes,
            rng_seed,
        })
    }
}
