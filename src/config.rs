//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first if present.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL
    pub database_url: String,
    /// Server port
    pub port: u16,
    /// Directory holding the web UI's static files
    pub ui_dir: PathBuf,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Mapbox access token handed to the web UI
    pub mapbox_token: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 8222,
            ui_dir: PathBuf::from("./ui"),
            frontend_url: "http://localhost:8222".to_string(),
            mapbox_token: Some("test_mapbox_token".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port: u16 = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8222,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://ran.db".to_string()),
            port,
            ui_dir: env::var("UI_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./ui")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            mapbox_token: env::var("MAPBOX_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
