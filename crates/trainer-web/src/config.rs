//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Training server configuration.
///
/// Provider credentials (`RETELL_API_KEY`, `ANTHROPIC_API_KEY`) are read by
/// the respective client crates, not here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Allowed CORS origin for the training client.
    pub client_url: String,
    /// Directory holding `config.json` and `scenarios.json`.
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PORT` | Server port | `3001` |
    /// | `CLIENT_URL` | Training client origin for CORS | `http://localhost:5173` |
    /// | `TRAINER_DATA_DIR` | Data directory | `data` |
    /// | `TRAINER_ENV` | `production` disables error detail in responses | (unset) |
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let client_url =
            env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let data_dir = PathBuf::from(env::var("TRAINER_DATA_DIR").unwrap_or_else(|_| "data".to_string()));

        Ok(Self {
            addr,
            client_url,
            data_dir,
        })
    }
}

/// Whether error responses should include diagnostic detail.
///
/// Mirrors the deployment switch at response time, the way an Express error
/// middleware consults `NODE_ENV`.
pub fn is_production() -> bool {
    env::var("TRAINER_ENV")
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,
}
