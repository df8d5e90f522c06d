//! Server configuration, read from the environment (a `.env` file is
//! loaded first by the binaries).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `3000` |
//! | `STORAGE_BACKEND` | `local` (or `postgres`) |
//! | `BOOKINGS_FILE` | `ppg_bookings_v1.json`, local backend only |
//! | `DATABASE_URL` | required by the postgres backend |
//! | `LOG_LEVEL` | `info` |
//! | `API_CORS_ORIGINS` | unset: comma-separated allow list |
//! | `API_REQUEST_TIMEOUT_SECONDS` | `30` |

use eyre::{bail, Result, WrapErr};
use std::{env, path::PathBuf, time::Duration};
use tablebook_db::local::DEFAULT_BOOKINGS_FILE;
use tracing::Level;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where bookings are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// A JSON file on local disk.
    Local { path: PathBuf },
    /// A PostgreSQL database, with live change notification.
    Postgres { database_url: String },
}

impl StorageBackend {
    /// Reads `STORAGE_BACKEND` and the settings that backend needs.
    ///
    /// # Errors
    ///
    /// - `STORAGE_BACKEND` names an unknown backend
    /// - the postgres backend is selected without `DATABASE_URL`
    pub fn from_env() -> Result<Self> {
        let backend = env_or("STORAGE_BACKEND", "local");

        match backend.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local {
                path: env_or("BOOKINGS_FILE", DEFAULT_BOOKINGS_FILE).into(),
            }),
            "postgres" => Ok(Self::Postgres {
                database_url: env::var("DATABASE_URL").wrap_err(
                    "DATABASE_URL environment variable must be set for the postgres backend",
                )?,
            }),
            other => bail!("Unknown STORAGE_BACKEND value: {}", other),
        }
    }
}

/// Everything `tablebook` needs to start serving.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub log_level: Level,
    /// Origins allowed by CORS. `None` leaves CORS off.
    pub cors_origins: Option<Vec<String>>,
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Reads the server settings listed in the module docs.
    ///
    /// An unparsable `API_REQUEST_TIMEOUT_SECONDS` falls back to the default;
    /// an unparsable `API_PORT` is an error.
    pub fn from_env() -> Result<Self> {
        let port = env_or("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;
        let timeout_secs = env_or("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            host: env_or("API_HOST", "0.0.0.0"),
            port,
            storage: StorageBackend::from_env()?,
            log_level: parse_log_level(&env_or("LOG_LEVEL", "info")),
            cors_origins: env::var("API_CORS_ORIGINS").ok().map(|list| parse_origins(&list)),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// `host:port`, ready for `TcpListener::bind`.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
