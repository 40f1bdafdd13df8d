use std::path::PathBuf;

use soundmood_core::uploads::DEFAULT_MAX_FILE_SIZE;

use crate::auth::jwt::JwtConfig;

/// Origins allowed when `CORS_ORIGINS` is not set: the usual local dev servers.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:8080,\
                                    http://localhost:5173,http://localhost:5174,\
                                    http://localhost:4200,http://127.0.0.1:3000,\
                                    http://127.0.0.1:8080,http://127.0.0.1:5173,\
                                    http://127.0.0.1:5174,http://127.0.0.1:4200";

/// Log output format, from `LOG_FORMAT` (`json` or anything else for text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines (default).
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root of the upload tree, served at `/uploads` (default: `uploads`).
    pub upload_dir: PathBuf,
    /// Largest accepted upload in bytes (default: 10 MiB).
    pub max_file_size: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `8000`                      |
    /// | `CORS_ORIGINS`         | localhost dev servers       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `UPLOAD_DIR`           | `uploads`                   |
    /// | `MAX_FILE_SIZE`        | `10485760`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let max_file_size: usize = std::env::var("MAX_FILE_SIZE")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE.to_string())
            .parse()
            .expect("MAX_FILE_SIZE must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_file_size,
            jwt,
        }
    }
}
