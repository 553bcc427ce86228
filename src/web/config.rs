use std::fmt::{self, Debug, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

/// Largest accepted request body, upload included.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// santander-ynab-web: upload a Santander Excel export, download a YNAB CSV.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct WebArgs {
    /// Address to listen on.
    #[arg(long, env = "SANTANDER_YNAB_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Secret used to sign flash-message cookies.
    #[arg(long, env = "SANTANDER_YNAB_SECRET", hide_env_values = true)]
    secret: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "SANTANDER_YNAB_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Directory for the per-request scratch files. Defaults to the system
    /// temp directory.
    #[arg(long, env = "SANTANDER_YNAB_TEMP_DIR")]
    temp_dir: Option<PathBuf>,

    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl WebArgs {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> WebConfig {
        WebConfig {
            bind: self.bind,
            secret: self.secret.clone(),
            max_upload_bytes: self.max_upload_bytes,
            temp_dir: self.temp_dir.clone().unwrap_or_else(std::env::temp_dir),
        }
    }
}

/// Everything the web handlers need, passed in explicitly.
#[derive(Clone)]
pub struct WebConfig {
    pub bind: SocketAddr,
    pub secret: String,
    pub max_upload_bytes: usize,
    pub temp_dir: PathBuf,
}

impl WebConfig {
    pub fn new(secret: impl Into<String>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            secret: secret.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

impl Debug for WebConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebConfig")
            .field("bind", &self.bind)
            .field("secret", &"<redacted>")
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("temp_dir", &self.temp_dir)
            .finish()
    }
}
