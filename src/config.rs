use serde::Deserialize;

use crate::sql::DbConfig;

/// Number of workers used when the configuration does not say otherwise.
pub const DEFAULT_WORKERS: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Listening port. Defaults to 80, or 443 when `tls` is set.
    #[serde(default)]
    pub port: Option<u16>,
    /// Wrap accepted sockets in TLS. Requires a stream wrapper on the server.
    #[serde(default)]
    pub tls: bool,
    /// Upper bound on concurrently served connections.
    #[serde(default = "default_workers")]
    pub max_workers: usize,
    /// Database connection settings for the SQL glue, if any.
    #[serde(default)]
    pub db: Option<DbConfig>,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: None,
            tls: false,
            max_workers: DEFAULT_WORKERS,
            db: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let port = std::env::var("WARDEN_PORT")
            .ok()
            .and_then(|v| v.parse().ok());
        let tls = std::env::var("WARDEN_TLS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let max_workers = std::env::var("WARDEN_WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_WORKERS);
        Self {
            port,
            tls,
            max_workers,
            db: None,
        }
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// The port to bind, applying the 80/443 defaulting rule.
    pub fn effective_port(&self) -> u16 {
        self.port
            .unwrap_or(if self.tls { crate::server::DEFAULT_SECURE_PORT } else { crate::server::DEFAULT_PORT })
    }
}
