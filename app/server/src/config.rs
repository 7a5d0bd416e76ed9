//! FILENAME: app/server/src/config.rs
//! Service configuration, read from the environment at startup.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Public Superstore sample, used when no source is configured.
pub const DEFAULT_DATA_SOURCE: &str =
    "https://raw.githubusercontent.com/leonism/sample-superstore/master/data/superstore.csv";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name} must be {expected}: {value:?}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Where the CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` values are URLs; anything else is a path.
    pub fn parse(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(value.to_string())
        } else {
            DataSource::Path(PathBuf::from(value))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `SALES_DATA_SOURCE`
    pub data_source: DataSource,
    /// `SALES_LISTEN_ADDR`
    pub listen_addr: SocketAddr,
    /// `SALES_LOG_DIR`; console only when unset.
    pub log_dir: Option<PathBuf>,
    /// `SALES_REQUEST_TIMEOUT_SECS`
    pub request_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            data_source: DataSource::parse(DEFAULT_DATA_SOURCE),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            log_dir: None,
            request_timeout: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup. Values are trimmed
    /// and empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name).and_then(|v| {
                let trimmed = v.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };

        let mut config = Self::default();

        if let Some(source) = var("SALES_DATA_SOURCE") {
            config.data_source = DataSource::parse(&source);
        }
        if let Some(addr) = var("SALES_LISTEN_ADDR") {
            config.listen_addr = addr.parse().map_err(|_| ConfigError {
                name: "SALES_LISTEN_ADDR",
                value: addr.clone(),
                expected: "a socket address such as 0.0.0.0:8000",
            })?;
        }
        config.log_dir = var("SALES_LOG_DIR").map(PathBuf::from);
        if let Some(secs) = var("SALES_REQUEST_TIMEOUT_SECS") {
            let parsed = secs.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| ConfigError {
                name: "SALES_REQUEST_TIMEOUT_SECS",
                value: secs.clone(),
                expected: "a positive number of seconds",
            })?;
            config.request_timeout = Some(Duration::from_secs(parsed));
        }

        Ok(config)
    }
}
