//! Configuration handling for the analyzer.
//!
//! Everything is read from environment variables with development defaults,
//! so both the CLI and the API server can run without any setup. Numeric
//! values are validated while loading.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Environment variable names. Public so tests and wrappers can refer to them.
pub const ENV_BIND_ADDR: &str = "PAGESCORE_BIND_ADDR";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "PAGESCORE_FETCH_TIMEOUT_SECS";
pub const ENV_MAX_REDIRECTS: &str = "PAGESCORE_MAX_REDIRECTS";
pub const ENV_RATE_LIMIT_MAX: &str = "PAGESCORE_RATE_LIMIT_MAX";
pub const ENV_RATE_LIMIT_WINDOW_SECS: &str = "PAGESCORE_RATE_LIMIT_WINDOW_SECS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MAX_REDIRECTS: usize = 10;
const DEFAULT_RATE_LIMIT_MAX: u32 = 30;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: i64 = 60;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    fetch: FetchConfig,
    rate_limit_max: u32,
    rate_limit_window_secs: i64,
}

/// Settings for a single network attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let timeout_secs: u64 = positive_var(ENV_FETCH_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS)?;
        let max_redirects: usize = positive_var(ENV_MAX_REDIRECTS, DEFAULT_MAX_REDIRECTS)?;
        let rate_limit_max: u32 = positive_var(ENV_RATE_LIMIT_MAX, DEFAULT_RATE_LIMIT_MAX)?;
        let rate_limit_window_secs: i64 =
            positive_var(ENV_RATE_LIMIT_WINDOW_SECS, DEFAULT_RATE_LIMIT_WINDOW_SECS)?;

        Ok(Self {
            bind_addr,
            fetch: FetchConfig {
                timeout: Duration::from_secs(timeout_secs),
                max_redirects,
            },
            rate_limit_max,
            rate_limit_window_secs,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    pub fn fetch(&self) -> FetchConfig {
        self.fetch
    }

    /// Maximum analyze requests per client within one window.
    pub fn rate_limit_max(&self) -> u32 {
        self.rate_limit_max
    }

    pub fn rate_limit_window_secs(&self) -> i64 {
        self.rate_limit_window_secs
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            fetch: FetchConfig::default(),
            rate_limit_max: DEFAULT_RATE_LIMIT_MAX,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
        }
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn positive_var<T>(field: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let Ok(raw) = env::var(field) else {
        return Ok(default);
    };

    let value = raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        field,
        reason: format!("'{raw}' is not a number"),
    })?;

    if value <= T::default() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(value)
}
