use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use tracing::{info, warn};

/// Startup configuration, read once from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    /// Backend origin; routes are appended as `{backend_url}/api/...`.
    pub backend_url: String,
    /// Cookie holding the bearer token.
    pub auth_cookie: String,
    pub upstream_timeout: Duration,
    pub max_upload_bytes: usize,
}

#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SITE_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError {
                key: "SITE_ADDR",
                message: err.to_string(),
            })?;

        Ok(Self {
            addr,
            backend_url: env_var_string("BACKEND_API_URL", "http://localhost:8000"),
            auth_cookie: env_var_string("AUTH_COOKIE_NAME", "auth_token"),
            upstream_timeout: Duration::from_secs(env_var_u64("UPSTREAM_TIMEOUT_SECS", 30)),
            max_upload_bytes: env_var_usize("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
        })
    }
}

fn env_var_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    parse_or(key, env::var(key).ok(), default)
}

fn env_var_usize(key: &str, default: usize) -> usize {
    parse_or(key, env::var(key).ok(), default)
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{key}={raw} is not a valid value, using default");
            default
        }),
    }
}
