//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::resrobot::ResRobotConfig;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("RESROBOT_API_KEY is not set and the canned fallback is disabled")]
    MissingApiKey,
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// ResRobot access id; `None` serves canned data only.
    pub api_key: Option<String>,
    /// Override for the ResRobot base URL.
    pub base_url: Option<String>,
    /// Timeout for stop and departure requests, in seconds.
    pub timeout_secs: u64,
    /// Maximum concurrent upstream requests.
    pub max_concurrent: usize,
    /// Listen address.
    pub addr: SocketAddr,
    /// Directory of static front-end files.
    pub static_dir: Option<PathBuf>,
    /// Serve canned data when ResRobot fails.
    pub fallback: bool,
    /// Response cache TTL.
    pub cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: 5,
            max_concurrent: 5,
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: None,
            fallback: true,
            cache_ttl: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let config = Self {
            api_key: var("RESROBOT_API_KEY"),
            base_url: var("RESROBOT_BASE_URL"),
            timeout_secs: parse_or(
                "RESROBOT_TIMEOUT_SECS",
                var("RESROBOT_TIMEOUT_SECS"),
                defaults.timeout_secs,
            )?,
            max_concurrent: parse_or(
                "RESROBOT_MAX_CONCURRENT",
                var("RESROBOT_MAX_CONCURRENT"),
                defaults.max_concurrent,
            )?,
            addr: parse_or("STOP_FINDER_ADDR", var("STOP_FINDER_ADDR"), defaults.addr)?,
            static_dir: var("STOP_FINDER_STATIC_DIR").map(PathBuf::from),
            fallback: match var("STOP_FINDER_FALLBACK") {
                Some(v) => parse_bool("STOP_FINDER_FALLBACK", &v)?,
                None => defaults.fallback,
            },
            cache_ttl: Duration::from_secs(parse_or(
                "STOP_FINDER_CACHE_TTL_SECS",
                var("STOP_FINDER_CACHE_TTL_SECS"),
                defaults.cache_ttl.as_secs(),
            )?),
        };

        if config.api_key.is_none() && !config.fallback {
            return Err(ConfigError::MissingApiKey);
        }
        if config.max_concurrent == 0 {
            return Err(ConfigError::Invalid {
                name: "RESROBOT_MAX_CONCURRENT",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(config)
    }

    /// Set the listen address.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set the static file directory.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// ResRobot client configuration, if an access id is set.
    pub fn resrobot(&self) -> Option<ResRobotConfig> {
        let key = self.api_key.as_ref()?;
        let mut config = ResRobotConfig::new(key)
            .with_timeout(self.timeout_secs)
            .with_max_concurrent(self.max_concurrent);
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        Some(config)
    }

    /// Cache configuration.
    pub fn cache(&self) -> CacheConfig {
        CacheConfig::default().with_ttl(self.cache_ttl)
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value: v,
        }),
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
