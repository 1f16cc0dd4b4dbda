//! Application configuration.
//!
//! Read from `STATION_MAP_*` environment variables; every setting has a
//! default so the server runs against Citi Bike with no configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;

use crate::gbfs::DEFAULT_BASE_URL;
use crate::render::{DEFAULT_TIMEZONE, MapSettings};

pub const ENV_FEED_URL: &str = "STATION_MAP_FEED_URL";
pub const ENV_BIND: &str = "STATION_MAP_BIND";
pub const ENV_TIMEZONE: &str = "STATION_MAP_TIMEZONE";
pub const ENV_CACHE_TTL_SECS: &str = "STATION_MAP_CACHE_TTL_SECS";
pub const ENV_MOCK_DIR: &str = "STATION_MAP_MOCK_DIR";
pub const ENV_STATIC_DIR: &str = "STATION_MAP_STATIC_DIR";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// GBFS base URL
    pub feed_url: String,
    /// Address to listen on
    pub bind: SocketAddr,
    /// Time zone for the summary timestamp
    pub timezone: Tz,
    /// How long a fetched snapshot is reused
    pub cache_ttl: Duration,
    /// Serve feeds from this directory instead of the network
    pub mock_dir: Option<PathBuf>,
    /// Static assets directory
    pub static_dir: PathBuf,
    /// Base map settings
    pub map: MapSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_BASE_URL.to_string(),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            timezone: DEFAULT_TIMEZONE,
            cache_ttl: Duration::from_secs(30),
            mock_dir: None,
            static_dir: PathBuf::from("static"),
            map: MapSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_FEED_URL) {
            config.feed_url = url;
        }

        if let Some(bind) = get(ENV_BIND) {
            config.bind = bind.parse::<SocketAddr>().map_err(|e: std::net::AddrParseError| {
                invalid(ENV_BIND, &bind, e.to_string())
            })?;
        }

        if let Some(tz) = get(ENV_TIMEZONE) {
            config.timezone = tz
                .parse::<Tz>()
                .map_err(|e| invalid(ENV_TIMEZONE, &tz, e.to_string()))?;
        }

        if let Some(ttl) = get(ENV_CACHE_TTL_SECS) {
            let secs: u64 = ttl
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(ENV_CACHE_TTL_SECS, &ttl, e.to_string()))?;
            config.cache_ttl = Duration::from_secs(secs);
        }

        if let Some(dir) = get(ENV_MOCK_DIR) {
            config.mock_dir = Some(PathBuf::from(dir));
        }

        if let Some(dir) = get(ENV_STATIC_DIR) {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Use local feed files instead of the network.
    pub fn with_mock_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mock_dir = Some(dir.into());
        self
    }

    /// Set the snapshot cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

fn invalid(key: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.feed_url, "https://gbfs.citibikenyc.com/gbfs/en");
        assert_eq!(config.bind, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.mock_dir, None);
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_FEED_URL, "https://gbfs.example.com/en"),
            (ENV_BIND, "0.0.0.0:8080"),
            (ENV_TIMEZONE, "Europe/London"),
            (ENV_CACHE_TTL_SECS, "5"),
            (ENV_MOCK_DIR, "data/mock"),
            (ENV_STATIC_DIR, "/srv/static"),
        ]))
        .unwrap();

        assert_eq!(config.feed_url, "https://gbfs.example.com/en");
        assert_eq!(config.bind, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.timezone, chrono_tz::Europe::London);
        assert_eq!(config.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.mock_dir, Some(PathBuf::from("data/mock")));
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_MOCK_DIR, "  "), (ENV_BIND, "")])).unwrap();
        assert_eq!(config.mock_dir, None);
        assert_eq!(config.bind, "127.0.0.1:3000".parse().unwrap());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_BIND, "not-an-address")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_BIND, .. }));

        let err = AppConfig::from_lookup(lookup(&[(ENV_TIMEZONE, "Mars/Olympus")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_TIMEZONE, .. }));

        let err = AppConfig::from_lookup(lookup(&[(ENV_CACHE_TTL_SECS, "-1")])).unwrap_err();
        assert!(err.to_string().contains(ENV_CACHE_TTL_SECS));
    }

    #[test]
    fn builder_methods() {
        let config = AppConfig::default()
            .with_mock_dir("fixtures")
            .with_cache_ttl(Duration::from_secs(1));
        assert_eq!(config.mock_dir, Some(PathBuf::from("fixtures")));
        assert_eq!(config.cache_ttl, Duration::from_secs(1));
    }
}
