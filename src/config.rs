// src/config.rs
use crate::domain::slider::RangeConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("Invalid price range: {0}")]
    InvalidRange(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: String,
    pub sheet_csv_url: Option<String>,
    pub snapshot_path: PathBuf,
    pub fetch_limit: usize,
    pub http_timeout: Duration,
    pub price_range: RangeConfig,
    pub debounce: Duration,
    pub max_workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: "listings.sqlite3".to_string(),
            sheet_csv_url: None,
            snapshot_path: PathBuf::from("data.json"),
            fetch_limit: 1000,
            http_timeout: Duration::from_secs(30),
            price_range: RangeConfig::default(),
            debounce: Duration::from_millis(200),
            max_workers: 8,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any name → value lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };
        let defaults = Config::default();

        let range_defaults = defaults.price_range;
        let price_range = RangeConfig::new(
            env.parsed("PRICE_RANGE_MIN")?.unwrap_or(range_defaults.min()),
            env.parsed("PRICE_RANGE_MAX")?.unwrap_or(range_defaults.max()),
            env.parsed("PRICE_RANGE_STEP")?.unwrap_or(range_defaults.step()),
            env.parsed("PRICE_RANGE_GAP")?.unwrap_or(range_defaults.gap()),
        )?;

        let max_workers: usize = env
            .parsed("LISTINGS_MAX_WORKERS")?
            .unwrap_or(defaults.max_workers);
        if max_workers == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LISTINGS_MAX_WORKERS",
                value: "0".to_string(),
            });
        }

        Ok(Config {
            bind_addr: env.parsed("LISTINGS_BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            db_path: env.non_empty("LISTINGS_DB_PATH").unwrap_or(defaults.db_path),
            sheet_csv_url: env.non_empty("LISTINGS_SHEET_CSV_URL"),
            snapshot_path: env
                .non_empty("LISTINGS_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            fetch_limit: env.parsed("LISTINGS_FETCH_LIMIT")?.unwrap_or(defaults.fetch_limit),
            http_timeout: env
                .parsed("LISTINGS_HTTP_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            price_range,
            debounce: env
                .parsed("LISTINGS_DEBOUNCE_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            max_workers,
        })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn non_empty(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|raw| raw.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn parsed<T: std::str::FromStr>(&self, name: &'static str) -> Result<Option<T>, ConfigError> {
        match self.non_empty(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        }
    }
}
