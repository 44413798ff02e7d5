use std::env;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration. Every tunable the pipeline uses comes from here;
/// nothing in the core hard-codes a threshold.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_signal_age: Duration,
    pub cooldown_period: Duration,
    pub stop_loss_fraction: f64,
    pub allocation_fraction: f64,
    pub fallback_capital: f64,
    pub dry_run: bool,
    pub api_token: String,
    pub broker_base_url: String,
    pub broker_api_key: String,
    pub database_path: String,
    pub bind_addr: String,
    pub retry_attempts: u32,
    pub retry_delay: StdDuration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|name| env::var(name).ok())
    }

    /// Reads configuration through an injectable lookup so tests can supply
    /// values without touching process environment.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup("API_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("API_TOKEN"))?;

        Ok(Self {
            max_signal_age: Duration::seconds(parse_or(&lookup, "MAX_SIGNAL_AGE_SECS", 60)?),
            cooldown_period: Duration::seconds(parse_or(&lookup, "COOLDOWN_PERIOD_SECS", 300)?),
            stop_loss_fraction: parse_or(&lookup, "STOP_LOSS_FRACTION", 0.02)?,
            allocation_fraction: parse_or(&lookup, "ALLOCATION_FRACTION", 0.10)?,
            fallback_capital: parse_or(&lookup, "FALLBACK_CAPITAL", 10_000.0)?,
            dry_run: parse_or(&lookup, "DRY_RUN", true)?,
            api_token,
            broker_base_url: lookup("BROKER_BASE_URL")
                .unwrap_or_else(|| "https://api.example.com".to_string()),
            broker_api_key: lookup("BROKER_API_KEY").unwrap_or_default(),
            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "data/gateway.db".to_string()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            retry_attempts: parse_or(&lookup, "RETRY_ATTEMPTS", 3)?,
            retry_delay: StdDuration::from_millis(parse_or(&lookup, "RETRY_DELAY_MS", 2000)?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}
