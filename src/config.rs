use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::entities::city::{CityParseError, CityRegistry};

const DEFAULT_PEOPLE_BASE_URL: &str = "https://dwp-techtest.herokuapp.com";
const DEFAULT_CITIES: &str = "London=51.514248,-0.093145";

/// Longest accepted request or connect timeout.
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(3600);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got `{value}`")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("CITIES is invalid: {0}")]
    Cities(#[from] CityParseError),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub people_base_url: Url,
    pub default_distance: u32,
    pub request_timeout: Duration,
    pub upstream_connect_timeout: Duration,
    pub cities: Arc<CityRegistry>,
    pub rate_limit_burst: u32,
    pub rate_limit_period_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, applying defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let people_base_url = var("PEOPLE_BASE_URL", DEFAULT_PEOPLE_BASE_URL);
        let people_base_url = Url::parse(&people_base_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or(ConfigError::Invalid {
                name: "PEOPLE_BASE_URL",
                expected: "an http(s) URL",
                value: people_base_url,
            })?;

        Ok(Self {
            server_host: var("SERVER_HOST", "0.0.0.0"),
            server_port: parse_number("SERVER_PORT", var("SERVER_PORT", "8080"))?,
            people_base_url,
            default_distance: parse_number("DEFAULT_DISTANCE", var("DEFAULT_DISTANCE", "50"))?,
            request_timeout: parse_seconds(
                "REQUEST_TIMEOUT_SECS",
                var("REQUEST_TIMEOUT_SECS", "60"),
            )?,
            upstream_connect_timeout: parse_seconds(
                "UPSTREAM_CONNECT_TIMEOUT_SECS",
                var("UPSTREAM_CONNECT_TIMEOUT_SECS", "10"),
            )?,
            cities: Arc::new(CityRegistry::parse(&var("CITIES", DEFAULT_CITIES))?),
            rate_limit_burst: parse_number("RATE_LIMIT_BURST", var("RATE_LIMIT_BURST", "100"))?,
            rate_limit_period_ms: parse_number(
                "RATE_LIMIT_PERIOD_MS",
                var("RATE_LIMIT_PERIOD_MS", "600"),
            )?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected: "a non-negative integer",
        value,
    })
}

fn parse_seconds(name: &'static str, value: String) -> Result<Duration, ConfigError> {
    let secs: u64 = parse_number(name, value.clone())?;
    let timeout = Duration::from_secs(secs);
    if timeout > MAX_REQUEST_TIMEOUT {
        return Err(ConfigError::Invalid {
            name,
            expected: "a number of seconds no greater than 3600",
            value,
        });
    }
    Ok(timeout)
}
