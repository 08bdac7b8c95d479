use std::str::FromStr;

use tracing::Level;

use crate::error::ConfigError;

pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const MAX_MSGS_TO_PRODUCE: &str = "MAX_MSGS_TO_PRODUCE";
pub const TRIGGER_RANDOM_FAILURES: &str = "TRIGGER_RANDOM_FAILURES";
pub const MAX_AGE_YEARS: &str = "MAX_AGE_YEARS";

/// Producer settings, read once per Lambda container and shared by every
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerConfig {
    pub log_level: Level,
    /// Upper bound on messages produced by one invocation. Always at least 1.
    pub max_messages: usize,
    pub trigger_random_failures: bool,
    pub max_age_years: u32,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            max_messages: 2,
            trigger_random_failures: true,
            max_age_years: 99,
        }
    }
}

impl ProducerConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration from any name -> value source. Unset or blank
    /// variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let log_level = match read(LOG_LEVEL) {
            Some(v) => parse_level(&v)?,
            None => defaults.log_level,
        };

        let max_messages = match read(MAX_MSGS_TO_PRODUCE) {
            Some(v) => match v.parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(invalid(MAX_MSGS_TO_PRODUCE, "a positive integer", v)),
            },
            None => defaults.max_messages,
        };

        let trigger_random_failures = match read(TRIGGER_RANDOM_FAILURES) {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| invalid(TRIGGER_RANDOM_FAILURES, "a boolean", v))?,
            None => defaults.trigger_random_failures,
        };

        let max_age_years = match read(MAX_AGE_YEARS) {
            Some(v) => v
                .parse::<u32>()
                .map_err(|_| invalid(MAX_AGE_YEARS, "a non-negative integer", v))?,
            None => defaults.max_age_years,
        };

        Ok(Self {
            log_level,
            max_messages,
            trigger_random_failures,
            max_age_years,
        })
    }
}

fn invalid(name: &'static str, expected: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid {
        name,
        expected,
        value,
    }
}

// Python-style level names are accepted alongside the tracing ones.
fn parse_level(value: &str) -> Result<Level, ConfigError> {
    match value.to_ascii_uppercase().as_str() {
        "WARNING" => Ok(Level::WARN),
        "CRITICAL" | "FATAL" => Ok(Level::ERROR),
        other => Level::from_str(other)
            .map_err(|_| invalid(LOG_LEVEL, "a log level", value.to_string())),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
