//! Environment-sourced process configuration.
//!
//! All values are read and validated once at startup; a missing or malformed
//! value is fatal before the server accepts any request.

use std::time::Duration;

use crate::Error;

const API_KEY_VAR: &str = "TRELLO_API_KEY";
const TOKEN_VAR: &str = "TRELLO_TOKEN";
const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
const TIMEOUT_VAR: &str = "API_TIMEOUT";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Log verbosity, matching the four levels the `LOG_LEVEL` variable accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Per-request detail.
    Debug,
    /// Startup and lifecycle messages (default).
    Info,
    /// Recoverable problems only.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// The level as a `tracing_subscriber` filter directive.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Validated process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The Trello API key.
    pub api_key: String,
    /// The Trello member token.
    pub token: String,
    /// Log verbosity.
    pub log_level: LogLevel,
    /// Per-attempt transport timeout.
    pub timeout: Duration,
}

impl Config {
    /// Read and validate configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `TRELLO_API_KEY` or `TRELLO_TOKEN` is absent or
    /// empty, or if `LOG_LEVEL` / `API_TIMEOUT` hold unusable values.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_values(
            std::env::var(API_KEY_VAR).ok(),
            std::env::var(TOKEN_VAR).ok(),
            std::env::var(LOG_LEVEL_VAR).ok(),
            std::env::var(TIMEOUT_VAR).ok(),
        )
    }

    fn from_values(
        api_key: Option<String>,
        token: Option<String>,
        log_level: Option<String>,
        timeout_ms: Option<String>,
    ) -> Result<Self, Error> {
        let api_key = api_key
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingVar(API_KEY_VAR))?;
        let token = token
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingVar(TOKEN_VAR))?;

        let log_level = match log_level.filter(|v| !v.is_empty()) {
            None => LogLevel::Info,
            Some(value) => LogLevel::parse(&value).ok_or(Error::InvalidVar {
                name: LOG_LEVEL_VAR,
                value,
            })?,
        };

        let timeout = match timeout_ms.filter(|v| !v.is_empty()) {
            None => Duration::from_millis(DEFAULT_TIMEOUT_MS),
            Some(value) => {
                let ms = value
                    .parse::<u64>()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or(Error::InvalidVar {
                        name: TIMEOUT_VAR,
                        value,
                    })?;
                Duration::from_millis(ms)
            }
        };

        Ok(Self {
            api_key,
            token,
            log_level,
            timeout,
        })
    }
}
