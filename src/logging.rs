//! Process-wide logging setup
//!
//! Reads the connector plugin conventions:
//! - `HASURA_PLUGIN_LOG_LEVEL`: trace, debug, info (default), warn, error,
//!   fatal or panic
//! - `PRETTY_LOGS=true`: human-readable output instead of JSON lines
//!
//! `RUST_LOG` still wins when set.

use std::error::Error;

use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_ENV: &str = "HASURA_PLUGIN_LOG_LEVEL";
pub const PRETTY_LOGS_ENV: &str = "PRETTY_LOGS";

/// Plugin log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    /// Only panics are reported, so logging is silenced
    Panic,
}

impl LogLevel {
    /// Unknown names fall back to `info`
    pub fn parse(name: &str) -> Self {
        match name {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            "fatal" => LogLevel::Fatal,
            "panic" => LogLevel::Panic,
            _ => LogLevel::Info,
        }
    }

    /// `EnvFilter` directive for this level
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error | LogLevel::Fatal => "error",
            LogLevel::Panic => "off",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LogLevel,
    pub pretty: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            pretty: false,
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(LOG_LEVEL_ENV).ok().as_deref(),
            std::env::var(PRETTY_LOGS_ENV).ok().as_deref(),
        )
    }

    pub fn from_values(level: Option<&str>, pretty: Option<&str>) -> Self {
        Self {
            level: level.map(LogLevel::parse).unwrap_or(LogLevel::Info),
            pretty: pretty == Some("true"),
        }
    }

    /// Install the global subscriber. Call once, from `main`.
    pub fn init(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.directive()));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        if self.pretty {
            builder.pretty().try_init()
        } else {
            builder.json().try_init()
        }
    }
}
