//! AQI Lookup Library
//!
//! Keeps air-quality lookup tables fresh in memory by periodically pulling
//! delimited flat files from remote HTTP endpoints, and answers point lookups
//! against them.
//!
//! This library provides tools for:
//! - Conditional refreshes driven by the remote ETag, skipping unchanged data
//! - Splitting chunked HTTP bodies into records without buffering the whole body
//! - Declarative per-dataset field layouts and row filters
//! - Concurrently readable lookup tables populated record by record
//! - Typed lookups for ZIP codes, city/state pairs and AirNow reports

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CityAndState, ForecastKey, Report};
pub use config::Config;

/// Result type alias for lookup and refresh operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for refreshing datasets and serving lookups
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Missing or invalid setting, fatal at startup
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The remote endpoint answered with a non-success status
    #[error("Downstream error: HTTP {status_code} {message}")]
    Downstream { status_code: u16, message: String },

    /// Connection-level failure (DNS, refused, timeout, broken body)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A single record could not be parsed
    #[error("Record parse error: {message}")]
    RecordParse { message: String },

    /// No value is stored for the requested key
    #[error("Unable to find {what} of {key}")]
    NotFound { what: String, key: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a downstream (HTTP status) error
    pub fn downstream(status_code: u16, message: impl Into<String>) -> Self {
        Self::Downstream {
            status_code,
            message: message.into(),
        }
    }

    /// Create a transport error without an underlying client error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a record parse error
    pub fn record_parse(message: impl Into<String>) -> Self {
        Self::RecordParse {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(what: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            what: what.into(),
            key: key.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    /// Whether this is the expected "no such key" outcome of a lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error aborts a refresh (as opposed to a skipped record)
    pub fn is_refresh_failure(&self) -> bool {
        matches!(self, Self::Downstream { .. } | Self::Transport { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_connect() {
            "connection failed".to_string()
        } else {
            error.to_string()
        };
        Self::Transport {
            message,
            source: Some(error),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
