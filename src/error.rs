//! Error types for the conditions crate.
//!
//! Condition-set operations are total and never fail. Errors only arise at
//! the edges: parsing untrusted identifiers, reading status documents, and
//! loading configuration. Configuration problems are fail-open: we log a
//! warning and fall back to defaults.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for condition handling at the crate boundary.
#[derive(Error, Debug)]
pub enum ConditionsError {
    /// A condition type identifier was empty or malformed.
    #[error("invalid condition type: {value:?}")]
    InvalidType { value: String },

    /// A status string was not one of True, False, Unknown.
    #[error("invalid condition status: {value:?} (expected True, False or Unknown)")]
    InvalidStatus { value: String },

    /// I/O errors while reading a status document.
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },
}

/// A specialized Result type for conditions operations.
pub type Result<T> = std::result::Result<T, ConditionsError>;

impl ConditionsError {
    /// Create an invalid type error.
    pub fn invalid_type(value: impl Into<String>) -> Self {
        Self::InvalidType {
            value: value.into(),
        }
    }

    /// Create an invalid status error.
    pub fn invalid_status(value: impl Into<String>) -> Self {
        Self::InvalidStatus {
            value: value.into(),
        }
    }

    /// Create an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<io::Error> for ConditionsError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ConditionsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Fail-open handling for non-essential operations such as config loading.
pub trait FailOpen<T> {
    /// Log a warning and return the default value on error.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }
}

/// Exit codes for the `conditions` CLI.
pub mod exit_codes {
    /// Command succeeded (or `is-true` found a True condition).
    pub const OK: i32 = 0;

    /// `is-true` found the condition absent or not True.
    pub const NOT_TRUE: i32 = 1;

    /// Invalid input or unreadable document.
    pub const ERROR: i32 = 2;
}
