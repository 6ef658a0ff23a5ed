//! Error types for the langmet engine.

use std::error::Error as StdError;
use std::fmt;
use std::result;

/// A specialized Result type for langmet operations.
pub type Result<T> = result::Result<T, Error>;

/// The error type for langmet operations.
#[derive(Debug)]
pub enum Error {
    /// A primitive required at least one value and got none
    EmptyInput(&'static str),
    /// Out-of-range or inconsistent parameters
    InvalidConfig(String),
    /// Event store errors. Not produced by the in-memory store; this is the
    /// error channel for external `EventStore` implementations (database
    /// adapters and the like).
    Storage(String),
    /// Configuration errors
    Config(String),
    /// I/O errors
    Io(std::io::Error),
    /// Serialization/deserialization errors
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput(what) => {
                write!(f, "Empty input: {} requires at least one value", what)
            }
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Storage(msg) => write!(f, "Storage error: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
