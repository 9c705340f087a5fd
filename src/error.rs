//! Errors raised at the I/O boundary around the transformer.
//!
//! The transform itself never fails; only reading, writing and configuration can.

use std::fmt;

/// Error type for reading, writing and configuring event streams
#[derive(Debug)]
pub enum TransformError {
    IoError(std::io::Error),
    /// An input line that is not a valid event. `line` is 1-based.
    JsonError {
        line: usize,
        source: serde_json::Error,
    },
    SerializeError(serde_json::Error),
    ConfigError(String),
}

impl From<std::io::Error> for TransformError {
    fn from(err: std::io::Error) -> Self {
        TransformError::IoError(err)
    }
}

impl From<serde_json::Error> for TransformError {
    fn from(err: serde_json::Error) -> Self {
        TransformError::SerializeError(err)
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::IoError(e) => write!(f, "IO error: {}", e),
            TransformError::JsonError { line, source } => {
                write!(f, "Invalid event on line {}: {}", line, source)
            }
            TransformError::SerializeError(e) => write!(f, "JSON error: {}", e),
            TransformError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransformError::IoError(e) => Some(e),
            TransformError::JsonError { source, .. } => Some(source),
            TransformError::SerializeError(e) => Some(e),
            TransformError::ConfigError(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
