//! Error types and handling for padlint operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for padlint operations
#[derive(Debug, Error)]
pub enum PadlintError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{}': {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File discovery errors (bad glob patterns, unreadable directories)
    #[error("Discovery error: {message}")]
    DiscoveryError { message: String },

    /// Autofix engine errors
    #[error("Autofix error: {message}")]
    AutofixError { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Discovery,
    Autofix,
    Internal,
}

impl PadlintError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PadlintError::ConfigError { .. } => ErrorKind::Config,
            PadlintError::IoError { .. } => ErrorKind::Io,
            PadlintError::DiscoveryError { .. } => ErrorKind::Discovery,
            PadlintError::AutofixError { .. } => ErrorKind::Autofix,
            PadlintError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Whether processing can go on with the next file
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Io | ErrorKind::Autofix)
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a discovery error
    pub fn discovery_error(message: impl Into<String>) -> Self {
        Self::DiscoveryError {
            message: message.into(),
        }
    }

    /// Create an autofix error
    pub fn autofix_error(message: impl Into<String>) -> Self {
        Self::AutofixError {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
