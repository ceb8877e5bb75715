//! Error types for Tandem plugins.
//!
//! Only non-real-time paths return errors. The render path never fails: its
//! preconditions are either guaranteed by construction or checked with
//! assertions.

use std::fmt;
use std::io;

/// Errors that can occur in Tandem plugins.
#[derive(Debug)]
pub enum PluginError {
    /// A parameter descriptor or plugin configuration is inconsistent.
    Configuration(String),
    /// State serialization failed at the I/O level.
    State(io::Error),
    /// Editor could not be opened or attached.
    Editor(String),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::State(err) => write!(f, "state error: {err}"),
            Self::Editor(msg) => write!(f, "editor error: {msg}"),
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::State(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PluginError {
    fn from(err: io::Error) -> Self {
        Self::State(err)
    }
}

/// Result type for Tandem operations.
pub type PluginResult<T> = Result<T, PluginError>;
