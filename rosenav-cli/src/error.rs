//! Error type for CLI commands.

use std::fmt;
use std::io;

use rosenav::config::ConfigError;

/// Errors surfaced to the terminal by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration problem (bad key, bad value, unreadable file).
    Config(String),

    /// Filesystem access failed.
    Io(io::Error),

    /// Frame serialization failed.
    Serialize(serde_json::Error),

    /// Signal handler installation failed.
    Signal(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "configuration error: {}", msg),
            CliError::Io(source) => write!(f, "I/O error: {}", source),
            CliError::Serialize(source) => write!(f, "failed to serialize frame: {}", source),
            CliError::Signal(msg) => write!(f, "failed to install signal handler: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        CliError::Io(source)
    }
}

impl From<ConfigError> for CliError {
    fn from(source: ConfigError) -> Self {
        CliError::Config(source.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        CliError::Serialize(source)
    }
}
