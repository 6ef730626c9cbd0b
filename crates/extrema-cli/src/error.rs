//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The function expression could not be parsed.
    #[error("Invalid expression at offset {offset}: {message}")]
    Parse {
        /// Byte offset of the offending token.
        offset: usize,
        /// What went wrong.
        message: String,
    },

    /// A required setting was given neither on the command line nor in the
    /// settings file.
    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    /// A setting is out of range.
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// The settings file could not be read.
    #[error("Cannot read settings file {path}: {source}")]
    SettingsIo {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for the expected keys.
    #[error("Malformed settings file {path}: {source}")]
    SettingsFormat {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
