//! Error types for the task model.

use std::path::PathBuf;

use thiserror::Error;

/// A specialized Result type for loading settings.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors that can occur while loading [`Settings`](crate::Settings).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings text is not valid TOML.
    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// The settings text is not valid JSON.
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}
