//! Error type for settings persistence.

use std::path::PathBuf;

/// What went wrong while loading or persisting `config.ron`.
///
/// Disk and parse failures carry the offending path so startup messages
/// point the user at the file to fix or delete.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("could not read settings from {}: {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file or its directory could not be written.
    #[error("could not write settings to {}: {source}", path.display())]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid RON for the current schema.
    #[error("{} is not a valid settings file: {source}", path.display())]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// RON parse error with position information.
        #[source]
        source: ron::error::SpannedError,
    },

    /// In-memory settings failed to serialize.
    #[error("could not serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}
