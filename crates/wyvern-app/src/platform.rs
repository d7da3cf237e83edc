//! OS directory resolution for config and log files.

use std::path::{Path, PathBuf};

const APP_NAME: &str = "wyvern";

/// Errors from resolving or creating application directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application directories following OS conventions (XDG on Linux,
/// Known Folders on Windows, Library on macOS).
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds log files from debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the directories without touching the disk.
    pub fn resolve() -> Result<Self, PlatformError> {
        let base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let app = base.join(APP_NAME);
        Ok(Self {
            config_dir: app.join("config"),
            log_dir: app.join("logs"),
        })
    }

    /// Resolve the directories and create them on disk.
    pub fn resolve_and_create() -> Result<Self, PlatformError> {
        let dirs = Self::resolve()?;
        dirs.create_dirs()?;
        Ok(dirs)
    }

    /// Directories rooted under a custom base path. Useful for tests.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app = root.join(APP_NAME);
        Self {
            config_dir: app.join("config"),
            log_dir: app.join("logs"),
        }
    }

    /// Create all directories on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
