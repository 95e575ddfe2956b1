//! Path management for spendlink
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDLINK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/spendlink` on Linux, `%APPDATA%\spendlink` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SpendlinkError;

/// Manages all paths used by spendlink
#[derive(Debug, Clone)]
pub struct SpendlinkPaths {
    /// Base directory for all spendlink files
    base_dir: PathBuf,
}

impl SpendlinkPaths {
    /// Create a new SpendlinkPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SpendlinkError> {
        let base_dir = if let Ok(custom) = std::env::var("SPENDLINK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "spendlink")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SpendlinkError::Config("Could not determine a home directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create SpendlinkPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted login session
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SpendlinkError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendlinkError::Io(format!("Failed to create base directory: {}", e)))
    }
}
