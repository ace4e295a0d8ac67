//! Path management for Rolodex
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `ROLODEX_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/rolodex` or `~/.config/rolodex`
//! 3. Windows: `%APPDATA%\rolodex`

use std::path::PathBuf;

use crate::error::RolodexError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ROLODEX_DATA_DIR";

/// Manages all paths used by Rolodex
#[derive(Debug, Clone)]
pub struct RolodexPaths {
    /// Base directory for all Rolodex data
    base_dir: PathBuf,
}

impl RolodexPaths {
    /// Create a new RolodexPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, RolodexError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create RolodexPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/rolodex/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/rolodex/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to address_book.json
    pub fn address_book_file(&self) -> PathBuf {
        self.data_dir().join("address_book.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), RolodexError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RolodexError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| RolodexError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, RolodexError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                RolodexError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("rolodex"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, RolodexError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| RolodexError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("rolodex"))
}
