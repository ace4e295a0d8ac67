//! User settings for Rolodex
//!
//! Manages user preferences such as the contact list page size and how a
//! damaged address book file is recovered on load.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::paths::RolodexPaths;
use crate::error::RolodexError;

/// What to do when the address book file contains invalid contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum LoadRecovery {
    /// Discard the whole file if any contact is invalid
    #[default]
    Wipe,
    /// Keep the valid contacts and drop the invalid ones
    SkipInvalid,
}

/// User settings for Rolodex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of contacts per page when listing
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Recovery policy for invalid contacts on load
    #[serde(default)]
    pub load_recovery: LoadRecovery,
}

fn default_schema_version() -> u32 {
    1
}

fn default_page_size() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            page_size: default_page_size(),
            load_recovery: LoadRecovery::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &RolodexPaths) -> Result<Self, RolodexError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                RolodexError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RolodexError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RolodexPaths) -> Result<(), RolodexError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            RolodexError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            RolodexError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
