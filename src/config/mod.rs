//! Configuration module for Rolodex
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::RolodexPaths;
pub use settings::{LoadRecovery, Settings};
