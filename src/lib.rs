//! Rolodex - terminal address book
//!
//! This library provides the core functionality for the Rolodex contact
//! manager: validated contact fields, an address book persisted as JSON,
//! birthday reminders and the front ends that drive them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Contact fields and records
//! - `storage`: JSON file storage and the address book
//! - `services`: Contact editing and birthday reminders
//! - `display`: Table formatting for terminal output
//! - `view`: Presentation facade used by the interactive session
//! - `cli`: Command handlers and the interactive session
//!
//! # Example
//!
//! ```rust,ignore
//! use rolodex::config::{RolodexPaths, Settings};
//! use rolodex::storage::open_address_book;
//!
//! let paths = RolodexPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let (book, report) = open_address_book(&paths, &settings)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod view;

pub use error::{RolodexError, RolodexResult};
