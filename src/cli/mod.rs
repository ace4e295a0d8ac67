//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod contact;
pub mod interactive;

pub use contact::{
    handle_contact_command, AddressCommands, ContactCommands, EmailCommands, PhoneCommands,
};
pub use interactive::ContactSession;
