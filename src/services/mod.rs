//! Service layer for Rolodex
//!
//! The service layer provides business logic on top of the address book:
//! contact editing shared by all front ends and the birthday reminder.

pub mod birthday;
pub mod contact;

pub use birthday::{congratulate, congratulate_on, upcoming_birthdays};
pub use contact::{ContactService, CreateContactInput};
