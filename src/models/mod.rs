//! Core data models for Rolodex
//!
//! This module contains the validated contact fields and the record that
//! aggregates them.

pub mod field;
pub mod record;

pub use field::{parse_birthday, Field, FieldKind, BIRTHDAY_FORMAT};
pub use record::Record;
