//! Storage layer for Rolodex
//!
//! Provides JSON file storage with atomic writes and the address book
//! repository built on top of it.

pub mod address_book;
pub mod file_io;

pub use address_book::{AddressBook, LoadReport, Pages};
pub use file_io::{read_json, write_json_atomic};

use crate::config::{paths::RolodexPaths, settings::Settings};
use crate::error::RolodexError;

/// Open and load the address book configured by `paths` and `settings`
pub fn open_address_book(
    paths: &RolodexPaths,
    settings: &Settings,
) -> Result<(AddressBook, LoadReport), RolodexError> {
    paths.ensure_directories()?;

    let mut book =
        AddressBook::new(paths.address_book_file()).with_recovery(settings.load_recovery);
    let report = book.load()?;
    Ok((book, report))
}
