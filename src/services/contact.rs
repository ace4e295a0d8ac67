//! Contact service
//!
//! Business logic shared by the command-line and interactive front ends:
//! building contacts from raw input and applying edits to stored records.
//! Persisting the book is left to the caller.

use crate::error::{RolodexError, RolodexResult};
use crate::models::Record;
use crate::storage::AddressBook;

/// Raw input for a new contact
#[derive(Debug, Clone, Default)]
pub struct CreateContactInput {
    pub name: String,
    pub phones: Vec<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub address: Option<String>,
}

impl CreateContactInput {
    /// Build and validate the record without touching any book
    pub fn into_record(self) -> RolodexResult<Record> {
        let mut record = Record::new(
            self.name.trim(),
            self.birthday.as_deref(),
            self.email.as_deref(),
            self.address.as_deref(),
        )?;
        for phone in &self.phones {
            record.add_phone(phone.trim())?;
        }
        Ok(record)
    }
}

/// Service for contact management
pub struct ContactService<'a> {
    book: &'a mut AddressBook,
}

impl<'a> ContactService<'a> {
    /// Create a new contact service
    pub fn new(book: &'a mut AddressBook) -> Self {
        Self { book }
    }

    /// Create a contact; nothing is added if any field is invalid
    pub fn create(&mut self, input: CreateContactInput) -> RolodexResult<&Record> {
        let record = input.into_record()?;
        let name = record.name().to_string();
        self.book.add_record(record)?;
        self.get(&name)
    }

    /// Get a contact by exact name
    pub fn get(&self, name: &str) -> RolodexResult<&Record> {
        self.book
            .find(name)
            .ok_or_else(|| RolodexError::contact_not_found(name))
    }

    /// Delete a contact, reporting a missing name as an error
    pub fn delete(&mut self, name: &str) -> RolodexResult<()> {
        if self.book.delete(name) {
            Ok(())
        } else {
            Err(RolodexError::contact_not_found(name))
        }
    }

    /// Apply an edit to a stored contact
    ///
    /// The edit runs on a copy; the stored record only changes if it succeeds.
    pub fn update<F>(&mut self, name: &str, edit: F) -> RolodexResult<&Record>
    where
        F: FnOnce(&mut Record) -> RolodexResult<()>,
    {
        let record = self
            .book
            .find_mut(name)
            .ok_or_else(|| RolodexError::contact_not_found(name))?;

        let mut draft = record.clone();
        edit(&mut draft)?;
        *record = draft;
        Ok(record)
    }

    pub fn add_phone(&mut self, name: &str, phone: &str) -> RolodexResult<&Record> {
        self.update(name, |r| r.add_phone(phone))
    }

    pub fn remove_phone(&mut self, name: &str, phone: &str) -> RolodexResult<&Record> {
        self.update(name, |r| r.remove_phone(phone))
    }

    pub fn edit_phone(&mut self, name: &str, old: &str, new: &str) -> RolodexResult<&Record> {
        self.update(name, |r| r.edit_phone(old, new))
    }

    /// Replace the email, clearing any existing one first
    pub fn set_email(&mut self, name: &str, email: &str) -> RolodexResult<&Record> {
        self.update(name, |r| {
            r.remove_email();
            r.add_email(email)
        })
    }

    pub fn clear_email(&mut self, name: &str) -> RolodexResult<&Record> {
        self.update(name, |r| {
            r.remove_email();
            Ok(())
        })
    }

    /// Replace the address, clearing any existing one first
    pub fn set_address(&mut self, name: &str, address: &str) -> RolodexResult<&Record> {
        self.update(name, |r| {
            r.remove_address();
            r.add_address(address)
        })
    }

    pub fn clear_address(&mut self, name: &str) -> RolodexResult<&Record> {
        self.update(name, |r| {
            r.remove_address();
            Ok(())
        })
    }

    pub fn set_birthday(&mut self, name: &str, birthday: &str) -> RolodexResult<&Record> {
        self.update(name, |r| r.set_birthday(birthday))
    }
}
