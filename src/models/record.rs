//! Contact record model
//!
//! A record aggregates one contact's fields: a required name, any number of
//! phones and optional email, birthday and address.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::field::{Field, FieldKind};
use crate::error::{RolodexError, RolodexResult};

/// One contact in the address book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Field,

    #[serde(default)]
    phones: Vec<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<Field>,
}

impl Record {
    /// Create a new record
    ///
    /// Optional values that are `None` or empty are left unset.
    pub fn new(
        name: &str,
        birthday: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> RolodexResult<Self> {
        Ok(Self {
            name: Field::name(name)?,
            phones: Vec::new(),
            birthday: non_empty(birthday).map(Field::birthday).transpose()?,
            email: non_empty(email).map(Field::email).transpose()?,
            address: non_empty(address).map(Field::address).transpose()?,
        })
    }

    /// Create a record with only a name
    pub fn with_name(name: &str) -> RolodexResult<Self> {
        Self::new(name, None, None, None)
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn phones(&self) -> &[Field] {
        &self.phones
    }

    pub fn email(&self) -> Option<&Field> {
        self.email.as_ref()
    }

    pub fn birthday(&self) -> Option<&Field> {
        self.birthday.as_ref()
    }

    pub fn address(&self) -> Option<&Field> {
        self.address.as_ref()
    }

    /// Phone values in insertion order
    pub fn phones_list(&self) -> Vec<&str> {
        self.phones.iter().map(Field::value).collect()
    }

    /// Find a phone by exact value
    pub fn find_phone(&self, phone: &str) -> Option<&Field> {
        self.phones.iter().find(|p| *p == phone)
    }

    /// Add a phone; an equal phone already on the record is ignored
    pub fn add_phone(&mut self, raw: &str) -> RolodexResult<()> {
        let phone = Field::phone(raw)?;
        if self.find_phone(raw).is_none() {
            self.phones.push(phone);
        }
        Ok(())
    }

    /// Remove the first phone with the given value
    pub fn remove_phone(&mut self, phone: &str) -> RolodexResult<()> {
        let index = self
            .phones
            .iter()
            .position(|p| p == phone)
            .ok_or_else(|| RolodexError::phone_not_found(phone))?;
        self.phones.remove(index);
        Ok(())
    }

    /// Replace `old` with `new`
    ///
    /// Nothing changes unless `old` exists and `new` is a valid phone.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> RolodexResult<()> {
        Field::phone(new)?;
        if self.find_phone(old).is_none() {
            return Err(RolodexError::phone_not_found(old));
        }
        self.remove_phone(old)?;
        self.add_phone(new)
    }

    /// Set the email; fails if one is already set
    pub fn add_email(&mut self, raw: &str) -> RolodexResult<()> {
        if self.email.is_some() {
            return Err(RolodexError::Validation(
                "Email already exists for this contact".into(),
            ));
        }
        self.email = Some(Field::email(raw)?);
        Ok(())
    }

    pub fn remove_email(&mut self) {
        self.email = None;
    }

    /// Set the address; fails if one is already set
    pub fn add_address(&mut self, raw: &str) -> RolodexResult<()> {
        if self.address.is_some() {
            return Err(RolodexError::Validation(
                "Address already exists for this contact".into(),
            ));
        }
        self.address = Some(Field::address(raw)?);
        Ok(())
    }

    pub fn remove_address(&mut self) {
        self.address = None;
    }

    /// Set or overwrite the birthday
    pub fn set_birthday(&mut self, raw: &str) -> RolodexResult<()> {
        self.birthday = Some(Field::birthday(raw)?);
        Ok(())
    }

    /// Days from today (local clock) until the next birthday
    pub fn days_to_birthday(&self) -> Option<i64> {
        self.days_to_birthday_from(Local::now().date_naive())
    }

    /// Days from `today` until the next occurrence of the birthday
    ///
    /// Returns 0 when the birthday is today. A 29 February birthday falls on
    /// 28 February in non-leap years.
    pub fn days_to_birthday_from(&self, today: NaiveDate) -> Option<i64> {
        let birthday = self.birthday.as_ref()?.as_date()?;

        let mut next = anniversary(birthday, today.year())?;
        if next < today {
            next = anniversary(birthday, today.year() + 1)?;
        }
        Some((next - today).num_days())
    }

    /// Structural check for records read from disk
    pub fn validate(&self) -> RolodexResult<()> {
        let invalid = |what: &str| {
            RolodexError::Validation(format!("Contact \"{}\" has an invalid {}", self.name, what))
        };

        if !self.name.is_valid_as(FieldKind::Name) {
            return Err(invalid("name"));
        }

        let mut seen = HashSet::new();
        for phone in &self.phones {
            if !phone.is_valid_as(FieldKind::Phone) || !seen.insert(phone.value()) {
                return Err(invalid("phone"));
            }
        }

        let optional = [
            (&self.email, FieldKind::Email, "email"),
            (&self.birthday, FieldKind::Birthday, "birthday"),
            (&self.address, FieldKind::Address, "address"),
        ];
        for (field, kind, what) in optional {
            if let Some(field) = field {
                if !field.is_valid_as(kind) {
                    return Err(invalid(what));
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contact name: {}; phones: {}",
            self.name,
            self.phones_list().join(", ")
        )?;
        if let Some(email) = &self.email {
            write!(f, "; email: {}", email)?;
        }
        if let Some(days) = self.days_to_birthday() {
            write!(f, "; days to birthday: {}", days)?;
        }
        if let Some(address) = &self.address {
            write!(f, "; address: {}", address)?;
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn anniversary(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}
