//! Validated contact fields
//!
//! A [`Field`] wraps a single string value together with its [`FieldKind`].
//! Every kind has a predicate in a fixed validator table; values are checked
//! on construction and on every mutation.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RolodexError, RolodexResult};

/// Birthday format (day.month.4-digit-year)
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

/// Required number of digits in a phone number
pub const PHONE_DIGITS: usize = 10;

// Left-anchored only: trailing text after the last dot segment is accepted.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("Failed to compile email regex"));

/// The kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Name,
    Phone,
    Email,
    Birthday,
    Address,
}

impl FieldKind {
    /// Check a raw value against this kind's format rule
    pub fn validate(self, raw: &str) -> RolodexResult<()> {
        validator(self)(raw).map_err(RolodexError::Validation)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "Name"),
            Self::Phone => write!(f, "Phone"),
            Self::Email => write!(f, "Email"),
            Self::Birthday => write!(f, "Birthday"),
            Self::Address => write!(f, "Address"),
        }
    }
}

type Validator = fn(&str) -> Result<(), String>;

fn validator(kind: FieldKind) -> Validator {
    match kind {
        FieldKind::Name => validate_name,
        FieldKind::Phone => validate_phone,
        FieldKind::Email => validate_email,
        FieldKind::Birthday => validate_birthday,
        FieldKind::Address => accept_any,
    }
}

fn accept_any(_: &str) -> Result<(), String> {
    Ok(())
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Contact name cannot be empty".to_string());
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!(
            "Invalid phone number \"{}\"! Must contain {} digits only",
            phone, PHONE_DIGITS
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), String> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(format!("Invalid email address \"{}\"", email));
    }
    Ok(())
}

fn validate_birthday(birthday: &str) -> Result<(), String> {
    parse_birthday(birthday).map(|_| ()).ok_or_else(|| {
        format!(
            "Invalid birthday \"{}\". Expected format dd.mm.yyyy",
            birthday
        )
    })
}

/// Parse a `dd.mm.yyyy` string into a calendar date
///
/// Day and month may be one or two digits; the year must be exactly four.
pub fn parse_birthday(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('.').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let is_digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !is_digits(*day, 1, 2) || !is_digits(*month, 1, 2) || !is_digits(*year, 4, 4) {
        return None;
    }

    NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT).ok()
}

/// A validated scalar value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    kind: FieldKind,
    value: String,
}

impl Field {
    /// Create a field, failing if the value does not satisfy the kind's rule
    pub fn new(kind: FieldKind, raw: impl Into<String>) -> RolodexResult<Self> {
        let value = raw.into();
        kind.validate(&value)?;
        Ok(Self { kind, value })
    }

    pub fn name(raw: impl Into<String>) -> RolodexResult<Self> {
        Self::new(FieldKind::Name, raw)
    }

    pub fn phone(raw: impl Into<String>) -> RolodexResult<Self> {
        Self::new(FieldKind::Phone, raw)
    }

    pub fn email(raw: impl Into<String>) -> RolodexResult<Self> {
        Self::new(FieldKind::Email, raw)
    }

    pub fn birthday(raw: impl Into<String>) -> RolodexResult<Self> {
        Self::new(FieldKind::Birthday, raw)
    }

    pub fn address(raw: impl Into<String>) -> RolodexResult<Self> {
        Self::new(FieldKind::Address, raw)
    }

    /// The kind of this field
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The wrapped value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, re-validating first
    ///
    /// On failure the previous value is kept.
    pub fn set(&mut self, raw: impl Into<String>) -> RolodexResult<()> {
        let value = raw.into();
        self.kind.validate(&value)?;
        self.value = value;
        Ok(())
    }

    /// Re-check the stored value (fields read from disk skip `new`)
    pub fn is_valid(&self) -> bool {
        self.kind.validate(&self.value).is_ok()
    }

    /// Check that this field has the given kind and a valid value
    pub fn is_valid_as(&self, kind: FieldKind) -> bool {
        self.kind == kind && self.is_valid()
    }

    /// Parsed date for birthday fields
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self.kind {
            FieldKind::Birthday => parse_birthday(&self.value),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl PartialEq<str> for Field {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Field {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_ten_digits() {
        let phone = Field::phone("0501234567").unwrap();
        assert_eq!(phone.value(), "0501234567");
        assert_eq!(phone.kind(), FieldKind::Phone);
    }

    #[test]
    fn test_phone_rejects_everything_else() {
        for raw in [
            "",
            "123456789",
            "12345678901",
            "12345abcde",
            "+380501234",
            "050 123 45",
            "١٢٣٤٥٦٧٨٩٠",
        ] {
            let err = Field::phone(raw).unwrap_err();
            assert!(err.is_validation(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_phone_error_names_value() {
        let err = Field::phone("12ab").unwrap_err();
        assert!(err.to_string().contains("\"12ab\""));
    }

    #[test]
    fn test_email_pattern() {
        assert!(Field::email("user@example.com").is_ok());
        assert!(Field::email("a.b@mail.co.uk").is_ok());
        // Right side is unanchored
        assert!(Field::email("user@example.com trailing").is_ok());

        assert!(Field::email("userexample.com").is_err());
        assert!(Field::email("user@examplecom").is_err());
        assert!(Field::email("@example.com").is_err());
        assert!(Field::email("user@@example.com").is_err());
    }

    #[test]
    fn test_birthday_valid_dates() {
        assert!(Field::birthday("01.01.2000").is_ok());
        assert!(Field::birthday("29.02.2024").is_ok());
        assert!(Field::birthday("1.2.1990").is_ok());
        assert_eq!(
            Field::birthday("15.06.1985").unwrap().as_date(),
            NaiveDate::from_ymd_opt(1985, 6, 15)
        );
    }

    #[test]
    fn test_birthday_invalid_dates() {
        assert!(Field::birthday("31.02.2024").is_err());
        assert!(Field::birthday("29.02.2023").is_err());
        assert!(Field::birthday("2024-01-15").is_err());
        assert!(Field::birthday("15.01.24").is_err());
        assert!(Field::birthday("15.01.02024").is_err());
        assert!(Field::birthday("15.13.2024").is_err());
        assert!(Field::birthday("").is_err());
    }

    #[test]
    fn test_name_and_address() {
        assert!(Field::name("Alice").is_ok());
        assert!(Field::name("   ").is_err());
        assert!(Field::address("").is_ok());
        assert!(Field::address("Kyiv, Main st. 1").is_ok());
    }

    #[test]
    fn test_set_revalidates_and_keeps_old_value() {
        let mut phone = Field::phone("1111111111").unwrap();
        assert!(phone.set("bad").is_err());
        assert_eq!(phone.value(), "1111111111");

        phone.set("2222222222").unwrap();
        assert_eq!(phone.value(), "2222222222");
    }

    #[test]
    fn test_equality_and_display_delegate_to_value() {
        let phone = Field::phone("1234567890").unwrap();
        assert!(phone == "1234567890");
        assert_eq!(phone.to_string(), "1234567890");
        assert_ne!(Field::address("1234567890").unwrap(), phone);
    }

    #[test]
    fn test_deserialized_field_is_rechecked() {
        let field: Field = serde_json::from_str(r#"{"kind":"phone","value":"nope"}"#).unwrap();
        assert!(!field.is_valid());

        let field: Field =
            serde_json::from_str(r#"{"kind":"phone","value":"1234567890"}"#).unwrap();
        assert!(field.is_valid_as(FieldKind::Phone));
        assert!(!field.is_valid_as(FieldKind::Name));
    }
}
