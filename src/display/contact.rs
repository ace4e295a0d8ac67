//! Contact display formatting
//!
//! Formats contacts for terminal output in table and detail views.

use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Field, Record};

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "No")]
    number: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phones")]
    phones: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Birthday")]
    birthday: String,
    #[tabled(rename = "Address")]
    address: String,
}

fn field_text(field: Option<&Field>) -> String {
    field.map(|f| f.value().to_string()).unwrap_or_default()
}

fn birthday_text(record: &Record) -> String {
    match (record.birthday(), record.days_to_birthday()) {
        (Some(birthday), Some(days)) => format!("{} ({} days left)", birthday, days),
        (Some(birthday), None) => birthday.to_string(),
        _ => String::new(),
    }
}

/// Format a page of contacts as a table
///
/// Rows are numbered from `first_number`.
pub fn format_contact_list(records: &[&Record], first_number: usize) -> String {
    if records.is_empty() {
        return "No contacts found.".to_string();
    }

    let rows = records.iter().enumerate().map(|(i, record)| ContactRow {
        number: first_number + i,
        name: record.name().to_string(),
        phones: record.phones_list().join(", "),
        email: field_text(record.email()),
        birthday: birthday_text(record),
        address: field_text(record.address()),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a single contact's details
pub fn format_contact_details(record: &Record) -> String {
    let mut builder = Builder::default();
    builder.push_record([String::from("Name"), record.name().to_string()]);
    builder.push_record([String::from("Phones"), record.phones_list().join(", ")]);

    if let Some(email) = record.email() {
        builder.push_record([String::from("Email"), email.to_string()]);
    }
    if record.birthday().is_some() {
        builder.push_record([String::from("Birthday"), birthday_text(record)]);
    }
    if let Some(address) = record.address() {
        builder.push_record([String::from("Address"), address.to_string()]);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Format search results
pub fn format_search_results(query: &str, records: &[&Record]) -> String {
    if records.is_empty() {
        return format!("No contacts found for the request \"{}\"", query);
    }
    format!(
        "Found contacts:\n{}",
        format_contact_list(records, 1)
    )
}
