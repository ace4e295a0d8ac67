//! Birthday reminder
//!
//! Finds contacts whose next birthday is exactly N days away.

use chrono::{Local, NaiveDate};

use crate::models::Record;
use crate::storage::AddressBook;

/// Contacts whose next birthday is exactly `days_ahead` days after `today`
pub fn upcoming_birthdays(
    book: &AddressBook,
    days_ahead: i64,
    today: NaiveDate,
) -> Vec<&Record> {
    book.records()
        .filter(|record| record.days_to_birthday_from(today) == Some(days_ahead))
        .collect()
}

/// Congratulation message for birthdays `days_ahead` days from now
pub fn congratulate(book: &AddressBook, days_ahead: i64) -> String {
    congratulate_on(book, days_ahead, Local::now().date_naive())
}

/// Congratulation message relative to a fixed date
pub fn congratulate_on(book: &AddressBook, days_ahead: i64, today: NaiveDate) -> String {
    let records = upcoming_birthdays(book, days_ahead, today);
    if records.is_empty() {
        return format!("No contacts have birthdays in {} days", days_ahead);
    }

    let mut message = format!(
        "Congratulations to the following contacts, whose birthday is in {} days:\n",
        days_ahead
    );
    for record in records {
        if let Some(birthday) = record.birthday() {
            message.push_str(&format!("{} - Birthday: {}\n", record.name(), birthday));
        }
    }
    message
}
