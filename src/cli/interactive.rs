//! Interactive contact manager
//!
//! Menu-driven session over a [`View`]. Every handler returns a message or
//! an error; errors are shown to the user and the loop continues. The book
//! is saved when the session ends.

use tracing::debug;

use crate::display::{format_contact_details, format_contact_list, format_search_results};
use crate::error::{RolodexError, RolodexResult};
use crate::models::FieldKind;
use crate::services::{congratulate, ContactService, CreateContactInput};
use crate::storage::AddressBook;
use crate::view::View;

const TITLE: &str = "Contact Manager";

const MENU: &[(&str, &str)] = &[
    ("1", "Add contact"),
    ("2", "Delete contact"),
    ("3", "Show contact"),
    ("4", "Search contacts"),
    ("5", "Show all contacts"),
    ("6", "Edit phone"),
    ("7", "Birthday reminder"),
    ("0", "Save and exit"),
];

/// An interactive session over one address book
pub struct ContactSession<'a, V: View> {
    book: &'a mut AddressBook,
    view: &'a mut V,
    page_size: usize,
}

impl<'a, V: View> ContactSession<'a, V> {
    pub fn new(book: &'a mut AddressBook, view: &'a mut V, page_size: usize) -> Self {
        Self {
            book,
            view,
            page_size,
        }
    }

    /// Run the menu loop until the user exits or input ends, then save
    pub fn run(&mut self) -> RolodexResult<()> {
        loop {
            let choice = match self.view.menu(TITLE, MENU) {
                Ok(choice) => choice,
                Err(RolodexError::Io(e)) => {
                    debug!(error = %e, "Input closed, ending session");
                    break;
                }
                Err(e) => return Err(e),
            };

            if choice == "0" {
                break;
            }

            match self.dispatch(&choice) {
                Ok(message) if message.is_empty() => {}
                Ok(message) => self.view.display(&message),
                Err(RolodexError::Io(e)) => {
                    debug!(error = %e, "Input closed, ending session");
                    break;
                }
                Err(e) => self.view.display_error(&e.to_string()),
            }
        }

        self.book.save()?;
        self.view.display("Address book saved. Good bye!");
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> RolodexResult<String> {
        match choice {
            "1" => self.add_contact(),
            "2" => self.delete_contact(),
            "3" => self.show_contact(),
            "4" => self.search_contacts(),
            "5" => self.show_all(),
            "6" => self.edit_phone(),
            "7" => self.birthday_reminder(),
            _ => Ok("Invalid choice. Please select a valid option.".to_string()),
        }
    }

    /// Ask for a value until it is valid; empty input means "skip"
    fn prompt_optional(&mut self, text: &str, kind: FieldKind) -> RolodexResult<Option<String>> {
        loop {
            let raw = self.view.prompt(text)?;
            if raw.is_empty() {
                return Ok(None);
            }
            match kind.validate(&raw) {
                Ok(()) => return Ok(Some(raw)),
                Err(e) => self.view.display_error(&e.to_string()),
            }
        }
    }

    /// Ask for a value until it is valid and non-empty
    fn prompt_required(&mut self, text: &str, kind: FieldKind) -> RolodexResult<String> {
        loop {
            if let Some(value) = self.prompt_optional(text, kind)? {
                return Ok(value);
            }
            self.view.display_error(&format!("{} is required", kind));
        }
    }

    fn add_contact(&mut self) -> RolodexResult<String> {
        let name = self.prompt_required("Name: ", FieldKind::Name)?;
        if self.book.find(&name).is_some() {
            return Err(RolodexError::duplicate_contact(name));
        }

        let mut phones = Vec::new();
        let phone_prompt = "Phone (10 digits, empty to skip): ";
        while let Some(phone) = self.prompt_optional(phone_prompt, FieldKind::Phone)? {
            phones.push(phone);
            if !self.view.confirm("Do you want to add another phone?")? {
                break;
            }
        }

        let input = CreateContactInput {
            name,
            phones,
            email: self.prompt_optional("Email: ", FieldKind::Email)?,
            birthday: self.prompt_optional("Birthday (dd.mm.yyyy): ", FieldKind::Birthday)?,
            address: self.prompt_optional("Address: ", FieldKind::Address)?,
        };

        let mut service = ContactService::new(self.book);
        let record = service.create(input)?;
        Ok(format!("Contact added: {}", record))
    }

    fn delete_contact(&mut self) -> RolodexResult<String> {
        let name = self.view.prompt("Contact name: ")?;
        if self.book.find(&name).is_none() {
            return Ok(format!("Contact \"{}\" not found", name));
        }
        if !self.view.confirm(&format!("Delete contact \"{}\"?", name))? {
            return Ok("Deletion cancelled".to_string());
        }

        ContactService::new(self.book).delete(&name)?;
        Ok(format!("Contact \"{}\" deleted successfully", name))
    }

    fn show_contact(&mut self) -> RolodexResult<String> {
        let name = self.view.prompt("Contact name: ")?;
        let service = ContactService::new(self.book);
        Ok(format_contact_details(service.get(&name)?))
    }

    fn search_contacts(&mut self) -> RolodexResult<String> {
        let query = self.view.prompt("Search: ")?;
        let records = self.book.search_full(&query);
        Ok(format_search_results(&query, &records))
    }

    fn show_all(&mut self) -> RolodexResult<String> {
        if self.book.is_empty() {
            return Ok("No contacts found.".to_string());
        }

        let total = self.book.len();
        let mut shown = 0;
        for page in self.book.pages(self.page_size) {
            self.view.display(&format_contact_list(&page, shown + 1));
            shown += page.len();
            if shown < total && !self.view.confirm("Show next page?")? {
                break;
            }
        }
        Ok(String::new())
    }

    fn edit_phone(&mut self) -> RolodexResult<String> {
        let name = self.view.prompt("Contact name: ")?;
        let phones = ContactService::new(self.book).get(&name)?.phones_list().join(", ");
        self.view.display(&format!("Current phones: {}", phones));

        let old = self.view.prompt("Phone to replace: ")?;
        let new = self.prompt_required("New phone: ", FieldKind::Phone)?;

        let mut service = ContactService::new(self.book);
        let record = service.edit_phone(&name, &old, &new)?;
        Ok(format!(
            "Phones for {} updated: {}",
            record.name(),
            record.phones_list().join(", ")
        ))
    }

    fn birthday_reminder(&mut self) -> RolodexResult<String> {
        let raw = self.view.prompt("Days from today: ")?;
        let days: i64 = raw.parse().map_err(|_| {
            RolodexError::Validation(format!(
                "\"{}\" is not a number of days. Enter a whole number",
                raw
            ))
        })?;
        Ok(congratulate(self.book, days))
    }
}
