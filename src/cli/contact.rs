//! Contact CLI commands
//!
//! Implements the one-shot contact commands. Every command that changes the
//! address book saves it before returning.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_contact_details, format_contact_list, format_search_results};
use crate::error::{RolodexError, RolodexResult};
use crate::services::{ContactService, CreateContactInput};
use crate::storage::AddressBook;

/// Contact subcommands
#[derive(Subcommand)]
pub enum ContactCommands {
    /// Add a new contact
    Add {
        /// Contact name
        name: String,
        /// Phone number (10 digits), may be repeated
        #[arg(short, long = "phone")]
        phones: Vec<String>,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Birthday (dd.mm.yyyy)
        #[arg(short, long)]
        birthday: Option<String>,
        /// Postal address
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Delete a contact
    Delete {
        /// Contact name
        name: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Show contact details
    Show {
        /// Contact name
        name: String,
    },
    /// Search contacts by name or phone fragment
    Search {
        /// Search text
        query: String,
    },
    /// List contacts a page at a time
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Contacts per page (defaults to the configured page size)
        #[arg(short = 's', long)]
        page_size: Option<usize>,
    },
    /// Manage a contact's phone numbers
    #[command(subcommand)]
    Phone(PhoneCommands),
    /// Manage a contact's email address
    #[command(subcommand)]
    Email(EmailCommands),
    /// Manage a contact's postal address
    #[command(subcommand)]
    Address(AddressCommands),
    /// Set a contact's birthday
    Birthday {
        /// Contact name
        name: String,
        /// Birthday (dd.mm.yyyy)
        birthday: String,
    },
}

/// Phone subcommands
#[derive(Subcommand)]
pub enum PhoneCommands {
    /// Add a phone number
    Add { name: String, phone: String },
    /// Remove a phone number
    Remove { name: String, phone: String },
    /// Replace one phone number with another
    Edit {
        name: String,
        old: String,
        new: String,
    },
}

/// Email subcommands
#[derive(Subcommand)]
pub enum EmailCommands {
    /// Set or replace the email address
    Set { name: String, email: String },
    /// Remove the email address
    Clear { name: String },
}

/// Address subcommands
#[derive(Subcommand)]
pub enum AddressCommands {
    /// Set or replace the postal address
    Set { name: String, address: String },
    /// Remove the postal address
    Clear { name: String },
}

/// Handle a contact command
pub fn handle_contact_command(
    book: &mut AddressBook,
    settings: &Settings,
    cmd: ContactCommands,
) -> RolodexResult<()> {
    match cmd {
        ContactCommands::Add {
            name,
            phones,
            email,
            birthday,
            address,
        } => {
            let input = CreateContactInput {
                name,
                phones,
                email,
                birthday,
                address,
            };
            let mut service = ContactService::new(book);
            let record = service.create(input)?;
            println!("Contact added: {}", record);
        }

        ContactCommands::Delete { name, force } => {
            let mut service = ContactService::new(book);
            let record = service.get(&name)?;

            if !force {
                println!("About to delete contact: {}", record.name());
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(&name)?;
            println!("Deleted contact: {}", name);
        }

        ContactCommands::Show { name } => {
            let service = ContactService::new(book);
            println!("{}", format_contact_details(service.get(&name)?));
            return Ok(());
        }

        ContactCommands::Search { query } => {
            let found = book.search_full(&query);
            println!("{}", format_search_results(&query, &found));
            return Ok(());
        }

        ContactCommands::List { page, page_size } => {
            if page == 0 {
                return Err(RolodexError::Validation(
                    "Page numbers start at 1".to_string(),
                ));
            }
            let page_size = page_size.unwrap_or(settings.page_size).max(1);

            if book.is_empty() {
                println!("The address book is empty.");
                return Ok(());
            }

            let total_pages = book.len().div_ceil(page_size);
            match book.pages(page_size).nth(page - 1) {
                Some(records) => {
                    let first_number = (page - 1) * page_size + 1;
                    println!("{}", format_contact_list(&records, first_number));
                    println!("\nPage {} of {}", page, total_pages);
                }
                None => println!("Page {} is past the end ({} pages)", page, total_pages),
            }
            return Ok(());
        }

        ContactCommands::Phone(cmd) => handle_phone_command(book, cmd)?,

        ContactCommands::Email(cmd) => {
            let mut service = ContactService::new(book);
            match cmd {
                EmailCommands::Set { name, email } => {
                    let record = service.set_email(&name, &email)?;
                    println!("Email updated: {}", record);
                }
                EmailCommands::Clear { name } => {
                    let record = service.clear_email(&name)?;
                    println!("Email removed: {}", record);
                }
            }
        }

        ContactCommands::Address(cmd) => {
            let mut service = ContactService::new(book);
            match cmd {
                AddressCommands::Set { name, address } => {
                    let record = service.set_address(&name, &address)?;
                    println!("Address updated: {}", record);
                }
                AddressCommands::Clear { name } => {
                    let record = service.clear_address(&name)?;
                    println!("Address removed: {}", record);
                }
            }
        }

        ContactCommands::Birthday { name, birthday } => {
            let mut service = ContactService::new(book);
            let record = service.set_birthday(&name, &birthday)?;
            println!("Birthday updated: {}", record);
        }
    }

    book.save()
}

fn handle_phone_command(book: &mut AddressBook, cmd: PhoneCommands) -> RolodexResult<()> {
    let mut service = ContactService::new(book);

    match cmd {
        PhoneCommands::Add { name, phone } => {
            let record = service.add_phone(&name, &phone)?;
            println!("Phone added: {}", record);
        }
        PhoneCommands::Remove { name, phone } => {
            let record = service.remove_phone(&name, &phone)?;
            println!("Phone removed: {}", record);
        }
        PhoneCommands::Edit { name, old, new } => {
            let record = service.edit_phone(&name, &old, &new)?;
            println!("Phone changed: {}", record);
        }
    }

    Ok(())
}
