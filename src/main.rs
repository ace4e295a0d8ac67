use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rolodex::cli::{handle_contact_command, ContactCommands, ContactSession};
use rolodex::config::{LoadRecovery, RolodexPaths, Settings};
use rolodex::error::RolodexError;
use rolodex::services::congratulate;
use rolodex::storage::{open_address_book, AddressBook};
use rolodex::view::ConsoleView;

#[derive(Parser)]
#[command(
    name = "rolodex",
    author = "Kaylee Beyene",
    version,
    about = "Terminal address book with birthday reminders",
    long_about = "Rolodex keeps your contacts (phones, email, birthday and postal \
                  address) in a local JSON file. Run it without a command for the \
                  interactive menu, or use the subcommands for one-shot edits."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu session (the default)
    #[command(alias = "menu")]
    Interactive,

    /// Contact management commands
    #[command(subcommand)]
    Contact(ContactCommands),

    /// List contacts whose birthday is exactly DAYS days from today
    Birthdays {
        /// Number of days ahead (0 for today)
        days: u32,
    },

    /// Show current configuration and paths, optionally changing settings
    Config {
        /// Contacts per page when listing
        #[arg(long)]
        page_size: Option<usize>,
        /// What to do with invalid contacts on load
        #[arg(long, value_enum)]
        load_recovery: Option<LoadRecovery>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = RolodexPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Config {
            page_size,
            load_recovery,
        }) => {
            if page_size.is_some() || load_recovery.is_some() {
                update_settings(&mut settings, page_size, load_recovery)?;
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }
            print_config(&paths, &settings);
        }
        Some(Commands::Contact(cmd)) => {
            let mut book = open_book(&paths, &settings)?;
            handle_contact_command(&mut book, &settings, cmd)?;
        }
        Some(Commands::Birthdays { days }) => {
            let book = open_book(&paths, &settings)?;
            println!("{}", congratulate(&book, i64::from(days)));
        }
        Some(Commands::Interactive) | None => {
            let mut book = open_book(&paths, &settings)?;
            let mut view = ConsoleView::stdio();
            ContactSession::new(&mut book, &mut view, settings.page_size).run()?;
        }
    }

    Ok(())
}

/// Load the address book, warning on stderr about anything lost
fn open_book(paths: &RolodexPaths, settings: &Settings) -> Result<AddressBook> {
    let (book, report) = open_address_book(paths, settings)?;
    if report.has_losses() {
        eprintln!("{}", report.summary());
    }
    info!(contacts = report.loaded, "Address book ready");
    Ok(book)
}

fn update_settings(
    settings: &mut Settings,
    page_size: Option<usize>,
    load_recovery: Option<LoadRecovery>,
) -> Result<(), RolodexError> {
    if let Some(size) = page_size {
        if size == 0 {
            return Err(RolodexError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }
        settings.page_size = size;
    }

    if let Some(recovery) = load_recovery {
        settings.load_recovery = recovery;
    }

    Ok(())
}

fn print_config(paths: &RolodexPaths, settings: &Settings) {
    println!("Rolodex Configuration");
    println!("=====================");
    println!("Base directory:    {}", paths.base_dir().display());
    println!("Settings file:     {}", paths.settings_file().display());
    println!("Address book file: {}", paths.address_book_file().display());
    println!();
    println!("Settings:");
    println!("  Page size:     {}", settings.page_size);
    println!("  Load recovery: {:?}", settings.load_recovery);
}
