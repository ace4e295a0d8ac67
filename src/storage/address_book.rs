//! Address book repository
//!
//! A name-keyed, key-ordered collection of contact records persisted to
//! `address_book.json`. Loading validates every stored contact before any
//! of them enter the book.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::settings::LoadRecovery;
use crate::error::{RolodexError, RolodexResult};
use crate::models::Record;

use super::file_io::{ensure_writable, quarantine, read_json, write_json_atomic};

const SCHEMA_VERSION: u32 = 1;

/// On-disk layout, read side
///
/// Contacts stay as raw JSON so a single malformed entry can be reported
/// without failing the whole file.
#[derive(Debug, Default, Deserialize)]
struct StoredBook {
    #[serde(default)]
    #[allow(dead_code)]
    schema_version: u32,
    #[serde(default)]
    contacts: BTreeMap<String, serde_json::Value>,
}

/// On-disk layout, write side
#[derive(Serialize)]
struct StoredBookRef<'a> {
    schema_version: u32,
    contacts: &'a BTreeMap<String, Record>,
}

/// Outcome of [`AddressBook::load`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of contacts now in the book
    pub loaded: usize,
    /// Names of stored contacts that failed validation
    pub dropped: Vec<String>,
    /// Whether stored data was discarded wholesale
    pub wiped: bool,
    /// Copy of the damaged file, if one was made
    pub quarantined: Option<PathBuf>,
}

impl LoadReport {
    /// Whether any stored data was discarded
    pub fn has_losses(&self) -> bool {
        self.wiped || !self.dropped.is_empty()
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let mut summary = if self.wiped {
            "Address book file was damaged; starting with an empty book".to_string()
        } else {
            format!("Loaded {} contact(s)", self.loaded)
        };
        if !self.dropped.is_empty() {
            summary.push_str(&format!(
                "; invalid contacts: {}",
                self.dropped.join(", ")
            ));
        }
        match &self.quarantined {
            Some(path) => {
                summary.push_str(&format!("; original saved to {}", path.display()));
            }
            None if self.has_losses() => {
                summary.push_str("; no copy of the original could be kept");
            }
            None => {}
        }
        if self.has_losses() {
            summary.push_str("; the file on disk is replaced on the next save");
        }
        summary
    }
}

/// The address book
#[derive(Debug)]
pub struct AddressBook {
    path: PathBuf,
    recovery: LoadRecovery,
    records: BTreeMap<String, Record>,
}

impl AddressBook {
    /// Create an empty address book backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            recovery: LoadRecovery::default(),
            records: BTreeMap::new(),
        }
    }

    /// Set the recovery policy used by [`load`](Self::load)
    pub fn with_recovery(mut self, recovery: LoadRecovery) -> Self {
        self.recovery = recovery;
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a record; fails if a contact with the same name exists
    pub fn add_record(&mut self, record: Record) -> RolodexResult<()> {
        if self.records.contains_key(record.name()) {
            return Err(RolodexError::duplicate_contact(record.name()));
        }
        debug!(contact = record.name(), "Adding contact");
        self.records.insert(record.name().to_string(), record);
        Ok(())
    }

    /// Exact, case-sensitive lookup
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// Mutable lookup for editing a record in place
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    /// Remove a contact; returns whether it existed
    pub fn delete(&mut self, name: &str) -> bool {
        let removed = self.records.remove(name).is_some();
        if removed {
            debug!(contact = name, "Deleted contact");
        }
        removed
    }

    /// Case-insensitive substring search over names and phone numbers
    pub fn search_full(&self, query: &str) -> Vec<&Record> {
        let query = query.trim().to_lowercase();
        self.records
            .values()
            .filter(|record| {
                record.name().to_lowercase().contains(&query)
                    || record.phones_list().join(" ").contains(&query)
            })
            .collect()
    }

    /// Iterate over the book in pages of `page_size` records (key order)
    ///
    /// A `page_size` of 0 is treated as 1.
    pub fn pages(&self, page_size: usize) -> Pages<'_> {
        Pages {
            records: &self.records,
            page_size: page_size.max(1),
            after: None,
        }
    }

    /// All records in key order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the whole book to disk
    pub fn save(&self) -> RolodexResult<()> {
        if let Some(dir) = self.path.parent() {
            ensure_writable(dir)?;
        }

        let stored = StoredBookRef {
            schema_version: SCHEMA_VERSION,
            contacts: &self.records,
        };
        write_json_atomic(&self.path, &stored)?;

        info!(
            path = %self.path.display(),
            contacts = self.records.len(),
            "Saved address book"
        );
        Ok(())
    }

    /// Replace the book's contents with the stored data
    ///
    /// A missing file yields an empty book. Invalid contacts are handled
    /// according to the recovery policy; whenever stored data is discarded
    /// the file is first copied aside.
    pub fn load(&mut self) -> RolodexResult<LoadReport> {
        self.records.clear();

        if !self.path.exists() {
            debug!(path = %self.path.display(), "No address book file, starting empty");
            return Ok(LoadReport::default());
        }

        let stored: StoredBook = match read_json(&self.path) {
            Ok(stored) => stored,
            Err(RolodexError::Json(e)) => {
                warn!(error = %e, "Address book file is not valid JSON");
                return Ok(LoadReport {
                    wiped: true,
                    quarantined: self.set_aside(),
                    ..LoadReport::default()
                });
            }
            Err(e) => return Err(e),
        };

        let mut valid = Vec::with_capacity(stored.contacts.len());
        let mut dropped = Vec::new();
        for (key, value) in stored.contacts {
            match decode_contact(&key, value) {
                Ok(record) => valid.push(record),
                Err(e) => {
                    warn!(contact = %key, error = %e, "Invalid contact in address book file");
                    dropped.push(key);
                }
            }
        }

        let mut report = LoadReport {
            dropped,
            ..LoadReport::default()
        };

        if !report.dropped.is_empty() {
            report.quarantined = self.set_aside();
            if self.recovery == LoadRecovery::Wipe {
                warn!(
                    invalid = report.dropped.len(),
                    "Discarding the whole address book"
                );
                report.wiped = true;
                return Ok(report);
            }
        }

        for record in valid {
            self.add_record(record)?;
        }
        report.loaded = self.records.len();

        info!(
            path = %self.path.display(),
            contacts = report.loaded,
            "Loaded address book"
        );
        Ok(report)
    }

    /// Copy the damaged file aside; failure to do so does not stop the load
    fn set_aside(&self) -> Option<PathBuf> {
        match quarantine(&self.path) {
            Ok(copy) => Some(copy),
            Err(e) => {
                warn!(error = %e, "Could not keep a copy of the damaged address book");
                None
            }
        }
    }
}

fn decode_contact(key: &str, value: serde_json::Value) -> RolodexResult<Record> {
    let record: Record = serde_json::from_value(value)?;
    record.validate()?;
    if record.name() != key {
        return Err(RolodexError::Validation(format!(
            "Contact stored under \"{}\" is named \"{}\"",
            key,
            record.name()
        )));
    }
    Ok(record)
}

/// Lazy page iterator returned by [`AddressBook::pages`]
///
/// Each step resumes after the last key it yielded, so a new `Pages` always
/// starts from the current state of the book.
pub struct Pages<'a> {
    records: &'a BTreeMap<String, Record>,
    page_size: usize,
    after: Option<&'a str>,
}

impl<'a> Iterator for Pages<'a> {
    type Item = Vec<&'a Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let lower = match self.after {
            Some(key) => Bound::Excluded(key),
            None => Bound::Unbounded,
        };

        let chunk: Vec<(&'a String, &'a Record)> = self
            .records
            .range::<str, _>((lower, Bound::Unbounded))
            .take(self.page_size)
            .collect();

        let last_key: &'a String = chunk.last()?.0;
        self.after = Some(last_key.as_str());
        Some(chunk.into_iter().map(|(_, record)| record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_book() -> (TempDir, AddressBook) {
        let temp_dir = TempDir::new().unwrap();
        let book = AddressBook::new(temp_dir.path().join("address_book.json"));
        (temp_dir, book)
    }

    fn contact(name: &str, phones: &[&str]) -> Record {
        let mut record = Record::with_name(name).unwrap();
        for phone in phones {
            record.add_phone(phone).unwrap();
        }
        record
    }

    #[test]
    fn test_add_and_find() {
        let (_temp_dir, mut book) = create_test_book();
        book.add_record(contact("Alice", &["1111111111"])).unwrap();

        assert_eq!(book.find("Alice").unwrap().phones_list(), vec!["1111111111"]);
        assert!(book.find("alice").is_none());
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_duplicate_name_keeps_existing_record() {
        let (_temp_dir, mut book) = create_test_book();
        book.add_record(contact("Alice", &["1111111111"])).unwrap();

        let err = book
            .add_record(contact("Alice", &["2222222222"]))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(book.find("Alice").unwrap().phones_list(), vec!["1111111111"]);
    }

    #[test]
    fn test_delete_is_noop_when_missing() {
        let (_temp_dir, mut book) = create_test_book();
        book.add_record(contact("Alice", &[])).unwrap();

        assert!(!book.delete("Bob"));
        assert!(book.delete("Alice"));
        assert!(book.is_empty());
    }

    #[test]
    fn test_find_mut_edits_in_place() {
        let (_temp_dir, mut book) = create_test_book();
        book.add_record(contact("Alice", &["1111111111"])).unwrap();

        book.find_mut("Alice")
            .unwrap()
            .edit_phone("1111111111", "2222222222")
            .unwrap();
        assert_eq!(book.find("Alice").unwrap().phones_list(), vec!["2222222222"]);
    }

    #[test]
    fn test_search_full_is_case_insensitive() {
        let (_temp_dir, mut book) = create_test_book();
        book.add_record(contact("Alice Smith", &["1111111111"])).unwrap();
        book.add_record(contact("Bob Jones", &["2222222222"])).unwrap();

        let names = |records: Vec<&Record>| -> Vec<String> {
            records.iter().map(|r| r.name().to_string()).collect()
        };

        assert_eq!(names(book.search_full("smith")), vec!["Alice Smith"]);
        assert_eq!(names(book.search_full("SMITH")), vec!["Alice Smith"]);
        assert_eq!(names(book.search_full(" 2222 ")), vec!["Bob Jones"]);
        assert_eq!(book.search_full("o").len(), 1);
        assert!(book.search_full("carol").is_empty());
    }

    #[test]
    fn test_search_matches_across_phone_list() {
        let (_temp_dir, mut book) = create_test_book();
        book.add_record(contact("Alice", &["1111111111", "2222222222"]))
            .unwrap();

        assert_eq!(book.search_full("1111 2222").len(), 1);
    }

    #[test]
    fn test_pages_chunk_in_key_order() {
        let (_temp_dir, mut book) = create_test_book();
        for name in ["Eve", "Bob", "Dan", "Alice", "Carol"] {
            book.add_record(contact(name, &[])).unwrap();
        }

        let pages: Vec<Vec<&str>> = book
            .pages(2)
            .map(|page| page.iter().map(|r| r.name()).collect())
            .collect();

        assert_eq!(
            pages,
            vec![vec!["Alice", "Bob"], vec!["Carol", "Dan"], vec!["Eve"]]
        );
    }

    #[test]
    fn test_pages_restartable_and_empty() {
        let (_temp_dir, mut book) = create_test_book();
        assert_eq!(book.pages(10).count(), 0);

        for name in ["A", "B", "C"] {
            book.add_record(contact(name, &[])).unwrap();
        }
        assert_eq!(book.pages(10).count(), 1);
        assert_eq!(book.pages(10).count(), 1);
        assert_eq!(book.pages(0).count(), 3);
        assert_eq!(book.pages(1).nth(2).unwrap()[0].name(), "C");
    }

    fn three_contacts() -> Vec<Record> {
        let mut alice = Record::new("Alice", Some("01.02.1990"), None, None).unwrap();
        alice.add_phone("1111111111").unwrap();

        let mut bob = Record::new("Bob", None, Some("bob@example.com"), Some("Kyiv")).unwrap();
        bob.add_phone("2222222222").unwrap();
        bob.add_phone("3333333333").unwrap();

        let carol = Record::new("Carol", Some("29.02.2000"), Some("c@mail.org"), None).unwrap();

        vec![alice, bob, carol]
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, mut book) = create_test_book();
        for record in three_contacts() {
            book.add_record(record).unwrap();
        }
        book.save().unwrap();

        let mut reloaded = AddressBook::new(temp_dir.path().join("address_book.json"));
        let report = reloaded.load().unwrap();

        assert_eq!(report.loaded, 3);
        assert!(!report.has_losses());
        let originals: Vec<&Record> = book.records().collect();
        let loaded: Vec<&Record> = reloaded.records().collect();
        assert_eq!(originals, loaded);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_temp_dir, mut book) = create_test_book();
        let report = book.load().unwrap();
        assert!(book.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn test_load_replaces_current_contents() {
        let (_temp_dir, mut book) = create_test_book();
        book.add_record(contact("Alice", &[])).unwrap();
        book.save().unwrap();

        book.add_record(contact("Bob", &[])).unwrap();
        book.load().unwrap();
        assert_eq!(book.len(), 1);
        assert!(book.find("Bob").is_none());
    }

    fn write_with_one_bad_contact(path: &Path) {
        let json = r#"{
            "schema_version": 1,
            "contacts": {
                "Alice": {
                    "name": {"kind": "name", "value": "Alice"},
                    "phones": [{"kind": "phone", "value": "1111111111"}]
                },
                "Bob": {
                    "name": {"kind": "name", "value": "Bob"},
                    "phones": [{"kind": "phone", "value": "12-34"}]
                },
                "Carol": {
                    "name": {"kind": "name", "value": "Carol"}
                }
            }
        }"#;
        fs::write(path, json).unwrap();
    }

    #[test]
    fn test_load_with_invalid_contact_wipes_book() {
        let (temp_dir, mut book) = create_test_book();
        write_with_one_bad_contact(book.path());

        let report = book.load().unwrap();

        assert!(book.is_empty());
        assert!(report.wiped);
        assert_eq!(report.dropped, vec!["Bob"]);
        let copy = report.quarantined.unwrap();
        assert!(copy.starts_with(temp_dir.path()));
        assert!(copy.exists());
    }

    #[test]
    fn test_load_skip_invalid_keeps_valid_contacts() {
        let temp_dir = TempDir::new().unwrap();
        let mut book = AddressBook::new(temp_dir.path().join("address_book.json"))
            .with_recovery(LoadRecovery::SkipInvalid);
        write_with_one_bad_contact(book.path());

        let report = book.load().unwrap();

        assert!(!report.wiped);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.dropped, vec!["Bob"]);
        assert!(book.find("Alice").is_some());
        assert!(book.find("Carol").is_some());
        assert!(report.summary().contains("invalid contacts: Bob"));
    }

    #[test]
    fn test_load_recovers_when_copy_cannot_be_made() {
        let (temp_dir, mut book) = create_test_book();
        write_with_one_bad_contact(book.path());

        // Occupy every copy name the next half minute could produce
        let now = Local::now();
        for offset in 0..30 {
            let stamp = (now + Duration::seconds(offset)).format("%Y%m%d-%H%M%S");
            fs::create_dir(temp_dir.path().join(format!("address_book.json.corrupt-{}", stamp)))
                .unwrap();
        }

        let report = book.load().unwrap();
        assert!(report.wiped);
        assert!(book.is_empty());
        assert_eq!(report.quarantined, None);
        assert!(report.summary().contains("no copy of the original could be kept"));

        let mut book = AddressBook::new(book.path().to_path_buf())
            .with_recovery(LoadRecovery::SkipInvalid);
        let report = book.load().unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.quarantined, None);
    }

    #[test]
    fn test_repeated_loads_keep_one_copy() {
        let (temp_dir, mut book) = create_test_book();
        write_with_one_bad_contact(book.path());

        let first = book.load().unwrap().quarantined.unwrap();
        let second = book.load().unwrap().quarantined.unwrap();
        assert_eq!(first, second);

        let copies = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().contains(".corrupt-"))
            .count();
        assert_eq!(copies, 1);
    }

    #[test]
    fn test_load_rejects_key_name_mismatch() {
        let (_temp_dir, mut book) = create_test_book();
        let json = r#"{"contacts": {"Alice": {"name": {"kind": "name", "value": "Mallory"}}}}"#;
        fs::write(book.path(), json).unwrap();

        let report = book.load().unwrap();
        assert!(report.wiped);
        assert_eq!(report.dropped, vec!["Alice"]);
    }

    #[test]
    fn test_load_unparseable_file() {
        let (_temp_dir, mut book) = create_test_book();
        fs::write(book.path(), "\u{0}\u{1}binary junk").unwrap();

        let report = book.load().unwrap();
        assert!(report.wiped);
        assert!(book.is_empty());
        assert!(report.quarantined.is_some());
    }

    #[test]
    fn test_save_into_read_only_directory() {
        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let mut perms = fs::metadata(&locked).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&locked, perms.clone()).unwrap();

        let mut book = AddressBook::new(locked.join("address_book.json"));
        book.add_record(contact("Alice", &[])).unwrap();
        let result = book.save();

        perms.set_readonly(false);
        fs::set_permissions(&locked, perms).unwrap();

        assert!(matches!(result, Err(RolodexError::Permission(_))));
        assert!(!locked.join("address_book.json").exists());
    }
}
