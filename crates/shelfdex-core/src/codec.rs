//! Persistence layer for the catalog.
//!
//! This module converts between a [`Catalog`] and a flat, line-oriented
//! delimited text file. The format is lenient by design: malformed input is
//! never rejected, only degraded.
//!
//! ## Catalog File Format
//!
//! ```text
//! [Header: 1 line]
//!   - Declared record count as decimal text
//!
//! [Records: 1 line each]
//!   - title;authorList;year;publisher
//!   - '"' characters are cosmetic and stripped wherever they occur
//!   - authorList is comma-separated "first last" pairs; each pair splits
//!     on the first space (everything after it is the last name)
//!   - a line shorter than four fields yields empty values for the rest
//! ```
//!
//! The saved header reflects the live record count at save time, which may
//! differ from the count originally declared at load time.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Result, ShelfdexError};
use crate::types::Book;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default catalog file name under the platform data directory.
pub const DEFAULT_CATALOG_FILE: &str = "books.db";

/// Manages persistence of a catalog to one on-disk file.
///
/// ## Example
///
/// ```rust,ignore
/// use shelfdex_core::CatalogStore;
///
/// let store = CatalogStore::new("./data/books.db");
///
/// let mut catalog = store.load_or_new();
/// let book = catalog.create_book("Dune", 1965, "Chilton Books");
/// catalog.commit(book)?;
/// store.save(&catalog)?;
/// ```
pub struct CatalogStore {
    /// Path of the catalog file
    path: PathBuf,

    /// Reproduce the legacy writer's defective author concatenation on save
    legacy_author_concat: bool,

    /// Pre-allocation hint for the empty catalog `load_or_new` falls back to
    fallback_capacity: usize,
}

impl CatalogStore {
    /// Create a new store for the given catalog file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        CatalogStore {
            path: path.as_ref().to_path_buf(),
            legacy_author_concat: false,
            fallback_capacity: 0,
        }
    }

    /// Build a store from configuration: path override, capacity hint, and
    /// format flags.
    pub fn from_config(config: &Config) -> Result<Self> {
        let path = match config.catalog.database_path {
            Some(ref p) => p.clone(),
            None => Config::default_data_dir()?.join(DEFAULT_CATALOG_FILE),
        };
        Ok(CatalogStore::new(path)
            .with_legacy_author_concat(config.format.legacy_author_concat)
            .with_initial_capacity(config.catalog.initial_capacity))
    }

    /// Set whether `save` writes author lists the way the legacy writer did:
    /// only the final author's last name survives. Off by default; the
    /// default output round-trips through `load` losslessly.
    pub fn with_legacy_author_concat(mut self, legacy: bool) -> Self {
        self.legacy_author_concat = legacy;
        self
    }

    /// Set the pre-allocation hint used when `load_or_new` starts fresh.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.fallback_capacity = capacity;
        self
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the catalog file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Temporary file used during save, renamed over the target on success.
    fn temp_path(&self) -> PathBuf {
        let mut os = self.path.as_os_str().to_os_string();
        os.push(".tmp");
        PathBuf::from(os)
    }

    /// Load the catalog from disk.
    ///
    /// The first line declares the record count and pre-sizes the catalog;
    /// every following line is parsed as one record. Records are never
    /// dropped for being malformed: short lines yield empty fields and
    /// oversized fields are truncated.
    pub fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            return Err(ShelfdexError::CatalogNotFound {
                path: self.path.clone(),
            });
        }

        info!(path = %self.path.display(), "Loading catalog");

        let file = File::open(&self.path)?;
        let mut reader = BufReader::new(file);

        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return Err(ShelfdexError::header("empty catalog file"));
        }
        let declared: usize = header.trim().parse().map_err(|_| {
            ShelfdexError::header(format!("record count is not a number: {:?}", header.trim()))
        })?;

        let mut catalog = Catalog::with_capacity(declared);
        for line in reader.lines() {
            let line = line?;
            parse_record(&line, &mut catalog)?;
        }

        info!(
            declared = declared,
            loaded = catalog.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Save the catalog to disk.
    ///
    /// Writes the live record count as the header, then one line per record
    /// in id order. Uses atomic write (write to temp, then rename) to
    /// prevent a partially written file on failure.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        info!(
            path = %self.path.display(),
            records = catalog.len(),
            "Saving catalog"
        );

        let temp_path = self.temp_path();
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);

            writeln!(writer, "{}", catalog.len())?;
            for book in catalog.iter() {
                writeln!(
                    writer,
                    "{};{};{};{}",
                    book.title,
                    self.format_authors(book),
                    book.year_published,
                    book.publisher
                )?;
            }

            writer.flush()?;
        }

        fs::rename(&temp_path, &self.path)?;

        debug!("Catalog saved successfully");

        Ok(())
    }

    /// Load the catalog, or return a new empty one if loading fails.
    ///
    /// Logs a warning if loading fails.
    pub fn load_or_new(&self) -> Catalog {
        match self.load() {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Failed to load catalog, starting fresh");
                let mut catalog = Catalog::new();
                catalog.reserve(self.fallback_capacity);
                catalog
            }
        }
    }

    fn format_authors(&self, book: &Book) -> String {
        if self.legacy_author_concat {
            // The legacy writer reused one buffer per author, so each copy
            // overwrote the previous one and only the final author's last
            // name reached the file.
            return book
                .authors
                .last()
                .map(|a| a.last.clone())
                .unwrap_or_default();
        }

        book.authors
            .iter()
            .map(|a| a.full_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse one record line into the catalog.
///
/// Field order is `title;authorList;year;publisher`. Double quotes are
/// stripped wherever they occur (cosmetic, not escaping).
fn parse_record(line: &str, catalog: &mut Catalog) -> Result<()> {
    let cleaned: String = line.chars().filter(|&c| c != '"').collect();

    let mut fields = cleaned.splitn(4, ';');
    let title = fields.next().unwrap_or("");
    let author_list = fields.next().unwrap_or("");
    let year_text = fields.next().unwrap_or("");
    let publisher = fields.next().unwrap_or("");

    if cleaned.matches(';').count() < 3 {
        debug!(line = line, "Short record line; missing fields left empty");
    }

    let year = year_text.trim().parse::<i16>().unwrap_or(0);

    let mut book = catalog.create_book(title, year, publisher);
    for entry in author_list.split(',') {
        // Tolerate the conventional space after the separating comma.
        let entry = entry.trim_start();
        if entry.is_empty() {
            continue;
        }
        let (first, last) = match entry.split_once(' ') {
            Some((first, last)) => (first, last),
            None => (entry, ""),
        };
        book.add_author(first, last);
    }
    catalog.commit(book)?;

    Ok(())
}
