//! Core data types for Shelfdex.
//!
//! This module defines the record model shared by the catalog, codec, and
//! title index. These types are designed to be:
//!
//! - **Serializable**: For persistence and config round-trips
//! - **Bounded**: Text fields are silently truncated to fixed limits
//! - **Plain**: No behavior beyond construction and field upkeep

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length (in characters) of a book title.
pub const TITLE_MAX: usize = 256;
/// Maximum length (in characters) of a publisher name.
pub const PUBLISHER_MAX: usize = 40;
/// Maximum length (in characters) of an author's first or last name.
pub const AUTHOR_NAME_MAX: usize = 56;

/// Unique identifier for a book within a catalog.
///
/// Ids are assigned densely in creation order starting at 0 and double as the
/// index of the record in the catalog's backing storage. The title trie
/// stores `BookId`s rather than references, so catalog growth never
/// invalidates the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(pub u64);

impl BookId {
    /// Create a new book ID
    pub fn new(id: u64) -> Self {
        BookId(id)
    }

    /// Get the raw ID value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The backing-array slot this ID addresses
    pub fn as_index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One author of a book.
///
/// Owned exclusively by a single [`Book`]; authors are never shared between
/// records. Name fields are truncated to [`AUTHOR_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// First name (possibly empty)
    pub first: String,

    /// Last name (possibly empty)
    pub last: String,
}

impl Author {
    /// Create an author, truncating both name fields to their bound.
    pub fn new(first: &str, last: &str) -> Self {
        Author {
            first: truncate_chars(first, AUTHOR_NAME_MAX),
            last: truncate_chars(last, AUTHOR_NAME_MAX),
        }
    }

    /// Full display name (`first last`, collapsing an empty side).
    pub fn full_name(&self) -> String {
        match (self.first.is_empty(), self.last.is_empty()) {
            (true, _) => self.last.clone(),
            (_, true) => self.first.clone(),
            _ => format!("{} {}", self.first, self.last),
        }
    }
}

/// A single book record.
///
/// ## Design Notes
///
/// - `id` is assigned once by the catalog and never changes
/// - `authors` grows by append only; the book exclusively owns the sequence
/// - text fields are truncated to their bounds at construction, so a record
///   loaded from any input is always within limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier, equal to the record's slot in the catalog
    pub id: BookId,

    /// Title, at most [`TITLE_MAX`] characters
    pub title: String,

    /// Publisher, at most [`PUBLISHER_MAX`] characters
    pub publisher: String,

    /// Year of publication (0 when unknown or unparsable)
    pub year_published: i16,

    /// Ordered author sequence (may be empty)
    pub authors: Vec<Author>,
}

impl Book {
    /// Create a new book record with the given fields.
    ///
    /// Oversized `title` and `publisher` values are silently truncated.
    /// The author sequence starts empty.
    pub fn new(id: BookId, title: &str, year_published: i16, publisher: &str) -> Self {
        Book {
            id,
            title: truncate_chars(title, TITLE_MAX),
            publisher: truncate_chars(publisher, PUBLISHER_MAX),
            year_published,
            authors: Vec::new(),
        }
    }

    /// Append one author, truncating the name fields to their bound.
    pub fn add_author(&mut self, first: &str, last: &str) {
        self.authors.push(Author::new(first, last));
    }

    /// Builder-style author attachment
    pub fn with_author(mut self, first: &str, last: &str) -> Self {
        self.add_author(first, last);
        self
    }

    /// Number of attached authors
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }
}

/// Statistics about the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Total number of committed book records
    pub total_books: u64,

    /// Total number of author sub-records across all books
    pub total_authors: u64,

    /// Record count declared by the header of the last loaded file
    /// (0 for a catalog never populated from disk)
    pub declared_count: u64,

    /// When the catalog was last mutated
    pub last_updated: Option<DateTime<Utc>>,
}

impl CatalogStats {
    /// Create new empty stats
    pub fn new() -> Self {
        CatalogStats::default()
    }
}

/// Truncate a string to at most `max` characters, respecting char boundaries.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
