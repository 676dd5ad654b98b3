//! The owning in-memory catalog of book records.
//!
//! The `Catalog` is the central data structure: it owns every [`Book`] (and
//! transitively every [`Author`]) and addresses records by their [`BookId`],
//! which always equals the record's slot in the backing vector.
//!
//! ## Architecture
//!
//! - A `Vec<Book>` stores committed records for cache-friendly iteration;
//!   it grows past any capacity declared at load time, so the declared file
//!   count is only a pre-allocation hint
//! - A running `next_id` counter assigns ids densely in creation order
//! - Creation and commit are separate steps: [`Catalog::create_book`] hands
//!   out a record with a reserved id, and [`Catalog::commit`] places it in
//!   backing storage once the caller has attached its authors
//!
//! The catalog is single-writer by design. Callers embedding it in a
//! concurrent environment must provide external mutual exclusion; the title
//! trie holds ids into this storage and must not outlive it.

use crate::error::{Result, ShelfdexError};
use crate::types::{Author, Book, BookId, CatalogStats};
use tracing::debug;

/// The owning collection of all book records, indexed by id.
///
/// ## Example
///
/// ```rust
/// use shelfdex_core::Catalog;
///
/// let mut catalog = Catalog::new();
/// let mut book = catalog.create_book("Dune", 1965, "Chilton Books");
/// book.add_author("Frank", "Herbert");
/// let id = catalog.commit(book).unwrap();
/// assert_eq!(catalog.get(id).unwrap().title, "Dune");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Committed records; slot index equals `BookId`
    books: Vec<Book>,

    /// Next id to assign; also the count of created records
    next_id: u64,

    /// Record count declared by the last loaded file header
    declared_count: u64,

    /// Statistics, refreshed on mutation
    stats: CatalogStats,
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Create a catalog pre-sized for `capacity` records.
    ///
    /// Used by the codec, which reads the declared record count from the
    /// file header. The capacity is a hint: the catalog grows past it.
    pub fn with_capacity(capacity: usize) -> Self {
        Catalog {
            books: Vec::with_capacity(capacity),
            next_id: 0,
            declared_count: capacity as u64,
            stats: CatalogStats {
                declared_count: capacity as u64,
                ..CatalogStats::new()
            },
        }
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the catalog holds no committed records.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// The id the next created book will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Record count declared by the last loaded file (0 if never loaded).
    pub fn declared_count(&self) -> u64 {
        self.declared_count
    }

    /// Get current catalog statistics.
    pub fn stats(&self) -> CatalogStats {
        self.stats.clone()
    }

    /// Reserve space for at least `additional` more records.
    pub fn reserve(&mut self, additional: usize) {
        self.books.reserve(additional);
    }

    /// Create a new book record with the next free id.
    ///
    /// The record is *not* placed in backing storage; attach authors with
    /// [`Book::add_author`] and then [`commit`](Catalog::commit) it. Text
    /// fields longer than their bound are silently truncated.
    pub fn create_book(&mut self, title: &str, year_published: i16, publisher: &str) -> Book {
        let id = BookId::new(self.next_id);
        self.next_id += 1;
        debug!(id = %id, title = title, "Created book record");
        Book::new(id, title, year_published, publisher)
    }

    /// Write a book into backing storage at the slot its id addresses.
    ///
    /// Overwrites any prior value at that slot. Returns the id on success.
    /// Fails with [`ShelfdexError::InvalidId`] if the id skips past the end
    /// of storage, which cannot happen when every created book is committed
    /// in creation order.
    pub fn commit(&mut self, book: Book) -> Result<BookId> {
        let id = book.id;
        let slot = id.as_index();
        if slot < self.books.len() {
            self.books[slot] = book;
        } else if slot == self.books.len() {
            self.books.push(book);
        } else {
            return Err(ShelfdexError::InvalidId {
                id: id.as_u64(),
                len: self.books.len(),
            });
        }
        self.refresh_stats();
        Ok(id)
    }

    /// Get a committed record by id.
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(id.as_index())
    }

    /// Get a mutable reference to a committed record.
    pub fn get_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.get_mut(id.as_index())
    }

    /// Iterate over committed records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// All authors of a book, if the id is committed.
    pub fn authors(&self, id: BookId) -> Option<&[Author]> {
        self.get(id).map(|b| b.authors.as_slice())
    }

    /// Clear the catalog, resetting the id counter.
    ///
    /// Invalidates every id previously handed out, including any held by a
    /// title trie built over this catalog.
    pub fn clear(&mut self) {
        self.books.clear();
        self.next_id = 0;
        self.declared_count = 0;
        self.stats = CatalogStats::new();
    }

    fn refresh_stats(&mut self) {
        self.stats.total_books = self.books.len() as u64;
        self.stats.total_authors = self.books.iter().map(|b| b.authors.len() as u64).sum();
        self.stats.declared_count = self.declared_count;
        self.stats.last_updated = Some(chrono::Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_monotonicity() {
        let mut catalog = Catalog::new();
        for i in 0..5u64 {
            let book = catalog.create_book(&format!("Book {}", i), 2000, "Pub");
            assert_eq!(book.id.as_u64(), i);
            catalog.commit(book).unwrap();
        }
        assert_eq!(catalog.next_id(), 5);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_create_does_not_commit() {
        let mut catalog = Catalog::new();
        let book = catalog.create_book("Loose", 2001, "Pub");
        assert_eq!(catalog.len(), 0);
        assert_eq!(catalog.next_id(), 1);
        catalog.commit(book).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_commit_overwrites_slot() {
        let mut catalog = Catalog::new();
        let book = catalog.create_book("First draft", 2020, "Pub");
        let id = catalog.commit(book).unwrap();

        let mut revised = Book::new(id, "Second draft", 2021, "Pub");
        revised.add_author("A", "B");
        catalog.commit(revised).unwrap();

        assert_eq!(catalog.len(), 1);
        let stored = catalog.get(id).unwrap();
        assert_eq!(stored.title, "Second draft");
        assert_eq!(stored.author_count(), 1);
    }

    #[test]
    fn test_commit_out_of_range() {
        let mut catalog = Catalog::new();
        let book = Book::new(BookId::new(7), "Orphan", 1990, "Pub");
        let err = catalog.commit(book).unwrap_err();
        assert!(matches!(err, ShelfdexError::InvalidId { id: 7, len: 0 }));
    }

    #[test]
    fn test_grows_past_declared_capacity() {
        let mut catalog = Catalog::with_capacity(1);
        for _ in 0..3 {
            let book = catalog.create_book("T", 2000, "P");
            catalog.commit(book).unwrap();
        }
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.declared_count(), 1);
    }

    #[test]
    fn test_stats() {
        let mut catalog = Catalog::new();
        let mut book = catalog.create_book("Dune", 1965, "Chilton Books");
        book.add_author("Frank", "Herbert");
        catalog.commit(book).unwrap();

        let book = catalog
            .create_book("The Hobbit", 1937, "Allen & Unwin")
            .with_author("J.R.R.", "Tolkien");
        catalog.commit(book).unwrap();

        let stats = catalog.stats();
        assert_eq!(stats.total_books, 2);
        assert_eq!(stats.total_authors, 2);
        assert!(stats.last_updated.is_some());
    }

    #[test]
    fn test_clear_resets_ids() {
        let mut catalog = Catalog::new();
        let book = catalog.create_book("T", 2000, "P");
        catalog.commit(book).unwrap();
        catalog.clear();
        assert!(catalog.is_empty());
        assert_eq!(catalog.next_id(), 0);
    }
}
