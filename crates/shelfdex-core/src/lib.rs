//! # Shelfdex Core Library
//!
//! This crate provides the embedded data layer for Shelfdex: an owning
//! in-memory catalog of book records, a delimited text codec for loading and
//! saving it, and a 26-way trie over normalized titles for fast lookup. An
//! interactive front end is expected to sit on top of this library and
//! render its results.
//!
//! ## Architecture
//!
//! - **Types** (`types`): Record model — book and author records, book ids
//! - **Catalog** (`catalog`): Owning store addressed by densely assigned ids
//! - **Codec** (`codec`): Line-oriented `title;authors;year;publisher` files
//! - **Trie** (`trie`): Title index holding id back-references into the catalog
//! - **Config** (`config`): Configuration management
//!
//! ## Example
//!
//! ```rust,ignore
//! use shelfdex_core::{CatalogStore, TitleTrie};
//!
//! let store = CatalogStore::new("./books.db");
//! let mut catalog = store.load_or_new();
//!
//! let mut trie = TitleTrie::new();
//! trie.index_catalog(&catalog);
//!
//! if let Some(book) = trie.find_in("The Hobbit", &catalog) {
//!     println!("{} ({})", book.title, book.year_published);
//! }
//!
//! store.save(&catalog)?;
//! ```

pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod trie;
pub mod types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use codec::CatalogStore;
pub use config::Config;
pub use error::{Result, ShelfdexError};
pub use trie::{normalize, TitleTrie};
pub use types::{Author, Book, BookId, CatalogStats};
