//! Title index: a 26-way trie over normalized titles.
//!
//! Every stored title is first *normalized*: reduced to ASCII letters only
//! and lowercased. Two titles that normalize to the same string collide, and
//! the last insert wins. Terminal nodes hold a [`BookId`] back-reference
//! resolved through the [`Catalog`] at lookup time, so the index never
//! dangles when the catalog's backing storage grows.
//!
//! Each public operation normalizes its input exactly once and delegates to
//! a private recursive helper that consumes the remaining suffix explicitly.
//! Deletion collapses nodes bottom-up: after the terminal value is removed,
//! every ancestor left with no value and no children is pruned, stopping at
//! the first live ancestor. The root is never pruned.

use crate::catalog::Catalog;
use crate::types::{Book, BookId};
use tracing::debug;

/// Number of child edges per node, one per letter a-z.
const ALPHABET: usize = 26;

/// One position along a normalized title string.
struct TrieNode {
    /// The letter on the edge leading to this node
    key: char,

    /// Book back-reference, present only on nodes terminating a title
    value: Option<BookId>,

    /// Child edges indexed by `letter - 'a'`
    children: [Option<Box<TrieNode>>; ALPHABET],
}

impl TrieNode {
    fn new(key: char) -> Self {
        TrieNode {
            key,
            value: None,
            children: std::array::from_fn(|_| None),
        }
    }

    /// A node is live while it terminates a title or leads to one.
    fn is_live(&self) -> bool {
        self.value.is_some() || self.children.iter().any(|c| c.is_some())
    }
}

/// Maps normalized title text to book ids for fast exact lookup.
///
/// ## Example
///
/// ```rust
/// use shelfdex_core::{BookId, TitleTrie};
///
/// let mut trie = TitleTrie::new();
/// trie.insert("Dune", BookId::new(1));
/// assert_eq!(trie.find("D.u.n.e!"), Some(BookId::new(1)));
/// assert_eq!(trie.find("duna"), None);
/// ```
pub struct TitleTrie {
    /// Root node; its own value slot serves titles that normalize to ""
    root: TrieNode,

    /// Number of stored titles
    len: usize,
}

impl Default for TitleTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleTrie {
    /// Create a new empty trie.
    pub fn new() -> Self {
        TitleTrie {
            root: TrieNode::new('\0'),
            len: 0,
        }
    }

    /// Number of stored titles.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the trie holds no titles.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a title mapped to `id`, returning the id it displaces if the
    /// normalized title was already present (last write wins).
    pub fn insert(&mut self, title: &str, id: BookId) -> Option<BookId> {
        let key = normalize(title);
        let previous = Self::insert_at(&mut self.root, key.as_bytes(), id);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Look up a title, returning the stored id if the full normalized path
    /// exists and terminates a title. Never mutates the structure.
    pub fn find(&self, title: &str) -> Option<BookId> {
        let key = normalize(title);
        Self::find_at(&self.root, key.as_bytes())
    }

    /// Look up a title and resolve it through the catalog.
    pub fn find_in<'a>(&self, title: &str, catalog: &'a Catalog) -> Option<&'a Book> {
        self.find(title).and_then(|id| catalog.get(id))
    }

    /// Remove a title, returning the evicted id if it was present.
    ///
    /// Removing an absent title is a no-op. Nodes that become non-live are
    /// pruned bottom-up; nodes still shared with other titles survive.
    pub fn remove(&mut self, title: &str) -> Option<BookId> {
        let key = normalize(title);
        let evicted = Self::remove_at(&mut self.root, key.as_bytes());
        if evicted.is_some() {
            self.len -= 1;
        }
        evicted
    }

    /// Insert every committed book's title, keyed by its id.
    ///
    /// Titles that normalize identically collide; the record with the
    /// highest id wins, matching last-write-wins insertion order.
    pub fn index_catalog(&mut self, catalog: &Catalog) {
        for book in catalog.iter() {
            self.insert(&book.title, book.id);
        }
        debug!(titles = self.len, "Indexed catalog titles");
    }

    /// Drop all stored titles.
    pub fn clear(&mut self) {
        self.root = TrieNode::new('\0');
        self.len = 0;
    }

    fn insert_at(node: &mut TrieNode, suffix: &[u8], id: BookId) -> Option<BookId> {
        match suffix.split_first() {
            None => node.value.replace(id),
            Some((&letter, rest)) => {
                let slot = (letter - b'a') as usize;
                let child = node.children[slot]
                    .get_or_insert_with(|| Box::new(TrieNode::new(letter as char)));
                Self::insert_at(child, rest, id)
            }
        }
    }

    fn find_at(node: &TrieNode, suffix: &[u8]) -> Option<BookId> {
        match suffix.split_first() {
            None => node.value,
            Some((&letter, rest)) => {
                let slot = (letter - b'a') as usize;
                match node.children[slot] {
                    Some(ref child) => Self::find_at(child, rest),
                    None => None,
                }
            }
        }
    }

    fn remove_at(node: &mut TrieNode, suffix: &[u8]) -> Option<BookId> {
        let (&letter, rest) = match suffix.split_first() {
            None => return node.value.take(),
            Some(parts) => parts,
        };

        let slot = (letter - b'a') as usize;
        let evicted = match node.children[slot] {
            Some(ref mut child) => Self::remove_at(child, rest),
            // Missing edge mid-path: abandon the walk, nothing to unwind.
            None => return None,
        };

        if evicted.is_some() {
            if let Some(child) = node.children[slot].as_deref() {
                if !child.is_live() {
                    debug!(key = %child.key, "Pruning dead trie node");
                    node.children[slot] = None;
                }
            }
        }

        evicted
    }
}

impl std::fmt::Debug for TitleTrie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleTrie").field("len", &self.len).finish()
    }
}

/// Reduce a string to ASCII letters only, lowercased.
///
/// Non-alphabetic characters (spaces, punctuation, digits) are dropped
/// entirely, not replaced.
pub fn normalize(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> BookId {
        BookId::new(n)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Dune"), "dune");
        assert_eq!(normalize("D.u.n.e!"), "dune");
        assert_eq!(normalize("The Hobbit 2"), "thehobbit");
        assert_eq!(normalize("1984"), "");
    }

    #[test]
    fn test_insert_find_round_trip() {
        let mut trie = TitleTrie::new();
        trie.insert("Dune", id(1));
        assert_eq!(trie.find("Dune"), Some(id(1)));
        assert_eq!(trie.find("dune"), Some(id(1)));
        assert_eq!(trie.find("DUNE!"), Some(id(1)));
        assert_eq!(trie.find("duna"), None);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_find_prefix_without_value_is_absent() {
        let mut trie = TitleTrie::new();
        trie.insert("dune", id(1));
        assert_eq!(trie.find("dun"), None);
        assert_eq!(trie.find("dunes"), None);
    }

    #[test]
    fn test_insert_last_write_wins() {
        let mut trie = TitleTrie::new();
        assert_eq!(trie.insert("Dune", id(1)), None);
        assert_eq!(trie.insert("D.U.N.E.", id(2)), Some(id(1)));
        assert_eq!(trie.find("dune"), Some(id(2)));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_remove_then_find_absent() {
        let mut trie = TitleTrie::new();
        trie.insert("cat", id(1));
        assert_eq!(trie.remove("cat"), Some(id(1)));
        assert_eq!(trie.find("cat"), None);
        assert!(trie.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut trie = TitleTrie::new();
        trie.insert("cat", id(1));
        assert_eq!(trie.remove("dog"), None);
        assert_eq!(trie.remove("ca"), None);
        assert_eq!(trie.remove("cats"), None);
        assert_eq!(trie.find("cat"), Some(id(1)));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_remove_preserves_shared_prefix() {
        let mut trie = TitleTrie::new();
        trie.insert("cat", id(1));
        trie.insert("car", id(2));

        assert_eq!(trie.remove("cat"), Some(id(1)));
        assert_eq!(trie.find("cat"), None);
        assert_eq!(trie.find("car"), Some(id(2)));

        // The shared 'c' -> 'a' spine must survive; only 't' is pruned.
        let c_node = trie.root.children[(b'c' - b'a') as usize]
            .as_deref()
            .expect("'c' node pruned");
        let a_node = c_node.children[(b'a' - b'a') as usize]
            .as_deref()
            .expect("'a' node pruned");
        assert!(a_node.children[(b't' - b'a') as usize].is_none());
        assert!(a_node.children[(b'r' - b'a') as usize].is_some());
    }

    #[test]
    fn test_remove_collapses_dead_branch() {
        let mut trie = TitleTrie::new();
        trie.insert("lighthouse", id(3));
        trie.remove("lighthouse");
        // The whole branch is gone, back to the root.
        assert!(trie.root.children[(b'l' - b'a') as usize].is_none());
    }

    #[test]
    fn test_value_on_inner_node_keeps_spine() {
        let mut trie = TitleTrie::new();
        trie.insert("car", id(1));
        trie.insert("cart", id(2));

        trie.remove("cart");
        assert_eq!(trie.find("car"), Some(id(1)));

        trie.remove("car");
        assert_eq!(trie.find("car"), None);
        assert!(trie.root.children[(b'c' - b'a') as usize].is_none());
    }

    #[test]
    fn test_fully_non_alphabetic_title_uses_root_slot() {
        let mut trie = TitleTrie::new();
        trie.insert("1984", id(4));
        assert_eq!(trie.find("!?"), Some(id(4)));
        assert_eq!(trie.remove("1984"), Some(id(4)));
        assert_eq!(trie.find(""), None);
    }

    #[test]
    fn test_find_in_resolves_through_catalog() {
        let mut catalog = Catalog::new();
        let hobbit = catalog.create_book("The Hobbit", 1937, "Allen & Unwin");
        catalog.commit(hobbit).unwrap();
        let dune = catalog.create_book("Dune", 1965, "Chilton Books");
        catalog.commit(dune).unwrap();

        let mut trie = TitleTrie::new();
        trie.index_catalog(&catalog);

        let found = trie.find_in("DUNE!", &catalog).unwrap();
        assert_eq!(found.title, "Dune");
        assert_eq!(found.id, id(1));
        assert!(trie.find_in("duna", &catalog).is_none());
    }

    #[test]
    fn test_index_survives_catalog_growth() {
        let mut catalog = Catalog::new();
        let dune = catalog.create_book("Dune", 1965, "Chilton Books");
        catalog.commit(dune).unwrap();

        let mut trie = TitleTrie::new();
        trie.index_catalog(&catalog);

        // Grow the catalog well past its original allocation.
        for i in 0..100 {
            let book = catalog.create_book(&format!("Filler {}", i), 2000, "P");
            catalog.commit(book).unwrap();
        }

        assert_eq!(trie.find_in("dune", &catalog).unwrap().title, "Dune");
    }

    #[test]
    fn test_clear() {
        let mut trie = TitleTrie::new();
        trie.insert("cat", id(1));
        trie.insert("car", id(2));
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.find("cat"), None);
    }
}
