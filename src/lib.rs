//! Prefix completion over a lowercase ASCII word trie.
//!
//! [`PrefixTrie`] stores the words, [`dictionary`] turns word lists into a
//! trie, and [`complete`] is the command-line front end.
//!
//! ```
//! use autocomplete::PrefixTrie;
//!
//! let mut trie = PrefixTrie::new();
//! for word in ["app", "apple", "application"] {
//!     trie.insert(word).unwrap();
//! }
//! assert_eq!(trie.words_with_prefix("app"), ["app", "apple", "application"]);
//!
//! trie.remove("app");
//! assert!(!trie.search("app"));
//! assert!(trie.search("apple"));
//! ```

pub mod complete;
pub mod dictionary;
pub mod error;
pub mod trie;

pub use error::{LoadError, TrieError, UsageError};
pub use trie::PrefixTrie;
