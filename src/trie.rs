use tracing::trace;

use crate::error::TrieError;

/// Number of edge slots per node, one for each of 'a' through 'z'.
pub const ALPHABET_SIZE: usize = 26;

/// A node in the prefix tree
#[derive(Debug, Default)]
struct TrieNode {
    // Child for each letter, indexed by `letter - 'a'`
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    // Whether the path from the root to this node spells a stored word
    is_word_end: bool,
}

impl TrieNode {
    fn child(&self, slot: usize) -> Option<&TrieNode> {
        self.children[slot].as_deref()
    }

    /// Present children in ascending letter order.
    fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(slot, child)| child.as_deref().map(|child| (letter(slot), child)))
    }

    fn child_count(&self) -> usize {
        self.children.iter().filter(|child| child.is_some()).count()
    }

    /// Depth-first collection; a node's own word is recorded before its
    /// extensions, so the output is lexicographic.
    ///
    /// Walks with an explicit stack so word length is not bounded by the
    /// thread's stack size. Each entry carries the length of `current` at
    /// its parent and the letter on its incoming edge.
    fn collect_words(&self, current: &mut String, words: &mut Vec<String>) {
        let mut stack = vec![(current.len(), None, self)];
        while let Some((depth, ch, node)) = stack.pop() {
            current.truncate(depth);
            if let Some(ch) = ch {
                current.push(ch);
            }
            if node.is_word_end {
                words.push(current.clone());
            }

            let depth = current.len();
            // Reversed so that 'a' is popped first.
            let mut children: Vec<_> = node.children().collect();
            children.reverse();
            stack.extend(
                children
                    .into_iter()
                    .map(|(ch, child)| (depth, Some(ch), child)),
            );
        }
    }

    fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children().map(|(_, child)| child));
        }
        count
    }
}

impl Drop for TrieNode {
    // Unlinks descendants one at a time so dropping a long chain does not
    // recurse once per letter.
    fn drop(&mut self) {
        let mut stack: Vec<Box<TrieNode>> =
            self.children.iter_mut().filter_map(Option::take).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.iter_mut().filter_map(Option::take));
        }
    }
}

/// Maps a character onto its child slot after ASCII lowercasing.
fn slot(ch: char) -> Option<usize> {
    let ch = ch.to_ascii_lowercase();
    ch.is_ascii_lowercase().then(|| (ch as u8 - b'a') as usize)
}

fn letter(slot: usize) -> char {
    (b'a' + slot as u8) as char
}

/// A prefix-indexed word store over the lowercase letters `a`-`z`.
///
/// Input is lowercased (ASCII only) before traversal. Characters outside the
/// alphabet are rejected by [`PrefixTrie::insert`] and behave like a missing
/// edge for every read or remove operation.
#[derive(Debug, Default)]
pub struct PrefixTrie {
    root: TrieNode,
    len: usize,
}

impl PrefixTrie {
    /// Creates a new, empty prefix tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of words currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no word is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Inserts a word, creating missing nodes along its path.
    ///
    /// Inserting a word that is already present has no effect. A word with a
    /// character outside `a`-`z` (after lowercasing) is rejected before any
    /// node is created.
    pub fn insert(&mut self, word: &str) -> Result<(), TrieError> {
        if let Some(ch) = word.chars().find(|&ch| slot(ch).is_none()) {
            return Err(TrieError::InvalidCharacter {
                word: word.to_string(),
                ch,
            });
        }

        let mut node = &mut self.root;
        for slot in word.chars().filter_map(slot) {
            node = node.children[slot].get_or_insert_with(Box::default).as_mut();
        }

        if !node.is_word_end {
            node.is_word_end = true;
            self.len += 1;
        }
        Ok(())
    }

    /// Searches for a complete word in the prefix tree
    pub fn search(&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.is_word_end)
    }

    /// Returns `true` if at least one stored word starts with `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.find(prefix).is_some()
    }

    /// Returns every stored word that starts with `prefix`, in lexicographic
    /// order. The prefix itself comes first when it is a word.
    ///
    /// The result is unbounded; callers that want a limit apply it themselves.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut words = Vec::new();
        if let Some(node) = self.find(prefix) {
            let mut current = prefix.to_ascii_lowercase();
            node.collect_words(&mut current, &mut words);
        }
        words
    }

    /// Removes a word and prunes the nodes only it was using.
    ///
    /// Removing a word that is not stored is a no-op.
    pub fn remove(&mut self, word: &str) {
        if !self.search(word) {
            trace!("'{}' is not stored, nothing to remove", word);
            return;
        }

        let path: Vec<usize> = word.chars().filter_map(slot).collect();

        // Depth of the deepest node on the path that stays alive: the root,
        // another word's end, or a branch point. Everything below its edge
        // towards the removed word is dead once the word is unmarked.
        let mut cut = 0;
        let mut node = &self.root;
        for (depth, &slot) in path.iter().enumerate() {
            if node.is_word_end || node.child_count() > 1 {
                cut = depth;
            }
            node = match node.child(slot) {
                Some(child) => child,
                None => return,
            };
        }
        let keep_terminal = path.is_empty() || node.child_count() > 0;

        let stop = if keep_terminal { path.len() } else { cut };
        let mut node = &mut self.root;
        for &slot in &path[..stop] {
            node = match node.children[slot].as_deref_mut() {
                Some(child) => child,
                None => return,
            };
        }
        if keep_terminal {
            node.is_word_end = false;
        } else {
            node.children[path[cut]] = None;
        }
        self.len -= 1;
    }

    fn find(&self, key: &str) -> Option<&TrieNode> {
        key.chars()
            .try_fold(&self.root, |node, ch| node.child(slot(ch)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie_of(words: &[&str]) -> PrefixTrie {
        let mut trie = PrefixTrie::new();
        for word in words {
            trie.insert(word).unwrap();
        }
        trie
    }

    #[test]
    fn test_inserted_words_are_found() {
        let words = ["apple", "app", "banana", "band", "b"];
        let trie = trie_of(&words);
        for word in words {
            assert!(trie.search(word), "{}", word);
        }
        assert_eq!(trie.len(), 5);
    }

    #[test]
    fn test_missing_words_are_not_found() {
        let trie = trie_of(&["apple", "band"]);
        assert!(!trie.search("aaq"));
        assert!(!trie.search("appl"));
        assert!(!trie.search("apples"));
        assert!(!trie.search("ban"));
        assert!(!trie.search(""));
    }

    #[test]
    fn test_case_is_folded() {
        let mut trie = PrefixTrie::new();
        trie.insert("Apple").unwrap();
        assert!(trie.search("apple"));
        assert!(trie.search("APPLE"));
        assert_eq!(trie.words_with_prefix("AP"), vec!["apple"]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let once = trie_of(&["app", "apple"]);
        let twice = trie_of(&["app", "apple", "app", "apple"]);
        assert_eq!(once.words_with_prefix(""), twice.words_with_prefix(""));
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.node_count(), twice.node_count());
    }

    #[test]
    fn test_insert_rejects_non_letters() {
        let mut trie = PrefixTrie::new();
        let err = trie.insert("don't").unwrap_err();
        assert_eq!(
            err,
            TrieError::InvalidCharacter {
                word: "don't".to_string(),
                ch: '\''
            }
        );
        assert!(trie.insert("café").is_err());
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_non_letters_are_a_missing_edge() {
        let trie = trie_of(&["apple"]);
        assert!(!trie.search("app!e"));
        assert!(!trie.contains_prefix("a1"));
        assert!(trie.words_with_prefix("ap ").is_empty());
    }

    #[test]
    fn test_words_with_prefix_in_order() {
        let trie = trie_of(&["application", "apple", "app"]);
        assert_eq!(
            trie.words_with_prefix("app"),
            vec!["app", "apple", "application"]
        );
    }

    #[test]
    fn test_words_with_prefix_includes_prefix_word() {
        let trie = trie_of(&["acanthodean", "acanthodea"]);
        assert_eq!(
            trie.words_with_prefix("acanthodea"),
            vec!["acanthodea", "acanthodean"]
        );
    }

    #[test]
    fn test_empty_prefix_lists_everything() {
        let trie = trie_of(&["zebra", "apple", "mango", "app", "b"]);
        assert_eq!(
            trie.words_with_prefix(""),
            vec!["app", "apple", "b", "mango", "zebra"]
        );
    }

    #[test]
    fn test_unknown_prefix_on_empty_trie() {
        let trie = PrefixTrie::new();
        assert!(trie.words_with_prefix("xyz").is_empty());
        assert!(trie.words_with_prefix("").is_empty());
        assert!(!trie.contains_prefix("x"));
        assert!(trie.contains_prefix(""));
    }

    #[test]
    fn test_remove_word() {
        let mut trie = trie_of(&["apple", "banana", "band"]);
        trie.remove("apple");
        assert!(!trie.search("apple"));
        assert!(trie.search("banana"));
        assert!(trie.search("band"));
        assert!(!trie.contains_prefix("a"));
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_remove_prefix_word_keeps_longer_word() {
        let mut trie = trie_of(&["app", "apple"]);
        let nodes = trie.node_count();
        trie.remove("app");
        assert!(!trie.search("app"));
        assert!(trie.search("apple"));
        assert_eq!(trie.node_count(), nodes);
        assert_eq!(trie.words_with_prefix("ap"), vec!["apple"]);
    }

    #[test]
    fn test_remove_longer_word_keeps_prefix_word() {
        let mut trie = trie_of(&["app", "apple"]);
        trie.remove("apple");
        assert!(trie.search("app"));
        assert!(!trie.search("apple"));
        // root + a + p + p
        assert_eq!(trie.node_count(), 4);
    }

    #[test]
    fn test_remove_prunes_only_dead_branch() {
        let mut trie = trie_of(&["band", "banana"]);
        trie.remove("banana");
        assert!(trie.search("band"));
        // root + b + a + n + d
        assert_eq!(trie.node_count(), 5);
    }

    #[test]
    fn test_remove_missing_word_is_noop() {
        let mut trie = trie_of(&["app", "apple"]);
        let nodes = trie.node_count();
        trie.remove("ap");
        trie.remove("apples");
        trie.remove("zzz");
        trie.remove("a-b");
        assert_eq!(trie.node_count(), nodes);
        assert_eq!(trie.len(), 2);
        assert_eq!(trie.words_with_prefix(""), vec!["app", "apple"]);
    }

    #[test]
    fn test_remove_everything_leaves_root() {
        let words = ["app", "apple", "application", "band", "banana"];
        let mut trie = trie_of(&words);
        for word in words {
            trie.remove(word);
        }
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert!(trie.words_with_prefix("").is_empty());
    }

    #[test]
    fn test_empty_word() {
        let mut trie = PrefixTrie::new();
        trie.insert("").unwrap();
        assert!(trie.search(""));
        assert_eq!(trie.words_with_prefix(""), vec![""]);
        trie.remove("");
        assert!(!trie.search(""));
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_remove_detaches_branch_below_word_end() {
        let mut trie = trie_of(&["app", "apple", "apply"]);
        trie.remove("apple");
        // root + a + p + p + l + y
        assert_eq!(trie.node_count(), 6);
        trie.remove("apply");
        assert_eq!(trie.node_count(), 4);
        assert_eq!(trie.words_with_prefix(""), vec!["app"]);
    }

    #[test]
    fn test_very_long_word() {
        let word = "a".repeat(200_000);
        let mut trie = PrefixTrie::new();
        trie.insert(&word).unwrap();
        trie.insert("ab").unwrap();
        assert!(trie.search(&word));
        assert_eq!(trie.node_count(), 200_002);

        let words = trie.words_with_prefix("");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0], word);
        assert_eq!(words[1], "ab");

        trie.remove(&word);
        assert!(!trie.search(&word));
        assert_eq!(trie.words_with_prefix(""), vec!["ab"]);
        assert_eq!(trie.node_count(), 3);

        trie.insert(&word).unwrap();
        drop(trie);
    }
}
