//! Prefix trie for dictionary words and prefix completion.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Order in which `matches_with_prefix` walks the subtree under a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Level by level: shorter words always come before longer ones.
    #[default]
    BreadthFirst,
    /// Pre-order walk: each subtree is exhausted before its next sibling.
    DepthFirst,
}

/// A character-indexed prefix tree.
///
/// Every node is keyed by one Unicode scalar. A node that ends a dictionary
/// entry stores the full word, so matches never need to walk back up to the
/// root. Children are kept sorted by code point, which makes traversal order
/// deterministic among siblings.
///
/// # Example
/// ```
/// use libtibetan_core::trie::TrieNode;
///
/// let mut trie = TrieNode::new();
/// trie.insert("ཀ");
/// trie.insert("ཀུ");
/// trie.insert("ཁ");
///
/// assert!(trie.contains_word("ཀུ"));
/// assert!(!trie.contains_word("ཀི"));
/// assert_eq!(trie.matches_with_prefix("ཀ"), vec!["ཀ", "ཀུ"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    /// Edge label leading into this node; `None` only at the root.
    label: Option<char>,
    children: BTreeMap<char, Box<TrieNode>>,
    /// Set iff the path from the root to this node spells a stored word.
    word: Option<String>,
}

impl TrieNode {
    /// Create a new empty trie root.
    pub fn new() -> Self {
        Self {
            label: None,
            children: BTreeMap::new(),
            word: None,
        }
    }

    fn with_label(label: char) -> Self {
        Self {
            label: Some(label),
            children: BTreeMap::new(),
            word: None,
        }
    }

    /// The edge label of this node (`None` for the root).
    pub fn label(&self) -> Option<char> {
        self.label
    }

    /// The word ending at this node, if any.
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Insert a word, creating missing nodes along its path.
    ///
    /// Returns `true` if the word was not stored before. Re-inserting an
    /// existing word overwrites it with the same value and returns `false`.
    /// The empty string is never stored.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = self;
        for ch in word.chars() {
            node = node
                .children
                .entry(ch)
                .or_insert_with(|| Box::new(TrieNode::with_label(ch)))
                .as_mut();
        }
        node.word.replace(word.to_string()).is_none()
    }

    /// Find the node reached by walking `prefix` from this node.
    pub fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = self;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?.as_ref();
        }
        Some(node)
    }

    /// Check whether the trie contains exactly the given word.
    ///
    /// Returns `false` for the empty string and for paths that exist only as
    /// a prefix of longer words.
    pub fn contains_word(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.find(word).is_some_and(|node| node.word.is_some())
    }

    /// All stored words starting with `prefix`, shortest first.
    ///
    /// Returns an empty list when the prefix path does not exist. The word
    /// equal to `prefix` itself is included when stored.
    pub fn matches_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.matches_with_prefix_ordered(prefix, TraversalOrder::BreadthFirst)
    }

    /// Like [`matches_with_prefix`](Self::matches_with_prefix) with an explicit
    /// traversal order.
    pub fn matches_with_prefix_ordered(&self, prefix: &str, order: TraversalOrder) -> Vec<String> {
        let Some(start) = self.find(prefix) else {
            return Vec::new();
        };

        let mut words = Vec::new();
        match order {
            TraversalOrder::BreadthFirst => {
                let mut queue = VecDeque::from([start]);
                while let Some(node) = queue.pop_front() {
                    if let Some(w) = &node.word {
                        words.push(w.clone());
                    }
                    queue.extend(node.children.values().map(|c| c.as_ref()));
                }
            }
            TraversalOrder::DepthFirst => {
                let mut stack = vec![start];
                while let Some(node) = stack.pop() {
                    if let Some(w) = &node.word {
                        words.push(w.clone());
                    }
                    // reversed so the smallest label is popped first
                    stack.extend(node.children.values().rev().map(|c| c.as_ref()));
                }
            }
        }
        words
    }

    /// Number of words stored under this node (including itself).
    pub fn len(&self) -> usize {
        let own = usize::from(self.word.is_some());
        own + self.children.values().map(|c| c.len()).sum::<usize>()
    }

    /// Whether no word is stored under this node.
    pub fn is_empty(&self) -> bool {
        self.word.is_none() && self.children.values().all(|c| c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrieNode {
        let mut trie = TrieNode::new();
        for w in ["tea", "ted", "ten", "to", "tom", "stan", "standard", "t"] {
            trie.insert(w);
        }
        trie
    }

    #[test]
    fn test_basic_insert_and_contains() {
        let trie = sample();
        assert!(trie.contains_word("tea"));
        assert!(trie.contains_word("t"));
        assert!(trie.contains_word("standard"));
        assert!(!trie.contains_word("te"));
        assert!(!trie.contains_word("sta"));
        assert!(!trie.contains_word("tomato"));
        assert!(!trie.contains_word(""));
    }

    #[test]
    fn test_insert_reports_new_words() {
        let mut trie = TrieNode::new();
        assert!(trie.insert("ཀ"));
        assert!(!trie.insert("ཀ"));
        assert!(!trie.insert(""));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_labels_and_words_follow_path() {
        let trie = sample();
        let node = trie.find("te").unwrap();
        assert_eq!(node.label(), Some('e'));
        assert_eq!(node.word(), None);
        assert_eq!(trie.find("ted").unwrap().word(), Some("ted"));
        assert_eq!(trie.label(), None);
    }

    #[test]
    fn test_breadth_first_is_shortest_first() {
        let trie = sample();
        assert_eq!(
            trie.matches_with_prefix("t"),
            vec!["t", "to", "tea", "ted", "ten", "tom"]
        );
    }

    #[test]
    fn test_depth_first_walks_subtrees() {
        let trie = sample();
        assert_eq!(
            trie.matches_with_prefix_ordered("t", TraversalOrder::DepthFirst),
            vec!["t", "tea", "ted", "ten", "to", "tom"]
        );
    }

    #[test]
    fn test_prefix_includes_exact_word() {
        let trie = sample();
        assert_eq!(trie.matches_with_prefix("stan"), vec!["stan", "standard"]);
    }

    #[test]
    fn test_missing_prefix_is_empty() {
        let trie = sample();
        assert!(trie.matches_with_prefix("x").is_empty());
        assert!(trie.matches_with_prefix("teak").is_empty());
    }

    #[test]
    fn test_empty_prefix_lists_everything() {
        let mut trie = TrieNode::new();
        trie.insert("bcd");
        assert_eq!(trie.matches_with_prefix(""), vec!["bcd"]);
        assert!(TrieNode::new().matches_with_prefix("").is_empty());
    }

    #[test]
    fn test_tibetan_stacks() {
        let mut trie = TrieNode::new();
        trie.insert("\u{0f66}\u{0f90}");
        trie.insert("\u{0f66}\u{0f90}\u{0f51}");
        trie.insert("\u{0f66}");

        assert!(trie.contains_word("\u{0f66}\u{0f90}"));
        assert_eq!(
            trie.matches_with_prefix("\u{0f66}"),
            vec!["\u{0f66}", "\u{0f66}\u{0f90}", "\u{0f66}\u{0f90}\u{0f51}"]
        );
    }

    #[test]
    fn test_len_and_is_empty() {
        let trie = sample();
        assert_eq!(trie.len(), 8);
        assert!(!trie.is_empty());
        assert!(TrieNode::new().is_empty());
        assert_eq!(trie.find("te").unwrap().len(), 3);
    }
}
