//! Prediction index over the primary and extension dictionaries.
//!
//! The primary trie holds letters and words, the extension trie holds
//! association suggestions. A prediction is the primary matches followed by
//! the extension matches, without de-duplication.
//!
//! The index is built once and read-only afterwards, so it can be shared by
//! reference (`Arc<PredictionIndex>`) between sessions.

use crate::dictionary::WordLists;
use crate::trie::{TraversalOrder, TrieNode};
use std::fmt;

/// Which dictionary source a word came from (used for diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSource {
    Letters,
    Words,
    Extensions,
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WordSource::Letters => "letter",
            WordSource::Words => "word",
            WordSource::Extensions => "extend",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PredictionIndex {
    primary: TrieNode,
    extension: TrieNode,
    order: TraversalOrder,
}

impl PredictionIndex {
    /// Create an empty index with breadth-first ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index that walks matches in the given order.
    pub fn with_order(order: TraversalOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Build an index from loaded word lists.
    ///
    /// `letters` and `words` are merged into the primary trie in that order,
    /// `extensions` go to the extension trie.
    pub fn from_word_lists(lists: &WordLists, order: TraversalOrder) -> Self {
        let mut index = Self::with_order(order);
        let sources = [
            (WordSource::Letters, &lists.letters),
            (WordSource::Words, &lists.words),
            (WordSource::Extensions, &lists.extensions),
        ];
        for (source, words) in sources {
            for word in words {
                index.insert(source, word);
            }
        }
        tracing::debug!(
            primary = index.primary.len(),
            extension = index.extension.len(),
            "built prediction index"
        );
        index
    }

    /// Insert one word into the trie its source belongs to.
    ///
    /// Returns `true` if the word was new to that trie. Duplicates are kept as
    /// a single entry and reported.
    pub fn insert(&mut self, source: WordSource, word: &str) -> bool {
        let trie = match source {
            WordSource::Letters | WordSource::Words => &mut self.primary,
            WordSource::Extensions => &mut self.extension,
        };
        let inserted = trie.insert(word);
        if !inserted && !word.is_empty() {
            tracing::warn!(%source, word, "duplicate dictionary entry");
        }
        inserted
    }

    /// Candidates for `prefix`: primary matches, then extension matches.
    pub fn predict(&self, prefix: &str) -> Vec<String> {
        let mut candidates = self.primary.matches_with_prefix_ordered(prefix, self.order);
        candidates.extend(self.extension.matches_with_prefix_ordered(prefix, self.order));
        candidates
    }

    pub fn primary(&self) -> &TrieNode {
        &self.primary
    }

    pub fn extension(&self) -> &TrieNode {
        &self.extension
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }
}
