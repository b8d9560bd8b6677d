//! libtibetan-core
//!
//! Language-agnostic building blocks of the Tibetan input engine: the prefix
//! dictionary, prediction merging, candidate paging, the composition buffer,
//! host key events and the outbound host interface.
//!
//! Public API:
//! - `TrieNode` - Character-indexed prefix tree
//! - `PredictionIndex` - Primary and extension dictionaries merged into one candidate list
//! - `WordLists` - Dictionary sources loaded from text files or a bincode snapshot
//! - `Engine` - Per-session prediction front end with an LRU cache
//! - `CandidateList` - Paginated candidates with an absolute cursor
//! - `ImeSession` - Composition buffer and candidates of one session
//! - `KeyEvent` - Host key event value
//! - `TextServiceHost` / `ImeContext` - Outbound host interface and its default recorder
//! - `Config` - Configuration and feature flags

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub mod trie;
pub use trie::{TraversalOrder, TrieNode};

pub mod dictionary;
pub use dictionary::{DictionaryFiles, WordLists};

pub mod prediction;
pub use prediction::{PredictionIndex, WordSource};

pub mod engine;
pub use engine::Engine;

pub mod candidate;
pub use candidate::{CandidateList, DEFAULT_PAGE_SIZE};

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod key_event;
pub use key_event::{vk, KeyEvent, KeyPhase, ModifierKeys, ToggleKeys};

pub mod context;
pub use context::{hotkey_mod, Hotkey, ImeContext, TextServiceHost};

pub mod session;
pub use session::ImeSession;

/// Generic configuration for IME core functionality.
///
/// Language-specific options (keymaps, trigger keys) belong in the language
/// crate's config, which flattens this one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Candidates shown per page (at least 1)
    pub page_size: usize,

    /// Maximum number of entries in the prefix -> candidates cache (0 disables it)
    pub max_cache_size: usize,

    /// Commit immediately when a prediction yields exactly one candidate
    pub auto_commit_single_candidate: bool,

    /// Order of matches under a prefix
    pub candidate_order: TraversalOrder,

    /// Dictionary source file names
    pub dictionary: DictionaryFiles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_cache_size: 256,
            // single matches are shown for confirmation
            auto_commit_single_candidate: false,
            candidate_order: TraversalOrder::BreadthFirst,
            dictionary: DictionaryFiles::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config {}", path.display()))
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Page size with the lower bound applied.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("page_size = 5\ncandidate_order = \"depth-first\"\n").unwrap();
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.candidate_order, TraversalOrder::DepthFirst);
        assert_eq!(cfg.max_cache_size, 256);
        assert!(!cfg.auto_commit_single_candidate);
        assert_eq!(cfg.dictionary.words, "word.txt");
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = Config::default();
        cfg.auto_commit_single_candidate = true;
        cfg.dictionary.extensions = "assoc.txt".into();
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = Config::load_toml(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("missing.toml"));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "page_size = \"many\"\n").unwrap();
        let err = Config::load_toml(&bad).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn page_size_lower_bound() {
        let cfg = Config {
            page_size: 0,
            ..Config::default()
        };
        assert_eq!(cfg.effective_page_size(), 1);
    }
}
