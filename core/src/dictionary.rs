//! Dictionary word lists.
//!
//! A dictionary is made of three plain-text sources, each UTF-8 with one word
//! per line:
//! - `letters`: base glyphs and letters (primary dictionary)
//! - `words`: multi-character words (primary dictionary)
//! - `extensions`: association suggestions (separate extension dictionary)
//!
//! The lists are kept in file order. Duplicates are not removed here; the
//! `PredictionIndex` reports them when it builds its tries.
//!
//! `WordLists` can also be stored as a compiled bincode snapshot so the text
//! files do not have to be re-read on every start.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// File names of the three dictionary sources inside a dictionary directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryFiles {
    pub letters: String,
    pub words: String,
    pub extensions: String,
}

impl Default for DictionaryFiles {
    fn default() -> Self {
        Self {
            letters: "letter.txt".to_string(),
            words: "word.txt".to_string(),
            extensions: "extend.txt".to_string(),
        }
    }
}

/// The three word lists a `PredictionIndex` is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLists {
    pub letters: Vec<String>,
    pub words: Vec<String>,
    pub extensions: Vec<String>,
}

impl WordLists {
    /// Create empty word lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all three sources from `dir` using the given file names.
    pub fn load_dir<P: AsRef<Path>>(dir: P, files: &DictionaryFiles) -> Result<Self> {
        let dir = dir.as_ref();
        let lists = Self {
            letters: read_word_file(dir.join(&files.letters))?,
            words: read_word_file(dir.join(&files.words))?,
            extensions: read_word_file(dir.join(&files.extensions))?,
        };
        tracing::info!(
            dir = %dir.display(),
            letters = lists.letters.len(),
            words = lists.words.len(),
            extensions = lists.extensions.len(),
            "loaded dictionary word lists"
        );
        Ok(lists)
    }

    /// Save the lists as a bincode snapshot.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("create snapshot {}", path.display()))?;
        bincode::serialize_into(BufWriter::new(file), self)
            .with_context(|| format!("write snapshot {}", path.display()))?;
        Ok(())
    }

    /// Load lists from a snapshot produced by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("open snapshot {}", path.display()))?;
        let lists: Self = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("decode snapshot {}", path.display()))?;
        Ok(lists)
    }

    /// Total number of entries across the three lists.
    pub fn len(&self) -> usize {
        self.letters.len() + self.words.len() + self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read one word-per-line UTF-8 file.
fn read_word_file(path: PathBuf) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("read dictionary file {}", path.display()))?;
    Ok(parse_word_lines(&content))
}

/// Split text into words: trims every line, drops a leading BOM and skips
/// blank lines.
pub fn parse_word_lines(content: &str) -> Vec<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
