//! Tibetan-specific configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `libtibetan_core::Config` (flattened via serde)
//! - The stacking trigger key
//! - The language mode a new session starts in
//! - Whether alt-ctrl-shift keys are registered as preserved keys
//!
//! # Example
//!
//! ```rust
//! use libtibetan::TibetanConfig;
//!
//! let config = TibetanConfig::from_toml_str("page_size = 5\nstack_trigger = \"m\"\n").unwrap();
//! assert_eq!(config.base().page_size, 5);
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Whether keys are translated to Tibetan or passed through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    #[default]
    Tibetan,
    English,
}

impl LanguageMode {
    pub fn toggled(self) -> Self {
        match self {
            LanguageMode::Tibetan => LanguageMode::English,
            LanguageMode::English => LanguageMode::Tibetan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TibetanConfig {
    /// Base configuration fields (page size, cache, candidate order, dictionary files)
    #[serde(flatten)]
    pub base: libtibetan_core::Config,

    /// Key that arms the stacking layer
    pub stack_trigger: char,

    pub initial_mode: LanguageMode,

    /// Register alt-ctrl-shift keys as host hotkeys on activation
    pub register_preserved_keys: bool,
}

impl Default for TibetanConfig {
    fn default() -> Self {
        Self {
            base: libtibetan_core::Config::default(),
            stack_trigger: 'm',
            initial_mode: LanguageMode::Tibetan,
            register_preserved_keys: true,
        }
    }
}

impl TibetanConfig {
    pub fn into_base(self) -> libtibetan_core::Config {
        self.base
    }

    pub fn base(&self) -> &libtibetan_core::Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut libtibetan_core::Config {
        &mut self.base
    }

    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).with_context(|| format!("failed to write config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
