//! libtibetan crate root
//!
//! This crate provides the Tibetan keyboard layers, the stacking modifier,
//! preserved-key identifiers and the `ImeEngine` composition controller built
//! on the shared `libtibetan-core` types.
//!
//! Public API exported here:
//! - `KeyLayer` and `KeyTranslator` from `keymap`
//! - `ModifierState` from `modifier`
//! - `ImeEngine`, `KeyResult` and the loaders from `ime_engine`
//! - `TibetanConfig` and `LanguageMode` from `config`

pub mod config;
pub mod ime_engine;
pub mod keymap;
pub mod modifier;
pub mod preserved_key;

// Re-export the core types callers need to drive an engine.
pub use libtibetan_core::{
    hotkey_mod, vk, CandidateList, Config, Engine, ImeContext, ImeSession, InputBuffer, KeyEvent,
    KeyPhase, ModifierKeys, PredictionIndex, TextServiceHost, ToggleKeys, TraversalOrder,
    WordLists, WordSource,
};

pub use config::{LanguageMode, TibetanConfig};
pub use ime_engine::{create_ime_engine, load_prediction_index, ImeEngine, KeyResult};
pub use keymap::{KeyLayer, KeyTranslator};
pub use modifier::ModifierState;
pub use preserved_key::{
    parse_preserved_key_id, preserved_key_id, preserved_keys, PreservedKey, PreservedKeyError,
    PRESERVED_KEY_MODIFIERS,
};
