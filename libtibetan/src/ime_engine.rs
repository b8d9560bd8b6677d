//! Tibetan composition controller.
//!
//! `ImeEngine` owns the per-session state (composition buffer, candidates,
//! stacking modifier, language mode) and drives a `TextServiceHost`. The
//! prediction index is shared through an `Arc` and never mutated, so several
//! sessions can be built over one loaded dictionary.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, debug_span, warn};

use libtibetan_core::{
    vk, Engine, ImeContext, ImeSession, KeyEvent, PredictionIndex, TextServiceHost, WordLists,
};

use crate::config::{LanguageMode, TibetanConfig};
use crate::keymap::KeyTranslator;
use crate::modifier::ModifierState;
use crate::preserved_key::{parse_preserved_key_id, preserved_keys, PRESERVED_KEY_MODIFIERS};

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the IME
    Handled,
    /// Key was not handled (pass through to application)
    NotHandled,
}

impl From<bool> for KeyResult {
    fn from(consumed: bool) -> Self {
        if consumed {
            KeyResult::Handled
        } else {
            KeyResult::NotHandled
        }
    }
}

/// Tibetan IME session over a host text service.
pub struct ImeEngine<H: TextServiceHost = ImeContext> {
    predictor: Engine,
    translator: KeyTranslator,
    session: ImeSession,
    modifier: ModifierState,
    mode: LanguageMode,
    config: TibetanConfig,
    host: H,
    active: bool,
}

impl ImeEngine<ImeContext> {
    /// Create an engine with default configuration that records into an `ImeContext`.
    pub fn new(index: Arc<PredictionIndex>) -> Self {
        Self::with_config(index, TibetanConfig::default())
    }

    pub fn with_config(index: Arc<PredictionIndex>, config: TibetanConfig) -> Self {
        Self::with_host(index, config, ImeContext::new())
    }

    /// Get a reference to the context for reading IME state.
    pub fn context(&self) -> &ImeContext {
        &self.host
    }

    pub fn context_mut(&mut self) -> &mut ImeContext {
        &mut self.host
    }
}

impl<H: TextServiceHost> ImeEngine<H> {
    pub fn with_host(index: Arc<PredictionIndex>, config: TibetanConfig, host: H) -> Self {
        Self {
            predictor: Engine::new(index, config.base.max_cache_size),
            translator: KeyTranslator::new(),
            session: ImeSession::with_page_size(config.base.effective_page_size()),
            modifier: ModifierState::Inactive,
            mode: config.initial_mode,
            config,
            host,
            active: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn session(&self) -> &ImeSession {
        &self.session
    }

    pub fn modifier_state(&self) -> ModifierState {
        self.modifier
    }

    pub fn config(&self) -> &TibetanConfig {
        &self.config
    }

    /// Prediction front end (cache statistics live here).
    pub fn predictor(&self) -> &Engine {
        &self.predictor
    }

    pub fn translator(&self) -> &KeyTranslator {
        &self.translator
    }

    pub fn language_mode(&self) -> LanguageMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_composing(&self) -> bool {
        self.session.is_composing()
    }

    /// Switch language mode. A composition in progress is committed as typed.
    pub fn set_language_mode(&mut self, mode: LanguageMode) {
        if mode == self.mode {
            return;
        }
        if self.is_composing() {
            let text = self.session.input_buffer().text().to_string();
            self.commit_composition(&text);
        }
        self.modifier.reset();
        debug!(?mode, "language mode");
        self.mode = mode;
    }

    pub fn toggle_language_mode(&mut self) -> LanguageMode {
        self.set_language_mode(self.mode.toggled());
        self.mode
    }

    /// Start a session: reset state and register the preserved keys.
    pub fn on_activate(&mut self) {
        debug!("activate");
        self.active = true;
        self.session.clear();
        self.modifier.reset();
        if self.config.register_preserved_keys {
            for key in preserved_keys(&self.translator) {
                self.host.register_hotkey(key.key_code, PRESERVED_KEY_MODIFIERS, &key.id);
            }
        }
        self.session.sync_to_host(&mut self.host);
    }

    /// End a session. Any composition is discarded.
    pub fn on_deactivate(&mut self) {
        debug!("deactivate");
        if self.config.register_preserved_keys {
            for key in preserved_keys(&self.translator) {
                self.host.unregister_hotkey(&key.id);
            }
        }
        self.session.clear();
        self.modifier.reset();
        self.session.sync_to_host(&mut self.host);
        self.active = false;
    }

    /// Decide whether a key should be routed to [`on_key`](Self::on_key).
    pub fn should_intercept(&self, event: &KeyEvent) -> bool {
        if self.is_composing() {
            return true;
        }
        if !event.is_key_down() {
            return false;
        }

        let tibetan = self.mode == LanguageMode::Tibetan;
        let keys = &event.modifiers;

        // Alt chords are application shortcuts, except the alt-ctrl-shift layer
        if keys.alt() {
            return keys.alt_ctrl_shift() && tibetan;
        }
        if keys.ctrl() {
            return tibetan && event.is_printable_char();
        }
        if keys.shift() && tibetan && event.is_printable_char() && event.key_code != vk::SPACE {
            return true;
        }
        if event.toggles.num_lock && event.is_numpad() {
            return false;
        }
        if !tibetan {
            return false;
        }
        // caps lock types ASCII letters and leaves other keys to the app
        if event.toggles.caps_lock {
            return event.is_alpha_char();
        }
        event.is_printable_char() && event.key_code != vk::SPACE
    }

    /// Filter and handle a key in one call.
    pub fn process_key(&mut self, event: &KeyEvent) -> KeyResult {
        self.host.begin_key_event();
        if !self.should_intercept(event) {
            return KeyResult::NotHandled;
        }
        self.on_key(event).into()
    }

    /// Handle an admitted key. Returns whether the key was consumed.
    pub fn on_key(&mut self, event: &KeyEvent) -> bool {
        self.host.begin_key_event();
        if !event.is_key_down() {
            return self.is_composing();
        }

        let _span = debug_span!(
            "on_key",
            key_code = event.key_code,
            char_code = event.char_code,
            modifier = ?self.modifier
        )
        .entered();

        let consumed = match self.handle_candidate_key(event) {
            Some(consumed) => consumed,
            None if self.is_stack_trigger(event) => {
                self.modifier.arm(event.modifiers.shift());
                debug!(state = ?self.modifier, "stacking armed");
                return true;
            }
            None => self.handle_composition_key(event),
        };

        // the stacking modifier is one-shot
        if types_character(event) {
            self.modifier.reset();
        }
        consumed
    }

    /// Handle a preserved-key hotkey fired by the host.
    ///
    /// The identifier is decoded into its key and re-dispatched as an
    /// Alt+Ctrl+Shift key press. Unknown identifiers are ignored, and so is
    /// every hotkey in English mode.
    pub fn on_preserved_key_triggered(&mut self, id: &str) -> bool {
        if self.mode == LanguageMode::English {
            debug!(id, "preserved key in English mode");
            return false;
        }
        let key = match parse_preserved_key_id(id) {
            Ok(key) => key,
            Err(err) => {
                warn!(id, %err, "ignoring preserved key");
                return false;
            }
        };
        let Some(key_code) = KeyEvent::key_code_for(key) else {
            warn!(id, %key, "preserved key has no key code");
            return false;
        };

        let event = KeyEvent {
            key_code,
            char_code: key as u32,
            ..KeyEvent::default()
        }
        .with_alt_ctrl_shift();
        debug!(%key, "preserved key");
        self.on_key(&event)
    }

    /// Send `text` to the application and return to idle.
    pub fn commit_composition(&mut self, text: &str) {
        debug!(text, "commit");
        if !text.is_empty() {
            self.host.commit_text(text);
        }
        self.session.clear();
        self.modifier.reset();
        self.session.sync_to_host(&mut self.host);
    }

    /// Keys handled while a candidate list is open. `None` lets the key fall
    /// through to composition handling.
    fn handle_candidate_key(&mut self, event: &KeyEvent) -> Option<bool> {
        if self.session.candidates().is_empty() {
            return None;
        }

        match event.key_code {
            vk::ESCAPE => {
                self.commit_composition("");
                Some(true)
            }
            vk::KEY_0..=vk::KEY_9 => {
                let digit = (event.key_code - vk::KEY_0) as usize;
                let slot = if digit == 0 { 9 } else { digit - 1 };
                match self.session.candidates().candidate_on_page(slot) {
                    Some(text) => {
                        let text = text.to_string();
                        self.commit_composition(&text);
                        Some(true)
                    }
                    None => {
                        debug!(slot, "no candidate in slot");
                        Some(false)
                    }
                }
            }
            vk::LEFT | vk::RIGHT | vk::UP | vk::DOWN => {
                let list = self.session.candidates_mut();
                match event.key_code {
                    vk::LEFT => list.move_left(),
                    vk::RIGHT => list.move_right(),
                    vk::UP => list.page_up(),
                    _ => list.page_down(),
                };
                self.session.sync_candidates(&mut self.host);
                Some(true)
            }
            _ => None,
        }
    }

    fn is_stack_trigger(&self, event: &KeyEvent) -> bool {
        let keys = &event.modifiers;
        !self.modifier.is_pending()
            && !keys.ctrl()
            && !keys.alt()
            && !(event.toggles.caps_lock && event.is_alpha_char())
            && event.base_char() == Some(self.config.stack_trigger)
    }

    fn handle_composition_key(&mut self, event: &KeyEvent) -> bool {
        let buffer_empty = self.session.input_buffer().is_empty();

        match event.key_code {
            vk::RETURN | vk::SPACE => {
                let text = match self.session.candidates().selected_candidate() {
                    Some(candidate) => candidate.to_string(),
                    None => self.session.input_buffer().text().to_string(),
                };
                if text.is_empty() {
                    return false;
                }
                self.commit_composition(&text);
                true
            }
            vk::BACK => {
                if buffer_empty {
                    return false;
                }
                self.session.input_buffer_mut().pop();
                if self.session.input_buffer().is_empty() {
                    self.commit_composition("");
                } else {
                    self.update_candidates();
                }
                true
            }
            vk::ESCAPE => {
                if !self.is_composing() {
                    return false;
                }
                self.commit_composition("");
                true
            }
            _ if !types_character(event) => self.is_composing(),
            _ => self.handle_char(event),
        }
    }

    fn handle_char(&mut self, event: &KeyEvent) -> bool {
        let literal = event
            .char()
            .filter(|_| event.is_printable_char())
            .or_else(|| event.base_char());

        let translated = if self.mode == LanguageMode::English
            || (event.toggles.caps_lock && event.is_alpha_char())
        {
            None
        } else {
            let layer = self.modifier.layer_for(&event.modifiers);
            event
                .base_char()
                .or(literal)
                .and_then(|key| self.translator.get_key(key, layer))
        };

        match translated {
            Some(ch) => {
                debug!(%ch, "translated");
                self.modifier.reset();
                self.session.input_buffer_mut().push(ch);
                self.update_candidates();
            }
            None => {
                let mut text = self.session.input_buffer().text().to_string();
                text.extend(literal);
                self.commit_composition(&text);
            }
        }
        true
    }

    /// Re-run prediction for the current buffer.
    fn update_candidates(&mut self) {
        let prefix = self.session.input_buffer().text().to_string();
        let candidates = self.predictor.predict(&prefix);
        debug!(prefix, count = candidates.len(), "predicted");

        match candidates.len() {
            0 => self.commit_composition(&prefix),
            1 if self.config.base.auto_commit_single_candidate => {
                self.commit_composition(&candidates[0]);
            }
            _ => {
                self.session.candidates_mut().set_candidates(candidates);
                self.session.sync_to_host(&mut self.host);
            }
        }
    }
}

/// Printable keys, plus alt-ctrl-shift chords for which hosts often report
/// no character.
fn types_character(event: &KeyEvent) -> bool {
    event.is_printable_char() || (event.modifiers.alt_ctrl_shift() && event.base_char().is_some())
}

/// Build the shared prediction index from text word lists in `dict_dir`, or
/// from a compiled bincode snapshot when one is given.
pub fn load_prediction_index(
    dict_dir: &Path,
    snapshot: Option<&Path>,
    config: &TibetanConfig,
) -> anyhow::Result<Arc<PredictionIndex>> {
    let lists = match snapshot {
        Some(path) => WordLists::load_bincode(path)?,
        None => WordLists::load_dir(dict_dir, &config.base.dictionary)
            .with_context(|| format!("failed to load dictionaries from {}", dict_dir.display()))?,
    };
    Ok(Arc::new(PredictionIndex::from_word_lists(
        &lists,
        config.base.candidate_order,
    )))
}

/// Load the dictionaries and create an engine recording into an `ImeContext`.
pub fn create_ime_engine(
    dict_dir: &Path,
    snapshot: Option<&Path>,
    config: TibetanConfig,
) -> anyhow::Result<ImeEngine> {
    let index = load_prediction_index(dict_dir, snapshot, &config)?;
    Ok(ImeEngine::with_config(index, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::KeyLayer;

    fn engine_with(words: &[&str]) -> ImeEngine {
        let mut index = PredictionIndex::new();
        for w in words {
            index.insert(libtibetan_core::WordSource::Words, w);
        }
        let mut engine = ImeEngine::new(Arc::new(index));
        engine.on_activate();
        engine
    }

    fn key(ch: char) -> KeyEvent {
        KeyEvent::from_ascii(ch).unwrap()
    }

    #[test]
    fn translated_key_opens_candidates() {
        let mut ime = engine_with(&["\u{0f40}", "\u{0f40}\u{0f74}"]);
        assert_eq!(ime.process_key(&key('c')), KeyResult::Handled);
        assert_eq!(ime.context().preedit_text, "\u{0f40}");
        assert_eq!(ime.context().candidates.len(), 2);
        assert!(ime.context().candidates_visible);
    }

    #[test]
    fn stacking_trigger_selects_stack_layer() {
        let mut ime = engine_with(&["\u{0f66}\u{0f90}"]);
        ime.process_key(&key('s'));
        assert!(ime.process_key(&key('m')) == KeyResult::Handled);
        assert_eq!(ime.modifier_state(), ModifierState::PendingStack);
        assert_eq!(ime.context().preedit_text, "\u{0f66}");

        ime.process_key(&key('c'));
        assert_eq!(ime.modifier_state(), ModifierState::Inactive);
        assert_eq!(ime.session().input_buffer().text(), "\u{0f66}\u{0f90}");
    }

    #[test]
    fn second_trigger_translates_through_stack_layer() {
        let mut ime = engine_with(&["\u{0f85}"]);
        ime.process_key(&key('m'));
        ime.process_key(&key('m'));
        assert_eq!(ime.modifier_state(), ModifierState::Inactive);
        assert_eq!(ime.context().preedit_text, "\u{0f85}");
        assert_eq!(
            ime.translator().get_key('m', KeyLayer::Stack),
            Some('\u{0f85}')
        );
    }

    #[test]
    fn return_with_nothing_composed_passes_through() {
        let mut ime = engine_with(&[]);
        assert!(!ime.on_key(&KeyEvent::special(vk::RETURN)));
        assert!(!ime.on_key(&KeyEvent::special(vk::BACK)));
        assert!(!ime.on_key(&KeyEvent::special(vk::SPACE)));
    }

    #[test]
    fn mode_switch_commits_buffer() {
        let mut ime = engine_with(&["\u{0f40}\u{0f74}"]);
        ime.process_key(&key('c'));
        assert!(ime.is_composing());

        assert_eq!(ime.toggle_language_mode(), LanguageMode::English);
        assert_eq!(ime.context().commit_text, "\u{0f40}");
        assert!(!ime.is_composing());
        assert_eq!(ime.process_key(&key('c')), KeyResult::NotHandled);
    }
}
