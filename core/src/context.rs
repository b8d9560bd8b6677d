//! Outbound host interface.
//!
//! The engine reports every UI change through `TextServiceHost`. `ImeContext`
//! is the default host: a plain data container with public fields that the
//! platform reads after each key event to update preedit, candidates and
//! commit text.

use serde::Serialize;

/// Hotkey modifier bits used with `register_hotkey`.
pub mod hotkey_mod {
    pub const ALT: u32 = 0x0001;
    pub const CONTROL: u32 = 0x0002;
    pub const SHIFT: u32 = 0x0004;
}

/// Operations the engine performs on its host text service.
pub trait TextServiceHost {
    /// Replace the composition (preedit) text.
    fn set_composition_text(&mut self, text: &str);

    /// Move the composition cursor (in characters).
    fn set_composition_cursor(&mut self, pos: usize);

    /// Replace the visible candidate page.
    fn set_candidate_list(&mut self, items: &[String]);

    fn set_candidates_visible(&mut self, visible: bool);

    /// Highlight a candidate within the visible page.
    fn set_candidate_cursor(&mut self, pos: usize);

    /// Send finished text to the application.
    fn commit_text(&mut self, text: &str);

    /// Register a global hotkey that reaches the engine even when idle.
    fn register_hotkey(&mut self, char_code: u32, modifiers: u32, id: &str);

    fn unregister_hotkey(&mut self, id: &str);

    /// Called before the engine handles a key event.
    fn begin_key_event(&mut self) {}

    /// Optional hint text (page indicator).
    fn set_auxiliary_text(&mut self, _text: &str) {}
}

/// A registered global hotkey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hotkey {
    pub char_code: u32,
    pub modifiers: u32,
    pub id: String,
}

/// IME context for platform communication.
///
/// After processing a key event, the platform reads these fields to update
/// the UI.
///
/// # Fields
///
/// - `preedit_text`: Text being composed (displayed with underline)
/// - `preedit_cursor`: Cursor position within preedit (characters)
/// - `commit_text`: Text committed by the last key event
/// - `candidates`: Candidates on the visible page
/// - `candidates_visible`: Whether the candidate window is shown
/// - `candidate_cursor`: Highlighted candidate within the page (0-based)
/// - `auxiliary_text`: Page indicator such as "2/3"
/// - `hotkeys`: Hotkeys currently registered by the engine
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImeContext {
    pub preedit_text: String,
    pub preedit_cursor: usize,
    pub commit_text: String,
    pub candidates: Vec<String>,
    pub candidates_visible: bool,
    pub candidate_cursor: usize,
    pub auxiliary_text: String,
    pub hotkeys: Vec<Hotkey>,
}

impl ImeContext {
    /// Create a new empty IME context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    /// Check if there's any visible state (preedit or candidates).
    pub fn has_visible_state(&self) -> bool {
        !self.preedit_text.is_empty() || self.candidates_visible
    }

    /// Check if there's text to commit.
    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }

    /// The highlighted candidate, if the window is shown.
    pub fn highlighted_candidate(&self) -> Option<&str> {
        if !self.candidates_visible {
            return None;
        }
        self.candidates.get(self.candidate_cursor).map(String::as_str)
    }
}

impl TextServiceHost for ImeContext {
    fn set_composition_text(&mut self, text: &str) {
        self.preedit_text = text.to_string();
    }

    fn set_composition_cursor(&mut self, pos: usize) {
        self.preedit_cursor = pos;
    }

    fn set_candidate_list(&mut self, items: &[String]) {
        self.candidates = items.to_vec();
    }

    fn set_candidates_visible(&mut self, visible: bool) {
        self.candidates_visible = visible;
    }

    fn set_candidate_cursor(&mut self, pos: usize) {
        self.candidate_cursor = pos;
    }

    fn commit_text(&mut self, text: &str) {
        self.commit_text.push_str(text);
    }

    fn register_hotkey(&mut self, char_code: u32, modifiers: u32, id: &str) {
        self.hotkeys.retain(|h| h.id != id);
        self.hotkeys.push(Hotkey {
            char_code,
            modifiers,
            id: id.to_string(),
        });
    }

    fn unregister_hotkey(&mut self, id: &str) {
        self.hotkeys.retain(|h| h.id != id);
    }

    fn begin_key_event(&mut self) {
        self.commit_text.clear();
    }

    fn set_auxiliary_text(&mut self, text: &str) {
        self.auxiliary_text = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_accumulates_until_next_key() {
        let mut ctx = ImeContext::new();
        ctx.commit_text("ཀ");
        ctx.commit_text("་");
        assert_eq!(ctx.commit_text, "ཀ་");
        assert!(ctx.has_commit());

        assert_eq!(ctx.take_commit(), "ཀ་");
        assert!(!ctx.has_commit());

        ctx.commit_text("ཁ");
        ctx.begin_key_event();
        assert!(!ctx.has_commit());
    }

    #[test]
    fn hotkeys_register_once_per_id() {
        let mut ctx = ImeContext::new();
        ctx.register_hotkey(0x51, hotkey_mod::ALT, "q");
        ctx.register_hotkey(0x51, hotkey_mod::ALT | hotkey_mod::SHIFT, "q");
        assert_eq!(ctx.hotkeys.len(), 1);
        assert_eq!(ctx.hotkeys[0].modifiers, 0x5);

        ctx.unregister_hotkey("q");
        assert!(ctx.hotkeys.is_empty());
    }

    #[test]
    fn highlighted_candidate_requires_visibility() {
        let mut ctx = ImeContext::new();
        ctx.set_candidate_list(&["a".to_string(), "b".to_string()]);
        ctx.set_candidate_cursor(1);
        assert_eq!(ctx.highlighted_candidate(), None);

        ctx.set_candidates_visible(true);
        assert_eq!(ctx.highlighted_candidate(), Some("b"));

        ctx.set_candidates_visible(false);
        assert!(!ctx.has_visible_state());
    }
}
