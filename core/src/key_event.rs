//! Host key events.
//!
//! A `KeyEvent` is a fixed-shape value delivered by the host text service for
//! every key press or release: the virtual key code, the character the host
//! layout produced for it, and the modifier and toggle key states.

/// Virtual-key codes used by the engine.
pub mod vk {
    pub const BACK: u32 = 0x08;
    pub const TAB: u32 = 0x09;
    pub const RETURN: u32 = 0x0D;
    pub const ESCAPE: u32 = 0x1B;
    pub const SPACE: u32 = 0x20;
    pub const LEFT: u32 = 0x25;
    pub const UP: u32 = 0x26;
    pub const RIGHT: u32 = 0x27;
    pub const DOWN: u32 = 0x28;
    pub const DELETE: u32 = 0x2E;
    pub const KEY_0: u32 = 0x30;
    pub const KEY_9: u32 = 0x39;
    pub const KEY_A: u32 = 0x41;
    pub const KEY_Z: u32 = 0x5A;
    pub const NUMPAD0: u32 = 0x60;
    pub const DIVIDE: u32 = 0x6F;
    pub const OEM_1: u32 = 0xBA;
    pub const OEM_PLUS: u32 = 0xBB;
    pub const OEM_COMMA: u32 = 0xBC;
    pub const OEM_MINUS: u32 = 0xBD;
    pub const OEM_PERIOD: u32 = 0xBE;
    pub const OEM_2: u32 = 0xBF;
    pub const OEM_3: u32 = 0xC0;
    pub const OEM_4: u32 = 0xDB;
    pub const OEM_5: u32 = 0xDC;
    pub const OEM_6: u32 = 0xDD;
    pub const OEM_7: u32 = 0xDE;
}

/// US layout for the non-letter character keys: (key code, plain, shifted).
const US_SYMBOL_KEYS: [(u32, char, char); 21] = [
    (vk::OEM_3, '`', '~'),
    (0x31, '1', '!'),
    (0x32, '2', '@'),
    (0x33, '3', '#'),
    (0x34, '4', '$'),
    (0x35, '5', '%'),
    (0x36, '6', '^'),
    (0x37, '7', '&'),
    (0x38, '8', '*'),
    (0x39, '9', '('),
    (0x30, '0', ')'),
    (vk::OEM_MINUS, '-', '_'),
    (vk::OEM_PLUS, '=', '+'),
    (vk::OEM_4, '[', '{'),
    (vk::OEM_6, ']', '}'),
    (vk::OEM_5, '\\', '|'),
    (vk::OEM_1, ';', ':'),
    (vk::OEM_7, '\'', '"'),
    (vk::OEM_COMMA, ',', '<'),
    (vk::OEM_PERIOD, '.', '>'),
    (vk::OEM_2, '/', '?'),
];

/// Modifier keys held down, with left/right variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierKeys {
    pub left_shift: bool,
    pub right_shift: bool,
    pub left_ctrl: bool,
    pub right_ctrl: bool,
    pub left_alt: bool,
    pub right_alt: bool,
}

impl ModifierKeys {
    pub fn shift(&self) -> bool {
        self.left_shift || self.right_shift
    }

    pub fn ctrl(&self) -> bool {
        self.left_ctrl || self.right_ctrl
    }

    pub fn alt(&self) -> bool {
        self.left_alt || self.right_alt
    }

    /// Alt, Ctrl and Shift all held at once.
    pub fn alt_ctrl_shift(&self) -> bool {
        self.alt() && self.ctrl() && self.shift()
    }
}

/// Toggle key states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleKeys {
    pub caps_lock: bool,
    pub num_lock: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPhase {
    #[default]
    Down,
    Up,
}

/// A key event as delivered by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Virtual key code (see [`vk`])
    pub key_code: u32,
    /// Character produced by the host layout, 0 if none
    pub char_code: u32,
    pub modifiers: ModifierKeys,
    pub toggles: ToggleKeys,
    pub phase: KeyPhase,
}

impl KeyEvent {
    /// Key-down event for a key with no character (arrows, Escape, ...).
    pub fn special(key_code: u32) -> Self {
        let char_code = match key_code {
            vk::BACK | vk::TAB | vk::RETURN | vk::ESCAPE | vk::SPACE => key_code,
            _ => 0,
        };
        Self {
            key_code,
            char_code,
            ..Self::default()
        }
    }

    /// Key-down event for typing `ch` on a US keyboard.
    ///
    /// Upper-case letters and shifted symbols imply a held Shift key.
    /// Returns `None` for characters the layout cannot type.
    pub fn from_ascii(ch: char) -> Option<Self> {
        let (key_code, shift) = match ch {
            'a'..='z' => (ch.to_ascii_uppercase() as u32, false),
            'A'..='Z' => (ch as u32, true),
            ' ' => return Some(Self::special(vk::SPACE)),
            '\n' | '\r' => return Some(Self::special(vk::RETURN)),
            '\t' => return Some(Self::special(vk::TAB)),
            _ => US_SYMBOL_KEYS.iter().find_map(|&(code, plain, shifted)| {
                if ch == plain {
                    Some((code, false))
                } else if ch == shifted {
                    Some((code, true))
                } else {
                    None
                }
            })?,
        };
        let mut event = Self {
            key_code,
            char_code: ch as u32,
            ..Self::default()
        };
        event.modifiers.left_shift = shift;
        Some(event)
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.left_shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.left_ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.left_alt = true;
        self
    }

    pub fn with_alt_ctrl_shift(self) -> Self {
        self.with_alt().with_ctrl().with_shift()
    }

    pub fn with_caps_lock(mut self) -> Self {
        self.toggles.caps_lock = true;
        self
    }

    pub fn with_num_lock(mut self) -> Self {
        self.toggles.num_lock = true;
        self
    }

    pub fn key_up(mut self) -> Self {
        self.phase = KeyPhase::Up;
        self
    }

    pub fn is_key_down(&self) -> bool {
        self.phase == KeyPhase::Down
    }

    /// The produced character, if any.
    pub fn char(&self) -> Option<char> {
        if self.char_code == 0 {
            None
        } else {
            char::from_u32(self.char_code)
        }
    }

    /// Whether the event produced a printable character (space included).
    pub fn is_printable_char(&self) -> bool {
        self.char_code >= 0x20 && self.char_code != 0x7F
    }

    /// Whether the produced character is alphabetic.
    pub fn is_alpha_char(&self) -> bool {
        self.char().is_some_and(char::is_alphabetic)
    }

    /// Whether the key is on the numeric keypad (digits and operators).
    pub fn is_numpad(&self) -> bool {
        (vk::NUMPAD0..=vk::DIVIDE).contains(&self.key_code)
    }

    /// Unshifted US-layout character of the physical key.
    ///
    /// Letters come back in lower case. Keys that do not type a character
    /// return `None`.
    pub fn base_char(&self) -> Option<char> {
        match self.key_code {
            vk::KEY_A..=vk::KEY_Z => char::from_u32(self.key_code).map(|c| c.to_ascii_lowercase()),
            code => US_SYMBOL_KEYS
                .iter()
                .find(|&&(key, _, _)| key == code)
                .map(|&(_, plain, _)| plain),
        }
    }

    /// Key code of the US-layout key whose unshifted character is `ch`.
    pub fn key_code_for(ch: char) -> Option<u32> {
        match ch {
            'a'..='z' => Some(ch.to_ascii_uppercase() as u32),
            _ => US_SYMBOL_KEYS
                .iter()
                .find(|&&(_, plain, _)| plain == ch)
                .map(|&(code, _, _)| code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ascii_letters() {
        let k = KeyEvent::from_ascii('k').unwrap();
        assert_eq!(k.key_code, 0x4B);
        assert_eq!(k.char_code, 'k' as u32);
        assert!(!k.modifiers.shift());
        assert_eq!(k.base_char(), Some('k'));

        let upper = KeyEvent::from_ascii('K').unwrap();
        assert!(upper.modifiers.shift());
        assert_eq!(upper.base_char(), Some('k'));
    }

    #[test]
    fn from_ascii_symbols() {
        let semi = KeyEvent::from_ascii(';').unwrap();
        assert_eq!(semi.key_code, vk::OEM_1);
        assert!(!semi.modifiers.shift());

        let bang = KeyEvent::from_ascii('!').unwrap();
        assert_eq!(bang.key_code, 0x31);
        assert!(bang.modifiers.shift());
        assert_eq!(bang.base_char(), Some('1'));
        assert_eq!(bang.char(), Some('!'));

        assert!(KeyEvent::from_ascii('é').is_none());
    }

    #[test]
    fn special_keys() {
        let space = KeyEvent::from_ascii(' ').unwrap();
        assert_eq!(space.key_code, vk::SPACE);
        assert!(space.is_printable_char());
        assert_eq!(space.base_char(), None);

        let left = KeyEvent::special(vk::LEFT);
        assert!(!left.is_printable_char());
        assert_eq!(left.char(), None);

        let esc = KeyEvent::special(vk::ESCAPE);
        assert!(!esc.is_printable_char());
    }

    #[test]
    fn modifiers_and_toggles() {
        let k = KeyEvent::from_ascii('q').unwrap().with_alt_ctrl_shift();
        assert!(k.modifiers.alt_ctrl_shift());
        assert!(!KeyEvent::from_ascii('q').unwrap().with_alt().modifiers.alt_ctrl_shift());

        let mut right = KeyEvent::default();
        right.modifiers.right_ctrl = true;
        assert!(right.modifiers.ctrl());

        let num = KeyEvent::special(vk::NUMPAD0 + 3).with_num_lock();
        assert!(num.is_numpad());
        assert!(num.toggles.num_lock);
        assert!(KeyEvent::special(vk::LEFT).key_up().phase == KeyPhase::Up);
    }

    #[test]
    fn key_code_for_round_trips_base_char() {
        for ch in "abcxyz0123456789`-=[]\\;',./".chars() {
            let code = KeyEvent::key_code_for(ch).unwrap();
            let event = KeyEvent {
                key_code: code,
                ..KeyEvent::default()
            };
            assert_eq!(event.base_char(), Some(ch));
        }
        assert_eq!(KeyEvent::key_code_for('!'), None);
    }
}
