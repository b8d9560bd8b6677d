//! Tibetan keyboard layers.
//!
//! Five static tables map the unshifted US-layout character of a physical key
//! to a Tibetan code point. Exactly one layer is consulted per key; a miss in
//! that layer is final and never falls back to another layer.

use phf::phf_map;

/// Keymap layer selected for a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyLayer {
    Base,
    Shift,
    /// Subjoined consonants, selected by the stacking trigger
    Stack,
    AltCtrlShift,
    /// Stacking trigger pressed with Shift
    StackShift,
}

impl KeyLayer {
    pub const ALL: [KeyLayer; 5] = [
        KeyLayer::Base,
        KeyLayer::Shift,
        KeyLayer::Stack,
        KeyLayer::AltCtrlShift,
        KeyLayer::StackShift,
    ];

    /// Pick the layer from positional flags.
    ///
    /// The first set flag wins in the order stack, shift, alt-ctrl-shift,
    /// stack-shift; with no flag set the base layer is used.
    pub fn from_flags(stack: bool, shift: bool, alt_ctrl_shift: bool, stack_shift: bool) -> Self {
        if stack {
            KeyLayer::Stack
        } else if shift {
            KeyLayer::Shift
        } else if alt_ctrl_shift {
            KeyLayer::AltCtrlShift
        } else if stack_shift {
            KeyLayer::StackShift
        } else {
            KeyLayer::Base
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyLayer::Base => "base",
            KeyLayer::Shift => "shift",
            KeyLayer::Stack => "stack",
            KeyLayer::AltCtrlShift => "alt-ctrl-shift",
            KeyLayer::StackShift => "stack-shift",
        }
    }

    fn table(&self) -> &'static phf::Map<char, char> {
        match self {
            KeyLayer::Base => &BASE,
            KeyLayer::Shift => &SHIFT,
            KeyLayer::Stack => &STACK,
            KeyLayer::AltCtrlShift => &ALT_CTRL_SHIFT,
            KeyLayer::StackShift => &STACK_SHIFT,
        }
    }
}

impl std::fmt::Display for KeyLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

static BASE: phf::Map<char, char> = phf_map! {
    '`' => '\u{0f68}', '1' => '\u{0f21}', '2' => '\u{0f22}', '3' => '\u{0f23}', '4' => '\u{0f24}',
    '5' => '\u{0f25}', '6' => '\u{0f26}', '7' => '\u{0f27}', '8' => '\u{0f28}', '9' => '\u{0f29}',
    '0' => '\u{0f20}', '-' => '\u{0f67}', '=' => '\u{0f5d}',
    'q' => '\u{0f45}', 'w' => '\u{0f46}', 'e' => '\u{0f7a}', 'r' => '\u{0f62}', 't' => '\u{0f4f}',
    'y' => '\u{0f61}', 'u' => '\u{0f74}', 'i' => '\u{0f72}', 'o' => '\u{0f7c}', 'p' => '\u{0f55}',
    '[' => '\u{0f59}', ']' => '\u{0f5a}', '\\' => '\u{0f5b}',
    'a' => '\u{0f60}', 's' => '\u{0f66}', 'd' => '\u{0f51}', 'f' => '\u{0f56}', 'g' => '\u{0f44}',
    'h' => '\u{0f58}', 'j' => '\u{0f0b}', 'k' => '\u{0f42}', 'l' => '\u{0f63}', ';' => '\u{0f5e}',
    '\'' => '\u{0f0d}',
    'z' => '\u{0f5f}', 'x' => '\u{0f64}', 'c' => '\u{0f40}', 'v' => '\u{0f41}', 'b' => '\u{0f54}',
    'n' => '\u{0f53}', ',' => '\u{0f50}', '.' => '\u{0f47}', '/' => '\u{0f49}',
};

static STACK: phf::Map<char, char> = phf_map! {
    '`' => '\u{0fb8}', '1' => '\u{0f04}', '2' => '\u{0f05}', '3' => '\u{0f7e}', '4' => '\u{0f83}',
    '5' => '\u{0f37}', '6' => '\u{0f35}', '7' => '\u{0f7f}', '8' => '\u{0f14}', '9' => '\u{0f11}',
    '0' => '\u{0f08}', '-' => '\u{0fb7}', '=' => '\u{0fba}',
    'q' => '\u{0f95}', 'w' => '\u{0f96}', 'e' => '\u{0f7b}', 'r' => '\u{0fb2}', 't' => '\u{0f9f}',
    'y' => '\u{0fb1}', 'u' => '\u{0fad}', 'i' => '\u{0f80}', 'o' => '\u{0f7d}', 'p' => '\u{0fa5}',
    '[' => '\u{0fa9}', ']' => '\u{0faa}', '\\' => '\u{0fab}',
    'a' => '\u{0fb0}', 's' => '\u{0fb6}', 'd' => '\u{0fa1}', 'f' => '\u{0fa6}', 'g' => '\u{0f94}',
    'h' => '\u{0fa8}', 'j' => '\u{0f84}', 'k' => '\u{0f92}', 'l' => '\u{0fb3}', ';' => '\u{0fae}',
    '\'' => '\u{0f0e}',
    'z' => '\u{0faf}', 'x' => '\u{0fb4}', 'c' => '\u{0f90}', 'v' => '\u{0f91}', 'b' => '\u{0fa4}',
    'n' => '\u{0fa3}', 'm' => '\u{0f85}', ',' => '\u{0fa0}', '.' => '\u{0f97}', '/' => '\u{0f99}',
};

static SHIFT: phf::Map<char, char> = phf_map! {
    '`' => '\u{0f01}', '1' => '\u{0f2a}', '2' => '\u{0f2b}', '3' => '\u{0f2c}', '4' => '\u{0f2d}',
    '5' => '\u{0f2e}', '6' => '\u{0f2f}', '7' => '\u{0f30}', '8' => '\u{0f31}', '9' => '\u{0f32}',
    '0' => '\u{0f33}', '-' => '\u{0f3c}', '=' => '\u{0f3d}',
    'q' => '\u{0f15}', 'w' => '\u{0f16}', 'e' => '\u{0f17}', 'r' => '\u{0fbc}', 't' => '\u{0f4a}',
    'y' => '\u{0fbb}', 'u' => '\u{0f18}', 'i' => '\u{0f19}', 'o' => '\u{0f1a}', 'p' => '\u{0f1b}',
    '[' => '\u{0f1c}', ']' => '\u{0f1d}', '\\' => '\u{0f1e}',
    'a' => '\u{0f71}', 's' => '\u{0f1f}', 'd' => '\u{0f4c}', 'f' => '\u{0f3e}', 'g' => '\u{0f3f}',
    'h' => '\u{0fcf}', 'j' => '\u{0f02}', 'k' => '\u{0f03}', 'l' => '\u{0f06}', ';' => '\u{0f07}',
    '\'' => '\u{0f38}',
    'z' => '\u{0f34}', 'x' => '\u{0f65}', 'c' => '\u{0f69}', 'v' => '\u{0f87}', 'b' => '\u{0f86}',
    'n' => '\u{0f4e}', ',' => '\u{0f4b}', '.' => '\u{0f3a}', '/' => '\u{0f3b}',
};

static ALT_CTRL_SHIFT: phf::Map<char, char> = phf_map! {
    '`' => '\u{0f00}', '1' => '\u{0f76}', '2' => '\u{0f77}', '3' => '\u{0f78}', '4' => '\u{0f79}',
    '5' => '\u{0f81}', '6' => '\u{0f09}', '7' => '\u{0f0a}', '8' => '\u{0f0f}', '9' => '\u{0f10}',
    '0' => '\u{0f12}', '-' => '\u{0f0c}', '=' => '\u{0f13}',
    'q' => '\u{0f89}', 'w' => '\u{0f88}', 'e' => '\u{0fbe}', 'r' => '\u{0f6a}', 't' => '\u{0f9a}',
    'y' => '\u{0fbf}', 'u' => '\u{0f75}', 'i' => '\u{0f73}', 'o' => '\u{0fc0}', 'p' => '\u{0fc1}',
    '[' => '\u{0fc2}', ']' => '\u{0fc3}', '\\' => '\u{0f5c}',
    'a' => '\u{0fc4}', 's' => '\u{0fc5}', 'd' => '\u{0f9c}', 'f' => '\u{0f57}', 'g' => '\u{0fc6}',
    'h' => '\u{0fc7}', 'j' => '\u{0fc8}', 'k' => '\u{0f43}', 'l' => '\u{0fc9}', ';' => '\u{0fca}',
    '\'' => '\u{0fcb}',
    'z' => '\u{0fcc}', 'x' => '\u{0fb5}', 'c' => '\u{0fb9}', 'v' => '\u{0f36}', 'b' => '\u{0f82}',
    'n' => '\u{0f9e}', 'm' => '\u{0f52}', ',' => '\u{0f9b}', '.' => '\u{0f8b}', '/' => '\u{0f8a}',
};

// Consonants with a distinct subjoined form under stacking + Shift.
static STACK_SHIFT: phf::Map<char, char> = phf_map! {
    't' => '\u{0f9d}', '\\' => '\u{0fac}', 'd' => '\u{0f4d}', 'f' => '\u{0fa7}', 'k' => '\u{0f93}',
    'm' => '\u{0fa2}',
};

/// Translates physical keys to Tibetan characters.
///
/// The tables are immutable statics; the translator is a zero-sized handle
/// so every session can own one.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTranslator;

impl KeyTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Look up `input` in a single layer.
    ///
    /// Upper-case ASCII letters are folded to lower case first. `None` means
    /// the key has no mapping in that layer and should be used literally.
    pub fn get_key(&self, input: char, layer: KeyLayer) -> Option<char> {
        layer.table().get(&input.to_ascii_lowercase()).copied()
    }

    /// Look up `input` with positional layer flags, see [`KeyLayer::from_flags`].
    pub fn get_key_with_flags(
        &self,
        input: char,
        stack: bool,
        shift: bool,
        alt_ctrl_shift: bool,
        stack_shift: bool,
    ) -> Option<char> {
        self.get_key(input, KeyLayer::from_flags(stack, shift, alt_ctrl_shift, stack_shift))
    }

    /// Whether `input` has a mapping in `layer`.
    pub fn contains(&self, input: char, layer: KeyLayer) -> bool {
        self.get_key(input, layer).is_some()
    }

    /// All (key, output) pairs of a layer, sorted by key.
    pub fn layer_entries(&self, layer: KeyLayer) -> Vec<(char, char)> {
        let mut entries: Vec<(char, char)> = layer.table().entries().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable();
        entries
    }

    /// Keys with a mapping in the alt-ctrl-shift layer, sorted.
    pub fn alt_ctrl_shift_keys(&self) -> Vec<char> {
        self.layer_entries(KeyLayer::AltCtrlShift)
            .into_iter()
            .map(|(k, _)| k)
            .collect()
    }
}
