//! Preserved keys for the alt-ctrl-shift layer.
//!
//! Hosts usually swallow Alt+Ctrl+Shift chords before the engine sees them
//! while idle, so every alt-ctrl-shift key is registered as a global hotkey
//! with an identifier that encodes the key's ASCII code. When the host fires
//! the hotkey, the identifier is decoded back into the key.

use once_cell::sync::Lazy;
use regex::Regex;

use libtibetan_core::{hotkey_mod, KeyEvent};

use crate::keymap::{KeyLayer, KeyTranslator};

/// Fixed leading groups of every preserved-key identifier.
pub const PRESERVED_KEY_PREFIX: &str = "7A3C9E42-5B1D-4F8A-9C6E";

/// Modifier mask for preserved keys.
pub const PRESERVED_KEY_MODIFIERS: u32 = hotkey_mod::ALT | hotkey_mod::CONTROL | hotkey_mod::SHIFT;

static PRESERVED_KEY_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{7A3C9E42-5B1D-4F8A-9C6E-([0-9A-Fa-f]{12})\}$").expect("valid preserved key pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreservedKeyError {
    #[error("malformed preserved key identifier: {0}")]
    Malformed(String),
    #[error("invalid character code {0:#x} in preserved key identifier")]
    InvalidCode(u64),
    #[error("key '{0}' has no alt-ctrl-shift mapping")]
    NotAltCtrlShiftKey(char),
}

/// A hotkey registration for one alt-ctrl-shift key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreservedKey {
    /// Unshifted US-layout character of the key
    pub key: char,
    /// Virtual key code of the key
    pub key_code: u32,
    pub id: String,
}

/// Identifier for `key`, e.g. `{7A3C9E42-5B1D-4F8A-9C6E-000000000071}` for 'q'.
pub fn preserved_key_id(key: char) -> String {
    format!("{{{}-{:012X}}}", PRESERVED_KEY_PREFIX, key as u32)
}

/// Decode an identifier back into its alt-ctrl-shift key.
pub fn parse_preserved_key_id(id: &str) -> Result<char, PreservedKeyError> {
    let caps = PRESERVED_KEY_ID
        .captures(id.trim())
        .ok_or_else(|| PreservedKeyError::Malformed(id.to_string()))?;
    let code = u64::from_str_radix(&caps[1], 16).map_err(|_| PreservedKeyError::Malformed(id.to_string()))?;
    let key = u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .ok_or(PreservedKeyError::InvalidCode(code))?;

    if !KeyTranslator::new().contains(key, KeyLayer::AltCtrlShift) {
        return Err(PreservedKeyError::NotAltCtrlShiftKey(key));
    }
    Ok(key)
}

/// One registration per alt-ctrl-shift key that has a US-layout key code.
pub fn preserved_keys(translator: &KeyTranslator) -> Vec<PreservedKey> {
    translator
        .alt_ctrl_shift_keys()
        .into_iter()
        .filter_map(|key| {
            KeyEvent::key_code_for(key).map(|key_code| PreservedKey {
                key,
                key_code,
                id: preserved_key_id(key),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_format() {
        assert_eq!(preserved_key_id('q'), "{7A3C9E42-5B1D-4F8A-9C6E-000000000071}");
        assert_eq!(preserved_key_id('\\'), "{7A3C9E42-5B1D-4F8A-9C6E-00000000005C}");
    }

    #[test]
    fn ids_decode_back() {
        for pk in preserved_keys(&KeyTranslator::new()) {
            assert_eq!(parse_preserved_key_id(&pk.id), Ok(pk.key));
        }
        assert_eq!(
            parse_preserved_key_id("{7a3c9e42-5b1d-4f8a-9c6e-00000000006d}"),
            Err(PreservedKeyError::Malformed("{7a3c9e42-5b1d-4f8a-9c6e-00000000006d}".into()))
        );
        assert_eq!(parse_preserved_key_id("{7A3C9E42-5B1D-4F8A-9C6E-00000000006d}"), Ok('m'));
    }

    #[test]
    fn rejects_bad_ids() {
        assert!(matches!(
            parse_preserved_key_id("not-a-guid"),
            Err(PreservedKeyError::Malformed(_))
        ));
        assert!(matches!(
            parse_preserved_key_id("{7A3C9E42-5B1D-4F8A-9C6E-0000000000}"),
            Err(PreservedKeyError::Malformed(_))
        ));
        assert_eq!(
            parse_preserved_key_id("{7A3C9E42-5B1D-4F8A-9C6E-FFFFFFFFFFFF}"),
            Err(PreservedKeyError::InvalidCode(0xFFFF_FFFF_FFFF))
        );
        assert_eq!(
            parse_preserved_key_id("{7A3C9E42-5B1D-4F8A-9C6E-000000000020}"),
            Err(PreservedKeyError::NotAltCtrlShiftKey(' '))
        );
    }

    #[test]
    fn registrations_cover_the_layer() {
        let keys = preserved_keys(&KeyTranslator::new());
        assert_eq!(keys.len(), 47);
        let q = keys.iter().find(|k| k.key == 'q').unwrap();
        assert_eq!(q.key_code, 0x51);
        assert_eq!(PRESERVED_KEY_MODIFIERS, 0x7);
    }
}
