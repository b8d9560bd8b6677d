//! One-shot stacking modifier.

use libtibetan_core::ModifierKeys;

use crate::keymap::KeyLayer;

/// State armed by the stacking trigger and consumed by the next printable key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModifierState {
    #[default]
    Inactive,
    PendingStack,
    PendingStackShift,
}

impl ModifierState {
    pub fn is_pending(&self) -> bool {
        !matches!(self, ModifierState::Inactive)
    }

    /// Arm the modifier. Returns false (and changes nothing) if already pending.
    pub fn arm(&mut self, shift: bool) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = if shift {
            ModifierState::PendingStackShift
        } else {
            ModifierState::PendingStack
        };
        true
    }

    pub fn reset(&mut self) {
        *self = ModifierState::Inactive;
    }

    /// Layer for the next key given the held modifier keys.
    ///
    /// A pending state overrides the held keys; otherwise Alt+Ctrl+Shift
    /// beats plain Shift.
    pub fn layer_for(&self, keys: &ModifierKeys) -> KeyLayer {
        match self {
            ModifierState::PendingStack => KeyLayer::from_flags(true, false, false, false),
            ModifierState::PendingStackShift => KeyLayer::from_flags(false, false, false, true),
            ModifierState::Inactive => {
                let acs = keys.alt_ctrl_shift();
                KeyLayer::from_flags(false, keys.shift() && !acs, acs, false)
            }
        }
    }
}
