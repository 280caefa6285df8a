//! Key symbols, modifier state and key-list matching.
//!
//! A `Key` is what the embedding platform hands to the engine for every
//! press/release: a symbol plus the modifier state at the time of the event.
//! Configured bindings are plain `Vec<Key>` lists; matching against them
//! ignores lock modifiers so that CapsLock does not break shortcuts.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier state carried by a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u32 {
        const SHIFT     = 1 << 0;
        const CAPS_LOCK = 1 << 1;
        const CTRL      = 1 << 2;
        const ALT       = 1 << 3;
        const NUM_LOCK  = 1 << 4;
        const SUPER     = 1 << 6;
        const HYPER     = 1 << 7;
    }
}

impl Modifiers {
    /// The modifiers that count as "held" for flush-and-passthrough handling.
    pub fn held_mask() -> Modifiers {
        Modifiers::CTRL | Modifiers::ALT | Modifiers::SHIFT | Modifiers::SUPER | Modifiers::HYPER
    }

    /// Lock modifiers ignored when matching keys against configured lists.
    fn lock_mask() -> Modifiers {
        Modifiers::CAPS_LOCK | Modifiers::NUM_LOCK
    }
}

/// Symbol of a key, independent of modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeySym {
    /// A printable character as produced by the platform keymap.
    Char(char),
    Backspace,
    Return,
    Tab,
    Up,
    Down,
    PageUp,
    PageDown,
    /// The dedicated Hanja key on Korean keyboards.
    Hanja,
    /// Function keys F1..F12.
    F(u8),
    ShiftL,
    ShiftR,
    ControlL,
    ControlR,
    AltL,
    AltR,
    SuperL,
    SuperR,
    HyperL,
    HyperR,
}

/// A key symbol together with the modifier state of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub sym: KeySym,
    pub states: Modifiers,
}

impl Key {
    pub fn new(sym: KeySym) -> Self {
        Self {
            sym,
            states: Modifiers::empty(),
        }
    }

    pub fn with_states(sym: KeySym, states: Modifiers) -> Self {
        Self { sym, states }
    }

    /// Match against a configured key, ignoring lock modifiers.
    pub fn check(&self, other: &Key) -> bool {
        let mask = !Modifiers::lock_mask();
        self.sym == other.sym && (self.states & mask) == (other.states & mask)
    }

    pub fn check_key_list(&self, list: &[Key]) -> bool {
        list.iter().any(|k| self.check(k))
    }

    /// Position of this key within a list, for e.g. digit selection.
    pub fn key_list_index(&self, list: &[Key]) -> Option<usize> {
        list.iter().position(|k| self.check(k))
    }
}

/// A single key event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub release: bool,
}

impl KeyEvent {
    pub fn press(key: Key) -> Self {
        Self {
            key,
            release: false,
        }
    }

    pub fn release(key: Key) -> Self {
        Self { key, release: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_ignores_lock_modifiers() {
        let bound = Key::new(KeySym::Char('a'));
        let pressed = Key::with_states(KeySym::Char('a'), Modifiers::CAPS_LOCK);
        assert!(pressed.check(&bound));

        let shifted = Key::with_states(KeySym::Char('a'), Modifiers::SHIFT);
        assert!(!shifted.check(&bound));
    }

    #[test]
    fn test_check_with_explicit_modifier() {
        let bound = Key::with_states(KeySym::Tab, Modifiers::SHIFT);
        assert!(Key::with_states(KeySym::Tab, Modifiers::SHIFT).check(&bound));
        assert!(!Key::new(KeySym::Tab).check(&bound));
    }

    #[test]
    fn test_key_list_index() {
        let digits: Vec<Key> = "1234567890"
            .chars()
            .map(|c| Key::new(KeySym::Char(c)))
            .collect();
        assert_eq!(Key::new(KeySym::Char('1')).key_list_index(&digits), Some(0));
        assert_eq!(Key::new(KeySym::Char('0')).key_list_index(&digits), Some(9));
        assert_eq!(Key::new(KeySym::Char('x')).key_list_index(&digits), None);
    }
}
