// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key events.

/// A logical key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Tab (Shift+Tab is `Tab` with [`Modifiers::SHIFT`]).
    Tab,
    /// Escape.
    Escape,
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// A printable character.
    Character(char),
}

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows.
        const META  = 0b0000_1000;
    }
}

/// A key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A press with no modifiers.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// A press with modifiers.
    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Whether Shift was held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether this press activates a button-like control (Enter or Space).
    pub fn is_activation(&self) -> bool {
        matches!(self.key, Key::Enter | Key::Space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_keys() {
        assert!(KeyEvent::new(Key::Enter).is_activation());
        assert!(KeyEvent::new(Key::Space).is_activation());
        assert!(!KeyEvent::new(Key::Character(' ')).is_activation());
        assert!(!KeyEvent::new(Key::Tab).is_activation());
    }

    #[test]
    fn shift_tab() {
        let ev = KeyEvent::with_modifiers(Key::Tab, Modifiers::SHIFT | Modifiers::CTRL);
        assert!(ev.shift());
        assert!(!KeyEvent::new(Key::Tab).shift());
    }
}
