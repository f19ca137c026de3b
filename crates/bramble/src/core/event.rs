//! Pointer input types shared by the screen and widget handlers.

use std::ops::{BitOr, BitOrAssign};

/// Mouse button codes.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Clone, Copy, Hash)]
pub enum MouseButton {
    /// Primary (left) button.
    Left,
    /// Secondary (right) button.
    Right,
    /// Middle button.
    Middle,
    /// Any further button, by platform index.
    Other(u8),
}

impl MouseButton {
    /// The platform button index.
    pub fn index(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
            Self::Other(i) => i,
        }
    }

    /// The single-bit mask for this button.
    pub fn mask(self) -> Buttons {
        Buttons(1u32.checked_shl(u32::from(self.index())).unwrap_or(0))
    }
}

impl From<u8> for MouseButton {
    fn from(index: u8) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Middle,
            i => Self::Other(i),
        }
    }
}

/// Platform button actions.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    /// Button released.
    Release,
    /// Button pressed.
    Press,
    /// Key or button repeat.
    Repeat,
}

impl From<i32> for Action {
    fn from(v: i32) -> Self {
        match v {
            0 => Self::Release,
            1 => Self::Press,
            _ => Self::Repeat,
        }
    }
}

/// Bitmask of held mouse buttons, bit `n` set for button index `n`.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Buttons(pub u32);

impl Buttons {
    /// No buttons held.
    pub const NONE: Self = Self(0);

    /// Is the button held?
    pub fn contains(self, button: MouseButton) -> bool {
        let mask = button.mask().0;
        mask != 0 && self.0 & mask == mask
    }

    /// Mark a button as held.
    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= button.mask().0;
    }

    /// Mark a button as released.
    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.mask().0;
    }

    /// True when no button is held.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<MouseButton> for Buttons {
    fn from(button: MouseButton) -> Self {
        button.mask()
    }
}

/// Keyboard modifier bitmask.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Modifiers(pub u32);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// Shift.
    pub const SHIFT: Self = Self(0x1);
    /// Control.
    pub const CONTROL: Self = Self(0x2);
    /// Alt.
    pub const ALT: Self = Self(0x4);
    /// Super / command.
    pub const SUPER: Self = Self(0x8);

    /// Are all modifiers in `other` active?
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_masks() {
        let mut held = Buttons::NONE;
        held.insert(MouseButton::Left);
        held.insert(MouseButton::Middle);
        assert_eq!(held, Buttons(0b101));
        assert!(held.contains(MouseButton::Left));
        assert!(!held.contains(MouseButton::Right));
        held.remove(MouseButton::Left);
        assert_eq!(held, Buttons(0b100));
        held.remove(MouseButton::Middle);
        assert!(held.is_empty());
    }

    #[test]
    fn oversized_button_index_has_no_mask() {
        let b = MouseButton::from(40);
        assert_eq!(b, MouseButton::Other(40));
        assert_eq!(b.mask(), Buttons::NONE);
        assert!(!Buttons(u32::MAX).contains(b));
    }

    #[test]
    fn modifiers() {
        let m = Modifiers::SHIFT | Modifiers::ALT;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::CONTROL));
        assert!(m.contains(Modifiers::NONE));
        assert_eq!(Action::from(1), Action::Press);
        assert_eq!(Action::from(0), Action::Release);
    }
}
