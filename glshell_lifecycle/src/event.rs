//! Window-system events in a backend-neutral form.

use std::ops::{BitOr, BitOrAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Release,
    Press,
    /// The key was held long enough for the system to repeat it.
    Repeat,
}

/// Modifier keys held while a key or button event was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(0x01);
    pub const CONTROL: Modifiers = Modifiers(0x02);
    pub const ALT: Modifiers = Modifiers(0x04);
    pub const SUPER: Modifiers = Modifiers(0x08);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: Modifiers, enabled: bool) {
        if enabled {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

/// A keyboard key. Escape is singled out because it ends the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// Backend-specific key code.
    Code(u32),
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// An input or window event delivered during a poll.
///
/// Sizes and positions are in logical (screen-coordinate) units, relative to the window's
/// client area.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Resized { width: u32, height: u32 },
    Focused(bool),
    CloseRequested,
    Key { key: Key, scancode: u32, action: Action, mods: Modifiers },
    MouseButton { button: MouseButton, action: Action, mods: Modifiers },
    CursorMoved { x: f64, y: f64 },
    Scroll { x: f64, y: f64 },
}

impl WindowEvent {
    pub fn is_close_request(&self) -> bool {
        matches!(self, WindowEvent::CloseRequested)
    }

    pub fn is_escape_release(&self) -> bool {
        matches!(self, WindowEvent::Key { key: Key::Escape, action: Action::Release, .. })
    }
}
