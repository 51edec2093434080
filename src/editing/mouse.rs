// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer and keyboard input types, and the delegate trait tools
//! implement to receive pointer phases.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Keyboard modifier state at the time of an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Smoothing modifier for the pen; extends selections
    pub shift: bool,
    /// Reserved
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Ctrl on Linux/Windows, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A pointer event in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub pos: Point,
    pub mods: Modifiers,
}

impl MouseEvent {
    pub fn new(pos: Point, mods: Modifiers) -> Self {
        Self { pos, mods }
    }
}

/// Keys the editor reacts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Character(String),
}

impl Key {
    /// Whether this is the given letter, ignoring case
    pub fn is_char(&self, c: char) -> bool {
        match self {
            Key::Character(s) => {
                let mut chars = s.chars();
                chars.next().is_some_and(|first| first.eq_ignore_ascii_case(&c))
                    && chars.next().is_none()
            }
            _ => false,
        }
    }
}

/// Receives the three pointer phases while a tool is active.
///
/// Each tool owns the interpretation of down/move/up completely; there is
/// no shared drag recognizer in between.
pub trait MouseDelegate {
    type Data;

    fn left_down(&mut self, event: MouseEvent, data: &mut Self::Data);

    fn mouse_moved(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    fn left_up(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    /// Abandon any gesture in progress
    fn cancel(&mut self, _data: &mut Self::Data) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_modifier() {
        assert!(!Modifiers::NONE.command());
        assert!(Modifiers { meta: true, ..Modifiers::NONE }.command());
        assert!(Modifiers { ctrl: true, ..Modifiers::NONE }.command());
    }

    #[test]
    fn test_key_is_char() {
        assert!(Key::Character("Z".into()).is_char('z'));
        assert!(Key::Character("z".into()).is_char('z'));
        assert!(!Key::Character("zz".into()).is_char('z'));
        assert!(!Key::Escape.is_char('z'));
    }
}
