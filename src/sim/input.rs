//! Keyboard input state
//!
//! Hosts translate their native key events into [`Key`] values; the
//! simulation only ever sees held/released flags.

use serde::{Deserialize, Serialize};

const KEY_COUNT: usize = 5;

/// Keys the game recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
    Attack,
    Restart,
}

impl Key {
    pub const ALL: [Key; KEY_COUNT] = [Key::Left, Key::Right, Key::Jump, Key::Attack, Key::Restart];

    /// Map a DOM-style key code or key value to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" | "Space" | " " => Some(Key::Jump),
            "KeyZ" | "z" | "Z" => Some(Key::Attack),
            "KeyR" | "r" | "R" => Some(Key::Restart),
            _ => None,
        }
    }

    /// Keys that are meaningful while a run is in progress
    pub fn is_gameplay(&self) -> bool {
        !matches!(self, Key::Restart)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held state of every recognized key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: [bool; KEY_COUNT],
}

impl InputState {
    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }
}
