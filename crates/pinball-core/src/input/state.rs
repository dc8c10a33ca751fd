use serde::{Deserialize, Serialize};

use super::queue::InputEvent;
use crate::config::ConfigError;
use crate::flipper::Side;

/// DOM key codes.
pub mod keys {
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_RIGHT: u32 = 39;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
}

/// Which keys fire which flipper. Each action accepts any of its keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![keys::ARROW_LEFT, keys::A],
            right: vec![keys::ARROW_RIGHT, keys::D],
        }
    }
}

impl KeyBindings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The flipper bound to `key_code`, if any.
    pub fn side_for(&self, key_code: u32) -> Option<Side> {
        if self.left.contains(&key_code) {
            Some(Side::Left)
        } else if self.right.contains(&key_code) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Button state sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left_active: bool,
    pub right_active: bool,
}

impl InputState {
    pub fn new(left_active: bool, right_active: bool) -> Self {
        Self {
            left_active,
            right_active,
        }
    }

    pub fn is_active(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_active,
            Side::Right => self.right_active,
        }
    }

    pub fn set(&mut self, side: Side, active: bool) {
        match side {
            Side::Left => self.left_active = active,
            Side::Right => self.right_active = active,
        }
    }

    /// Press sets a flag, release clears it. Unbound keys and non-key events are ignored.
    pub fn apply(&mut self, event: &InputEvent, bindings: &KeyBindings) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                if let Some(side) = bindings.side_for(key_code) {
                    self.set(side, true);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if let Some(side) = bindings.side_for(key_code) {
                    self.set(side, false);
                }
            }
            InputEvent::ResetBall => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_letter_keys_drive_the_same_flipper() {
        let bindings = KeyBindings::default();
        let mut state = InputState::default();

        state.apply(&InputEvent::KeyDown { key_code: keys::A }, &bindings);
        assert!(state.left_active);
        state.apply(&InputEvent::KeyUp { key_code: keys::ARROW_LEFT }, &bindings);
        assert!(!state.left_active);

        state.apply(&InputEvent::KeyDown { key_code: keys::ARROW_RIGHT }, &bindings);
        assert_eq!(state, InputState::new(false, true));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let bindings = KeyBindings::default();
        let mut state = InputState::new(true, false);
        state.apply(&InputEvent::KeyUp { key_code: 32 }, &bindings);
        state.apply(&InputEvent::ResetBall, &bindings);
        assert_eq!(state, InputState::new(true, false));
    }

    #[test]
    fn repeated_presses_are_idempotent() {
        let bindings = KeyBindings::default();
        let mut state = InputState::default();
        for _ in 0..3 {
            state.apply(&InputEvent::KeyDown { key_code: keys::D }, &bindings);
        }
        assert!(state.is_active(Side::Right));
        state.apply(&InputEvent::KeyUp { key_code: keys::D }, &bindings);
        assert!(!state.is_active(Side::Right));
    }

    #[test]
    fn custom_bindings_load_from_json() {
        let bindings = KeyBindings::from_json(r#"{ "left": [90], "right": [77] }"#).unwrap();
        assert_eq!(bindings.side_for(90), Some(Side::Left));
        assert_eq!(bindings.side_for(77), Some(Side::Right));
        assert_eq!(bindings.side_for(keys::A), None);
    }
}
