//! Keyboard translation and held-key emulation.
//!
//! Frontend-agnostic key handling lives in [`game_core::InputState`]; this
//! module only maps `crossterm` events onto it.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::Key;
use tokio::time::{Duration, Instant};

/// What a terminal key event asks the frontend to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Press(Key),
    Release(Key),
    /// Select an inventory slot (zero-based).
    Select(usize),
    UseSelected,
    DropSelected,
    Quit,
}

/// Maps one terminal key event to frontend actions.
///
/// Shift (or an upper-case WASD letter) on a movement key holds sprint;
/// the same key without it lets sprint go.
pub fn translate(event: &KeyEvent) -> Vec<InputAction> {
    let released = event.kind == KeyEventKind::Release;
    let shifted = event.modifiers.contains(KeyModifiers::SHIFT);

    if let Some((key, upper)) = movement_key(event.code) {
        if released {
            return vec![InputAction::Release(key)];
        }
        let sprint = if shifted || upper {
            InputAction::Press(Key::Sprint)
        } else {
            InputAction::Release(Key::Sprint)
        };
        return vec![sprint, InputAction::Press(key)];
    }

    let action_key = match event.code {
        KeyCode::Char('e' | 'E') => Some(Key::Interact),
        KeyCode::Char('i' | 'I') => Some(Key::Inventory),
        KeyCode::Char('r' | 'R') => Some(Key::Restart),
        _ => None,
    };
    if let Some(key) = action_key {
        return if released {
            vec![InputAction::Release(key)]
        } else {
            vec![InputAction::Press(key)]
        };
    }

    if released {
        return Vec::new();
    }
    let action = match event.code {
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => InputAction::Quit,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char('u' | 'U') => InputAction::UseSelected,
        KeyCode::Char('x' | 'X') => InputAction::DropSelected,
        KeyCode::Char(digit @ '1'..='9') => InputAction::Select(digit as usize - '1' as usize),
        _ => return Vec::new(),
    };
    vec![action]
}

/// Movement key and whether it was typed upper-case.
fn movement_key(code: KeyCode) -> Option<(Key, bool)> {
    let key = match code {
        KeyCode::Up => (Key::Up, false),
        KeyCode::Down => (Key::Down, false),
        KeyCode::Left => (Key::Left, false),
        KeyCode::Right => (Key::Right, false),
        KeyCode::Char(c) => {
            let key = match c.to_ascii_lowercase() {
                'w' => Key::Up,
                's' => Key::Down,
                'a' => Key::Left,
                'd' => Key::Right,
                _ => return None,
            };
            (key, c.is_ascii_uppercase())
        }
        _ => return None,
    };
    Some(key)
}

/// Releases keys that stopped auto-repeating, for terminals that never
/// report key releases.
#[derive(Debug)]
pub struct HoldTracker {
    hold: Duration,
    deadlines: HashMap<Key, Instant>,
}

impl HoldTracker {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            deadlines: HashMap::new(),
        }
    }

    /// Records a press or auto-repeat of `key`.
    pub fn pressed(&mut self, key: Key, now: Instant) {
        self.deadlines.insert(key, now + self.hold);
    }

    pub fn released(&mut self, key: Key) {
        self.deadlines.remove(&key);
    }

    /// Removes and returns every key whose hold ran out.
    pub fn expired(&mut self, now: Instant) -> Vec<Key> {
        let mut expired: Vec<Key> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| *key)
            .collect();
        for key in &expired {
            self.deadlines.remove(key);
        }
        expired.sort_by_key(|key| key.as_ref().to_owned());
        expired
    }
}
