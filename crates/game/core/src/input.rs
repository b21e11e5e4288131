//! Keyboard input model.
//!
//! Movement keys are level-triggered: they stay in [`HeldKeys`] until
//! released. Discrete actions are edge-triggered: a [`Command`] is queued
//! only on the up-to-down transition, so key auto-repeat never repeats them.

use bitflags::bitflags;

use crate::geometry::Vec2;
use crate::state::ItemKind;

bitflags! {
    /// Currently held level-triggered keys.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct HeldKeys: u8 {
        const UP     = 1 << 0;
        const DOWN   = 1 << 1;
        const LEFT   = 1 << 2;
        const RIGHT  = 1 << 3;
        const SPRINT = 1 << 4;
    }
}

impl HeldKeys {
    /// Raw direction from the held arrows. Opposite keys cancel.
    pub fn direction(self) -> Vec2 {
        let axis = |negative: HeldKeys, positive: HeldKeys| {
            let mut value = 0.0;
            if self.contains(negative) {
                value -= 1.0;
            }
            if self.contains(positive) {
                value += 1.0;
            }
            value
        };
        Vec2::new(
            axis(HeldKeys::LEFT, HeldKeys::RIGHT),
            axis(HeldKeys::UP, HeldKeys::DOWN),
        )
    }

    pub fn sprinting(self) -> bool {
        self.contains(HeldKeys::SPRINT)
    }
}

/// Physical keys the simulation understands.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Sprint,
    Interact,
    Inventory,
    Restart,
}

impl Key {
    /// The held flag for level-triggered keys.
    pub fn held_flag(self) -> Option<HeldKeys> {
        match self {
            Key::Up => Some(HeldKeys::UP),
            Key::Down => Some(HeldKeys::DOWN),
            Key::Left => Some(HeldKeys::LEFT),
            Key::Right => Some(HeldKeys::RIGHT),
            Key::Sprint => Some(HeldKeys::SPRINT),
            Key::Interact | Key::Inventory | Key::Restart => None,
        }
    }

    /// The command fired on press for edge-triggered keys.
    pub fn press_command(self) -> Option<Command> {
        match self {
            Key::Interact => Some(Command::Interact),
            Key::Inventory => Some(Command::ToggleInventory),
            Key::Restart => Some(Command::Restart),
            _ => None,
        }
    }
}

/// Discrete action drained by the engine once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Interact,
    ToggleInventory,
    Restart,
    UseItem(ItemKind),
    DropItem(ItemKind),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub held: HeldKeys,
    pressed: Vec<Key>,
    pending: Vec<Command>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if let Some(flag) = key.held_flag() {
            self.held.insert(flag);
            return;
        }
        if self.pressed.contains(&key) {
            return;
        }
        self.pressed.push(key);
        if let Some(command) = key.press_command() {
            self.pending.push(command);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if let Some(flag) = key.held_flag() {
            self.held.remove(flag);
        }
        self.pressed.retain(|pressed| *pressed != key);
    }

    /// Queues a command that has no key of its own (inventory panel actions).
    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Releases every key, e.g. when the frontend loses focus.
    pub fn release_all(&mut self) {
        self.held = HeldKeys::empty();
        self.pressed.clear();
    }

    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Command] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let held = HeldKeys::LEFT | HeldKeys::RIGHT | HeldKeys::DOWN;
        assert_eq!(held.direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn auto_repeat_queues_one_command() {
        let mut input = InputState::new();
        input.key_down(Key::Interact);
        input.key_down(Key::Interact);
        input.key_down(Key::Interact);
        assert_eq!(input.drain_commands(), vec![Command::Interact]);

        input.key_up(Key::Interact);
        input.key_down(Key::Interact);
        assert_eq!(input.drain_commands(), vec![Command::Interact]);
    }

    #[test]
    fn held_keys_follow_down_and_up() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.key_down(Key::Sprint);
        assert!(input.held.sprinting());
        input.key_up(Key::Sprint);
        assert_eq!(input.held, HeldKeys::RIGHT);
        assert!(input.pending().is_empty());
    }
}
