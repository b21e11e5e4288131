//! Per-frame simulation pipeline.
//!
//! The [`GameEngine`] is the only writer of [`GameState`]. Each call to
//! [`GameEngine::tick`] runs the stages in a fixed order:
//!
//! 1. cap `dt` and age notices
//! 2. drain queued commands (restart, inventory, interact, use, drop)
//! 3. movement and coin pickup (skipped while suspended or in dialogue)
//! 4. fades and hazard countdown
//! 5. exit check
//! 6. interaction hint and animation

mod errors;
pub mod interaction;
pub mod movement;
pub mod proximity;
pub mod zone;

#[cfg(test)]
mod test_support;

pub use errors::{EngineError, TickPhase};

use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::event::{GameEvent, TickReport};
use crate::input::{Command, InputState};
use crate::state::{AreaId, GameState, ZonePhase};

/// Game engine that drives one session.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    /// Builds a fresh session with the first area mounted.
    pub fn start_session(env: GameEnv<'_>, config: &GameConfig) -> Result<GameState, EngineError> {
        Self::fresh_session(&env, config, config.seed)
    }

    fn fresh_session(
        env: &GameEnv<'_>,
        config: &GameConfig,
        seed: u64,
    ) -> Result<GameState, EngineError> {
        let mut state = GameState::new(config);
        state.seed = seed;
        zone::mount_area(&mut state, env, AreaId::CAMP)
            .map_err(|error| EngineError::oracle(TickPhase::Session, error))?;
        state.zone.phase = ZonePhase::Active;
        Ok(state)
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Rebuilds the whole session from scratch, keeping the seed.
    pub fn restart(&mut self, env: GameEnv<'_>) -> Result<(), EngineError> {
        let seed = self.state.seed;
        *self.state = Self::fresh_session(&env, self.config, seed)?;
        Ok(())
    }

    /// Advances the simulation by `dt` seconds.
    pub fn tick(
        &mut self,
        env: GameEnv<'_>,
        input: &mut InputState,
        dt: f32,
    ) -> Result<TickReport, EngineError> {
        let dt = dt.clamp(0.0, self.config.timing.max_tick);
        let mut events = Vec::new();

        self.state.ui.age_notices(dt);

        for command in input.drain_commands() {
            if self.apply_command(&env, command, &mut events)? {
                // Anything queued behind a restart belonged to the old session.
                break;
            }
        }

        let can_move = !self.state.zone.is_suspended() && self.state.dialogue.is_none();
        let moving = if can_move {
            let outcome = movement::step(
                &mut self.state.player,
                &self.state.obstacles,
                &self.config.world,
                input.held,
                dt,
            );
            for total in movement::collect_coins(self.state) {
                events.push(GameEvent::CoinCollected { total });
            }
            outcome.moving
        } else {
            false
        };

        zone::advance(self.state, self.config, &env, dt, &mut events)
            .map_err(|error| EngineError::oracle(TickPhase::Zone, error))?;
        zone::check_exit(self.state, self.config, &mut events);

        self.state.ui.hint = proximity::interaction_hint(self.state, self.config);

        let facing = self.state.player.animation.facing;
        let frames = env.walk_frames(facing);
        self.state.player.animation.advance(
            moving,
            dt,
            self.config.timing.frame_delay,
            frames,
        );

        Ok(TickReport { events })
    }

    /// Applies one command. Returns true if the session was restarted.
    fn apply_command(
        &mut self,
        env: &GameEnv<'_>,
        command: Command,
        events: &mut Vec<GameEvent>,
    ) -> Result<bool, EngineError> {
        if command == Command::Restart {
            self.restart(*env)?;
            events.push(GameEvent::Restarted);
            return Ok(true);
        }
        if self.state.is_dead() {
            return Ok(false);
        }
        if command == Command::ToggleInventory {
            self.state.ui.inventory_open = !self.state.ui.inventory_open;
            events.push(GameEvent::InventoryToggled {
                open: self.state.ui.inventory_open,
            });
            return Ok(false);
        }
        if self.state.zone.is_suspended() {
            return Ok(false);
        }

        let result = match command {
            Command::Interact => interaction::interact(self.state, self.config, env, events)
                .map_err(|error| EngineError::oracle(TickPhase::Commands, error)),
            Command::UseItem(kind) => {
                interaction::use_item(self.state, self.config, env, kind, events)
            }
            Command::DropItem(kind) => {
                interaction::drop_item(self.state, self.config, kind, events)
            }
            Command::Restart | Command::ToggleInventory => Ok(()),
        };

        match result {
            Err(EngineError::Inventory(error)) => {
                events.push(GameEvent::CommandRejected { command, error });
                Ok(false)
            }
            other => other.map(|()| false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::input::Key;
    use crate::state::{DialogueScript, DialogueState, EntityId, ItemKind, NpcKind};
    use super::test_support::TestWorld;

    fn session(world: &TestWorld, config: &GameConfig) -> GameState {
        GameEngine::start_session(world.env(), config).expect("camp mounts")
    }

    #[test]
    fn tick_moves_player_and_animates() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        let mut input = InputState::new();
        input.key_down(Key::Down);

        let mut engine = GameEngine::new(&mut state, &config);
        for _ in 0..10 {
            engine.tick(world.env(), &mut input, 0.033).unwrap();
        }
        let state = engine.state();
        assert!(state.player.bounds.y > 100.0);
        assert!(state.player.animation.moving);
        assert!(state.player.animation.frame > 0);
    }

    #[test]
    fn oversized_dt_is_capped() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        let mut input = InputState::new();
        input.key_down(Key::Down);

        GameEngine::new(&mut state, &config)
            .tick(world.env(), &mut input, 5.0)
            .unwrap();
        let travelled = state.player.bounds.y - 100.0;
        assert!(travelled <= config.player.base_speed * config.timing.max_tick + 1e-3);
    }

    #[test]
    fn dialogue_freezes_movement() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        state.dialogue = Some(DialogueState::open(
            EntityId(1),
            NpcKind::Homeless,
            DialogueScript::new(["..."]),
        ));
        let mut input = InputState::new();
        input.key_down(Key::Right);

        GameEngine::new(&mut state, &config)
            .tick(world.env(), &mut input, 0.033)
            .unwrap();
        assert_eq!(state.player.bounds.x, 100.0);
        assert!(!state.player.animation.moving);
    }

    #[test]
    fn restart_discards_commands_queued_behind_it() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        state.quest.coins = 3;
        state.player.bounds = Rect::new(300.0, 300.0, 32.0, 50.0);

        let mut input = InputState::new();
        input.push(Command::Restart);
        input.push(Command::ToggleInventory);

        let report = GameEngine::new(&mut state, &config)
            .tick(world.env(), &mut input, 0.0)
            .unwrap();
        assert!(report.contains(|event| *event == GameEvent::Restarted));
        assert!(!report.contains(|event| matches!(event, GameEvent::InventoryToggled { .. })));
        assert_eq!(state.quest.coins, 0);
        assert_eq!(state.player.position(), config.player.start);
        assert!(!state.ui.inventory_open);
        assert!(input.pending().is_empty());
    }

    #[test]
    fn dead_player_only_accepts_restart() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        state.zone.phase = ZonePhase::Dead;
        state.inventory.add(ItemKind::Herb, 1).unwrap();

        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.push(Command::ToggleInventory);
        input.push(Command::Interact);
        input.push(Command::DropItem(ItemKind::Herb));

        let mut engine = GameEngine::new(&mut state, &config);
        let report = engine.tick(world.env(), &mut input, 0.033).unwrap();
        assert!(report.is_empty());
        assert!(engine.state().is_dead());
        assert!(engine.state().inventory.contains(ItemKind::Herb));
        assert_eq!(engine.state().player.bounds.x, 100.0);

        input.key_down(Key::Restart);
        let report = engine.tick(world.env(), &mut input, 0.033).unwrap();
        assert!(report.contains(|event| *event == GameEvent::Restarted));
        assert!(!engine.state().is_dead());
        assert!(engine.state().inventory.is_empty());
    }

    #[test]
    fn inventory_toggles_during_transition() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        let mut events = Vec::new();
        zone::request_transition(&mut state, AreaId::EASTERN_WOODS, &mut events);

        let mut input = InputState::new();
        input.push(Command::ToggleInventory);
        input.push(Command::DropItem(ItemKind::Herb));
        let report = GameEngine::new(&mut state, &config)
            .tick(world.env(), &mut input, 0.01)
            .unwrap();
        assert!(state.ui.inventory_open);
        // Drop is ignored while suspended rather than rejected.
        assert!(!report.contains(|event| matches!(event, GameEvent::CommandRejected { .. })));
    }

    #[test]
    fn bad_inventory_command_is_reported() {
        let world = TestWorld::new();
        let config = GameConfig::default();
        let mut state = session(&world, &config);
        let mut input = InputState::new();
        input.push(Command::UseItem(ItemKind::Lantern));

        let report = GameEngine::new(&mut state, &config)
            .tick(world.env(), &mut input, 0.01)
            .unwrap();
        assert_eq!(
            report.events,
            vec![GameEvent::CommandRejected {
                command: Command::UseItem(ItemKind::Lantern),
                error: crate::state::InventoryError::NotHeld(ItemKind::Lantern),
            }]
        );
    }

    #[test]
    fn missing_zone_oracle_fails_session_start() {
        let config = GameConfig::default();
        let error = GameEngine::start_session(GameEnv::empty(), &config).unwrap_err();
        assert_eq!(error.to_string(), "session failed: ZoneOracle not available");
    }
}
