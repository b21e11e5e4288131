//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), advances
//! the session through [`game_core::GameEngine`] on every frame, and
//! publishes [`Event`] notifications.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use game_content::ContentBundle;
use game_core::{
    Command as GameCommand, GameConfig, GameEngine, GameError, GameEvent, GameState, GameView,
    InputState, Key, SpriteOracle,
};

use crate::events::{Event, EventBus};

/// Commands that can be sent to the simulation worker
pub enum Command {
    KeyDown(Key),
    KeyUp(Key),
    ReleaseAll,
    /// Queue a command that has no key of its own (inventory actions).
    Enqueue(GameCommand),
    /// Query a presentation snapshot of the current state.
    QueryView { reply: oneshot::Sender<GameView> },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    Shutdown,
}

/// Background task that processes input and advances the simulation.
pub struct SimulationWorker {
    state: GameState,
    input: InputState,
    config: GameConfig,
    content: ContentBundle,
    sprites: Option<Arc<dyn SpriteOracle>>,
    frame_interval: Duration,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: GameState,
        config: GameConfig,
        content: ContentBundle,
        sprites: Option<Arc<dyn SpriteOracle>>,
        frame_interval: Duration,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state,
            input: InputState::new(),
            config,
            content,
            sprites,
            frame_interval,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    ///
    /// Runs until [`Command::Shutdown`] arrives or every handle is dropped.
    pub async fn run(mut self) {
        let mut frames = time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                now = frames.tick() => {
                    let dt = now.saturating_duration_since(last_frame).as_secs_f32();
                    last_frame = now;
                    self.step(dt);
                }
            }
        }

        debug!(target: "runtime::worker", "Simulation worker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::KeyDown(key) => self.input.key_down(key),
            Command::KeyUp(key) => self.input.key_up(key),
            Command::ReleaseAll => self.input.release_all(),
            Command::Enqueue(command) => self.input.push(command),
            Command::QueryView { reply } => {
                let _ = reply.send(GameView::from_state(&self.state, &self.config));
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::Shutdown => {}
        }
    }

    /// Advances the session by one frame and publishes what happened.
    fn step(&mut self, dt: f32) {
        let sprites = self.sprites.as_deref();
        let env = self.content.env(sprites);
        let mut engine = GameEngine::new(&mut self.state, &self.config);

        match engine.tick(env, &mut self.input, dt) {
            Ok(report) => {
                for event in report.events {
                    log_event(&event);
                    self.event_bus.publish(Event::Game(event));
                }
            }
            Err(error) => {
                error!(
                    target: "runtime::worker",
                    error = %error,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "Tick failed"
                );
            }
        }

        let view = GameView::from_state(&self.state, &self.config);
        self.event_bus.publish(Event::Frame(Box::new(view)));
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::TransitionStarted { from, to } => {
            info!(target: "runtime::worker", %from, %to, "Leaving area");
        }
        GameEvent::AreaEntered { area } => {
            info!(target: "runtime::worker", %area, "Entered area");
        }
        GameEvent::GateOpened { gate } => {
            info!(target: "runtime::worker", %gate, "Gate opened");
        }
        GameEvent::HazardTriggered { area } => {
            info!(target: "runtime::worker", %area, "Hazard triggered");
        }
        GameEvent::Died => info!(target: "runtime::worker", "Player died"),
        GameEvent::Restarted => info!(target: "runtime::worker", "Session restarted"),
        GameEvent::CommandRejected { command, error } => {
            debug!(
                target: "runtime::worker",
                command = ?command,
                error = %error,
                "Inventory command rejected"
            );
        }
        other => debug!(target: "runtime::worker", event = ?other, "Game event"),
    }
}
