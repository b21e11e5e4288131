//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::info;

use game_content::ContentBundle;
use game_core::{GameConfig, GameEngine, GameState, SpriteOracle};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Wall-clock time between simulated frames.
    pub frame_interval: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_FPS: u32 = 60;

    /// Frame interval for `fps` frames per second (at least one).
    pub fn frame_interval_for(fps: u32) -> Duration {
        Duration::from_secs(1) / fps.max(1)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            frame_interval: Self::frame_interval_for(Self::DEFAULT_FPS),
            event_buffer_size: 256,
            command_buffer_size: 64,
        }
    }
}

/// Main runtime that orchestrates the game simulation
///
/// Runtime owns the worker; [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Outstanding handles stop working once the worker has exited.
    pub async fn shutdown(self) -> Result<()> {
        // A worker that already stopped has dropped its receiver.
        let _ = self.handle.shutdown().await;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    content: Option<ContentBundle>,
    sprites: Option<Arc<dyn SpriteOracle>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            content: None,
            sprites: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state instead of starting a fresh session
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required content oracles
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the sprite provider used for walk-cycle lengths (optional)
    pub fn sprites(mut self, sprites: Arc<dyn SpriteOracle>) -> Self {
        self.sprites = Some(sprites);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let content = self.content.ok_or(RuntimeError::MissingContent)?;
        let game_config = self.config.game_config.clone();

        let initial_state = match self.state {
            Some(state) => state,
            None => {
                let env = content.env(self.sprites.as_deref());
                GameEngine::start_session(env, &game_config).map_err(RuntimeError::Session)?
            }
        };

        info!(
            target: "runtime::worker",
            seed = initial_state.seed,
            area = %initial_state.zone.area,
            "Session started"
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            initial_state,
            game_config,
            content,
            self.sprites,
            self.config.frame_interval,
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
