//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! feeding input, querying the session, or streaming events from specific
//! topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Command as GameCommand, GameState, GameView, ItemKind, Key};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Forwards a key press. Repeated presses of an action key without a
    /// release in between fire only once.
    pub async fn key_down(&self, key: Key) -> Result<()> {
        self.send(Command::KeyDown(key)).await
    }

    pub async fn key_up(&self, key: Key) -> Result<()> {
        self.send(Command::KeyUp(key)).await
    }

    /// Releases every held key, e.g. when the terminal loses focus.
    pub async fn release_all(&self) -> Result<()> {
        self.send(Command::ReleaseAll).await
    }

    pub async fn use_item(&self, kind: ItemKind) -> Result<()> {
        self.send(Command::Enqueue(GameCommand::UseItem(kind))).await
    }

    pub async fn drop_item(&self, kind: ItemKind) -> Result<()> {
        self.send(Command::Enqueue(GameCommand::DropItem(kind))).await
    }

    /// Presentation snapshot of the current state.
    pub async fn query_view(&self) -> Result<GameView> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::QueryView { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::QueryState { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Game` - pickups, gates, dialogue, transitions, death
    /// - `Topic::Frame` - one view per simulated frame
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut frames = handle.subscribe(Topic::Frame);
    /// while let Ok(event) = frames.recv().await {
    ///     // Draw the frame
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }
}
