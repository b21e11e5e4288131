//! Runtime orchestration for the real-time game simulation.
//!
//! This crate owns a session on a background task and exposes it through a
//! cloneable [`RuntimeHandle`]. Frontends push key transitions into the
//! handle and subscribe to [`Topic::Game`] for discrete occurrences and to
//! [`Topic::Frame`] for one [`game_core::GameView`] per simulated frame.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
