//! Terminal frontend for Wayfarer.
//!
//! The frontend is a pure presentation layer: it owns no game state, feeds
//! key transitions into a [`runtime::RuntimeHandle`] and draws the
//! [`game_core::GameView`] frames the runtime publishes.

pub mod config;
pub mod frontend;
pub mod logging;

pub use config::ClientConfig;
