//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and session start-up so clients
//! can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::EngineError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires content to be configured before building")]
    MissingContent,

    #[error("failed to start the session")]
    Session(#[source] EngineError),
}
