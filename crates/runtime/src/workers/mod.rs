//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the session and advances it once per frame.

mod simulation;

pub use simulation::{Command, SimulationWorker};
