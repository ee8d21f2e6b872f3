//! # Tick Helpers
//!
//! Frame-driven helpers. Nothing here runs on its own: the host loop calls
//! `tick(delta_seconds)` once per frame.

mod regulator;
mod scheduler;
mod state;
mod timer;
mod updater;

pub use regulator::{RangedRegulator, Regulator};
pub use scheduler::Scheduler;
pub use state::{GameState, GameStateMachine};
pub use timer::{ScopedTimer, SystemTimer, Timer};
pub use updater::{UpdateId, UpdateRegistry, Updateable};
