//! Application services for board synchronisation.

mod board;
mod coordinator;
mod executor;
mod runtime;

pub use board::{LoadState, TaskBoard};
pub use coordinator::{Resolution, StatusTransitionCoordinator};
pub use executor::CommandExecutor;
pub use runtime::BoardRuntime;
