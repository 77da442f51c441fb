//! Taskboard: synchronisation engine for a multi-tenant task tracker's
//! project board.
//!
//! This crate keeps a project's tasks grouped into status columns, turns
//! drag gestures into optimistic status changes, and reconciles those
//! changes with an asynchronous remote API and background reloads.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board state with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote query/mutation API
//! - **Adapters**: Concrete implementations of ports (in-memory server)
//! - **Services**: The transition coordinator, event-driven board, and
//!   the async runtime that drives it
//!
//! # Modules
//!
//! - [`board`]: Task store, column projection, drag sessions and sync
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod telemetry;
