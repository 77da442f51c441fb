//! Task-board synchronisation engine.
//!
//! The board holds the authoritative local view of one project's tasks,
//! grouped into status columns. It accepts drag-initiated status changes,
//! applies them optimistically, and reconciles them with server
//! confirmations and background snapshot reloads. The module follows
//! hexagonal architecture:
//!
//! - Domain types and synchronous state in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
