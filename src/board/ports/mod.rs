//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;

pub use gateway::{GatewayError, GatewayResult, RemoteSyncGateway, StatusConfirmation};
