//! In-memory adapters, used by tests and offline demos.

mod gateway;

pub use gateway::InMemoryRemoteGateway;
