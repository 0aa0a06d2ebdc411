//! Persistence gateway boundary.
//!
//! The inventory core talks to durable storage only through
//! [`PersistenceGateway`]; it makes no assumption about the storage format.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::JsonFileGateway;
pub use in_memory::InMemoryGateway;
pub use r#trait::{GatewayError, PersistenceGateway};
