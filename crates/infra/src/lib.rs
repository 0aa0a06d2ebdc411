//! Infrastructure layer: persistence gateways, configuration, and the
//! service that keeps the in-memory inventory and durable storage in step.

pub mod config;
pub mod gateway;
pub mod outbox;
pub mod service;


pub use config::InventoryConfig;
pub use gateway::{GatewayError, InMemoryGateway, JsonFileGateway, PersistenceGateway};
pub use outbox::{FailedWrite, Outbox, PendingWrite};
pub use service::{HydrateError, InventoryService, SyncStatus, Synced};
