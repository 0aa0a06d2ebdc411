use std::sync::Arc;

use thiserror::Error;

use stocktrack_core::ItemId;
use stocktrack_inventory::{HistoryEntry, StockItem};

/// Persistence call failure.
///
/// These are infrastructure errors, as opposed to domain errors: the local
/// mutation they accompany has already been applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The store could not be reached (network, filesystem, availability).
    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write.
    #[error("gateway rejected write: {0}")]
    Rejected(String),

    /// Stored data could not be decoded.
    #[error("stored data is corrupt: {0}")]
    Corrupt(String),
}

impl GatewayError {
    /// Only an unreachable store is worth retrying; a refused write fails
    /// the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Unavailable(_))
    }
}

/// Durable storage for items and history.
///
/// Identifiers and timestamps are assigned locally before any call is made,
/// so `create_item` stores an already-identified item and returns the stored copy.
/// Implementations must keep `list_history` newest-first.
///
/// A write can be applied and its acknowledgement lost, so every write must be
/// safe to resend: creating an identical item or appending an entry that is
/// already stored succeeds without storing it twice.
#[async_trait::async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Store an item. An identical record under the same id succeeds; a
    /// different record under that id is `Rejected`.
    async fn create_item(&self, item: &StockItem) -> Result<StockItem, GatewayError>;

    /// Delete an item. Deleting an absent id succeeds.
    async fn delete_item(&self, id: ItemId) -> Result<(), GatewayError>;

    async fn update_item_quantity(
        &self,
        id: ItemId,
        quantity: u64,
    ) -> Result<StockItem, GatewayError>;

    async fn list_items(&self) -> Result<Vec<StockItem>, GatewayError>;

    /// Append an entry. An entry whose id is already stored is skipped.
    async fn append_history(&self, entry: &HistoryEntry) -> Result<(), GatewayError>;

    /// History, newest-first.
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, GatewayError>;
}

#[async_trait::async_trait]
impl<G> PersistenceGateway for Arc<G>
where
    G: PersistenceGateway + ?Sized,
{
    async fn create_item(&self, item: &StockItem) -> Result<StockItem, GatewayError> {
        (**self).create_item(item).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), GatewayError> {
        (**self).delete_item(id).await
    }

    async fn update_item_quantity(
        &self,
        id: ItemId,
        quantity: u64,
    ) -> Result<StockItem, GatewayError> {
        (**self).update_item_quantity(id, quantity).await
    }

    async fn list_items(&self) -> Result<Vec<StockItem>, GatewayError> {
        (**self).list_items().await
    }

    async fn append_history(&self, entry: &HistoryEntry) -> Result<(), GatewayError> {
        (**self).append_history(entry).await
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
        (**self).list_history().await
    }
}
