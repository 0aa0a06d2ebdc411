use std::sync::RwLock;

use stocktrack_core::{Entity, ItemId};
use stocktrack_inventory::{HistoryEntry, StockItem};

use super::r#trait::{GatewayError, PersistenceGateway};

/// In-memory gateway.
///
/// Intended for tests/dev and for running without a backing store.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    items: RwLock<Vec<StockItem>>,
    // Oldest-first; reversed on read.
    history: RwLock<Vec<HistoryEntry>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> GatewayError {
        GatewayError::Unavailable("lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn create_item(&self, item: &StockItem) -> Result<StockItem, GatewayError> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        match items.iter().find(|i| i.id() == item.id()) {
            Some(stored) if stored == item => Ok(stored.clone()),
            Some(_) => Err(GatewayError::Rejected(format!(
                "item {} already exists",
                item.id()
            ))),
            None => {
                items.push(item.clone());
                Ok(item.clone())
            }
        }
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), GatewayError> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        items.retain(|i| i.id() != id);
        Ok(())
    }

    async fn update_item_quantity(
        &self,
        id: ItemId,
        quantity: u64,
    ) -> Result<StockItem, GatewayError> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        let slot = items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or_else(|| GatewayError::Rejected(format!("item {id} not found")))?;
        *slot = slot.with_quantity(quantity);
        Ok(slot.clone())
    }

    async fn list_items(&self) -> Result<Vec<StockItem>, GatewayError> {
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        Ok(items.clone())
    }

    async fn append_history(&self, entry: &HistoryEntry) -> Result<(), GatewayError> {
        let mut history = self.history.write().map_err(|_| Self::poisoned())?;
        if !history.iter().any(|e| e.id() == entry.id()) {
            history.push(entry.clone());
        }
        Ok(())
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
        let history = self.history.read().map_err(|_| Self::poisoned())?;
        Ok(history.iter().rev().cloned().collect())
    }
}
