//! Single-file JSON gateway.
//!
//! The whole dataset lives in one JSON document that is rewritten on every
//! call. Writes go to a sibling temp file first and are renamed into place.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use stocktrack_core::{Entity, ItemId};
use stocktrack_inventory::{HistoryEntry, StockItem};

use super::r#trait::{GatewayError, PersistenceGateway};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    items: Vec<StockItem>,
    /// Newest-first.
    history: Vec<HistoryEntry>,
}

/// Gateway persisting to a JSON file. A missing file reads as empty.
#[derive(Debug)]
pub struct JsonFileGateway {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Snapshot, GatewayError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| GatewayError::Corrupt(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Snapshot::default()),
            Err(e) => Err(GatewayError::Unavailable(format!("{}: {e}", self.path.display()))),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), GatewayError> {
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| GatewayError::Rejected(format!("serialization failed: {e}")))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| GatewayError::Unavailable(format!("{}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| GatewayError::Unavailable(format!("{}: {e}", self.path.display())))
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for JsonFileGateway {
    async fn create_item(&self, item: &StockItem) -> Result<StockItem, GatewayError> {
        let _guard = self.lock.lock().await;
        let mut snapshot = self.load().await?;
        match snapshot.items.iter().find(|i| i.id() == item.id()) {
            Some(stored) if stored == item => return Ok(stored.clone()),
            Some(_) => {
                return Err(GatewayError::Rejected(format!(
                    "item {} already exists",
                    item.id()
                )));
            }
            None => {}
        }
        snapshot.items.push(item.clone());
        self.save(&snapshot).await?;
        Ok(item.clone())
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), GatewayError> {
        let _guard = self.lock.lock().await;
        let mut snapshot = self.load().await?;
        let before = snapshot.items.len();
        snapshot.items.retain(|i| i.id() != id);
        if snapshot.items.len() != before {
            self.save(&snapshot).await?;
        }
        Ok(())
    }

    async fn update_item_quantity(
        &self,
        id: ItemId,
        quantity: u64,
    ) -> Result<StockItem, GatewayError> {
        let _guard = self.lock.lock().await;
        let mut snapshot = self.load().await?;
        let slot = snapshot
            .items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or_else(|| GatewayError::Rejected(format!("item {id} not found")))?;
        *slot = slot.with_quantity(quantity);
        let updated = slot.clone();
        self.save(&snapshot).await?;
        Ok(updated)
    }

    async fn list_items(&self) -> Result<Vec<StockItem>, GatewayError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.items)
    }

    async fn append_history(&self, entry: &HistoryEntry) -> Result<(), GatewayError> {
        let _guard = self.lock.lock().await;
        let mut snapshot = self.load().await?;
        if snapshot.history.iter().any(|e| e.id() == entry.id()) {
            return Ok(());
        }
        snapshot.history.insert(0, entry.clone());
        self.save(&snapshot).await
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stocktrack_core::HistoryEntryId;
    use stocktrack_inventory::HistoryAction;

    fn item() -> StockItem {
        StockItem::from_parts(ItemId::new(), "Widget", "First", 10, 500, Utc::now())
    }

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let gw = JsonFileGateway::new(dir.path().join("inventory.json"));
        assert!(gw.list_items().await.unwrap().is_empty());
        assert!(gw.list_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_survive_a_new_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let widget = item();
        let entry = HistoryEntry::from_parts(
            HistoryEntryId::new(),
            HistoryAction::Add,
            widget.clone(),
            None,
            Utc::now(),
        );

        {
            let gw = JsonFileGateway::new(&path);
            gw.create_item(&widget).await.unwrap();
            gw.append_history(&entry).await.unwrap();
            // resent after a lost acknowledgement
            gw.create_item(&widget).await.unwrap();
            gw.append_history(&entry).await.unwrap();
            gw.update_item_quantity(widget.id(), 4).await.unwrap();
        }

        let reopened = JsonFileGateway::new(&path);
        let items = reopened.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity(), 4);
        assert_eq!(reopened.list_history().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        tokio::fs::write(&path, b"not json").await.unwrap();
        let gw = JsonFileGateway::new(&path);
        assert!(matches!(gw.list_items().await, Err(GatewayError::Corrupt(_))));
    }
}
