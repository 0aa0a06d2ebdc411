//! Inventory service: local apply, then gateway acknowledgement.
//!
//! Every mutation runs in two phases:
//!
//! 1. **Apply** against the in-memory [`Inventory`]. Validation happens here;
//!    a rejected intent returns a [`DomainError`] and nothing is queued.
//! 2. **Persist** by queueing the item write and the history append in the
//!    [`Outbox`] and flushing it through the gateway.
//!
//! A gateway failure never rolls back phase 1. When the store is unavailable
//! the failed write stays queued (in order, ahead of anything later) and the
//! failure is returned to the caller as [`SyncStatus::Pending`]. The next
//! mutation or an explicit [`InventoryService::retry_pending`] flushes again.
//! A write the store refuses is dropped from the queue into
//! [`InventoryService::failed_writes`] and reported as [`SyncStatus::Failed`].

use thiserror::Error;

use stocktrack_core::{DomainError, DomainResult, Entity, ItemId};
use stocktrack_inventory::{
    CategorySet, HistoryEntry, HistoryFilter, Inventory, InventoryReport, ItemDraft, Recorded,
    StockItem,
};

use crate::config::InventoryConfig;
use crate::gateway::{GatewayError, PersistenceGateway};
use crate::outbox::{FailedWrite, Outbox, PendingWrite};

/// Whether the durable store has caught up with local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Every queued write was acknowledged.
    Confirmed,
    /// The store was unavailable; `pending_writes` are still queued.
    Pending {
        error: GatewayError,
        pending_writes: usize,
    },
    /// The store refused `failed_writes` writes during this flush; `error` is
    /// the last refusal. Those writes will not be retried.
    Failed {
        error: GatewayError,
        failed_writes: usize,
    },
}

impl SyncStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SyncStatus::Confirmed)
    }
}

/// Locally applied result plus its persistence outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synced<T> {
    pub value: T,
    pub sync: SyncStatus,
}

/// Failure while loading durable state.
#[derive(Debug, Error)]
pub enum HydrateError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("stored records are inconsistent: {0}")]
    Domain(#[from] DomainError),
}

#[derive(Debug)]
pub struct InventoryService<G> {
    inventory: Inventory,
    gateway: G,
    outbox: Outbox,
    currency: String,
}

impl<G> InventoryService<G> {
    /// Start with an empty inventory.
    pub fn new(config: &InventoryConfig, gateway: G) -> Self {
        Self {
            inventory: Inventory::new(config.categories.clone()),
            gateway,
            outbox: Outbox::new(),
            currency: config.currency.clone(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn categories(&self) -> &CategorySet {
        self.inventory.categories()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn list(&self) -> &[StockItem] {
        self.inventory.list()
    }

    pub fn get(&self, id: ItemId) -> Option<&StockItem> {
        self.inventory.get(id)
    }

    pub fn total_value(&self) -> u128 {
        self.inventory.total_value()
    }

    /// History entries selected by a filter key (`all`, an action name or a
    /// category), newest-first.
    pub fn filtered_history(&self, key: &str) -> Vec<HistoryEntry> {
        self.inventory.filtered_history(&HistoryFilter::parse(key))
    }

    pub fn generate_report(&self) -> InventoryReport {
        self.inventory
            .generate_report()
            .with_currency(self.currency.clone())
    }

    /// Writes applied locally but not yet acknowledged by the gateway.
    pub fn pending_writes(&self) -> usize {
        self.outbox.len()
    }

    /// Writes the gateway refused since startup, oldest first.
    pub fn failed_writes(&self) -> &[FailedWrite] {
        self.outbox.failed()
    }
}

impl<G> InventoryService<G>
where
    G: PersistenceGateway,
{
    /// Load items and history through the gateway.
    pub async fn hydrate(config: &InventoryConfig, gateway: G) -> Result<Self, HydrateError> {
        let items = gateway.list_items().await?;
        let history = gateway.list_history().await?;
        tracing::info!(
            items = items.len(),
            history = history.len(),
            "inventory loaded from gateway"
        );

        let inventory = Inventory::restore(config.categories.clone(), items, history)?;
        Ok(Self {
            inventory,
            gateway,
            outbox: Outbox::new(),
            currency: config.currency.clone(),
        })
    }

    pub async fn add(&mut self, draft: &ItemDraft) -> DomainResult<Synced<StockItem>> {
        let Recorded { item, entry } = self.inventory.add(draft).inspect_err(|e| {
            tracing::info!(error = %e, "add rejected");
        })?;
        tracing::info!(
            item_id = %item.id(),
            name = item.name(),
            action = "add",
            "inventory mutated"
        );

        self.outbox.push(PendingWrite::CreateItem(item.clone()));
        self.outbox.push(PendingWrite::AppendHistory(entry));
        Ok(self.persist(item).await)
    }

    /// Remove an item. An absent id returns `DomainError::NotFound` and changes nothing.
    pub async fn remove(&mut self, id: ItemId) -> DomainResult<Synced<StockItem>> {
        let Recorded { item, entry } = self.inventory.remove(id).inspect_err(|e| {
            tracing::info!(item_id = %id, error = %e, "remove rejected");
        })?;
        tracing::info!(item_id = %id, action = "remove", "inventory mutated");

        self.outbox.push(PendingWrite::DeleteItem(id));
        self.outbox.push(PendingWrite::AppendHistory(entry));
        Ok(self.persist(item).await)
    }

    pub async fn set_quantity(
        &mut self,
        id: ItemId,
        new_quantity: i64,
    ) -> DomainResult<Synced<StockItem>> {
        let recorded = self
            .inventory
            .set_quantity(id, new_quantity)
            .inspect_err(|e| {
                tracing::info!(item_id = %id, error = %e, "quantity update rejected");
            })?;
        Ok(self.persist_update(recorded).await)
    }

    /// Take `units` off an item's quantity (must not exceed what is on hand).
    pub async fn remove_units(
        &mut self,
        id: ItemId,
        units: i64,
    ) -> DomainResult<Synced<StockItem>> {
        let recorded = self.inventory.remove_units(id, units).inspect_err(|e| {
            tracing::info!(item_id = %id, error = %e, "unit removal rejected");
        })?;
        Ok(self.persist_update(recorded).await)
    }

    /// Flush queued writes without applying a new mutation.
    pub async fn retry_pending(&mut self) -> SyncStatus {
        self.flush().await
    }

    async fn persist_update(&mut self, recorded: Recorded) -> Synced<StockItem> {
        let Recorded { item, entry } = recorded;
        tracing::info!(
            item_id = %item.id(),
            previous_quantity = entry.previous_quantity(),
            quantity = item.quantity(),
            action = "update",
            "inventory mutated"
        );

        self.outbox.push(PendingWrite::UpdateQuantity {
            id: item.id(),
            quantity: item.quantity(),
        });
        self.outbox.push(PendingWrite::AppendHistory(entry));
        self.persist(item).await
    }

    async fn persist<T>(&mut self, value: T) -> Synced<T> {
        let sync = self.flush().await;
        Synced { value, sync }
    }

    async fn flush(&mut self) -> SyncStatus {
        let failed_before = self.outbox.failed().len();
        let flushed = self.outbox.flush(&self.gateway).await;
        let refused = &self.outbox.failed()[failed_before..];

        match flushed {
            Err(error) => {
                let pending_writes = self.outbox.len();
                tracing::warn!(
                    error = %error,
                    pending_writes,
                    "gateway unavailable; local state kept"
                );
                SyncStatus::Pending {
                    error,
                    pending_writes,
                }
            }
            Ok(_) => match refused.last() {
                Some(last) => SyncStatus::Failed {
                    error: last.error.clone(),
                    failed_writes: refused.len(),
                },
                None => SyncStatus::Confirmed,
            },
        }
    }
}
