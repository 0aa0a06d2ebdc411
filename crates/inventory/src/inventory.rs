//! Inventory state container.
//!
//! Owns the item store and the history log. Every successful mutation
//! appends exactly one history entry; a failed mutation changes neither.

use chrono::Utc;

use stocktrack_core::{DomainResult, Entity, ItemId};

use crate::category::CategorySet;
use crate::filter::{HistoryFilter, filter_history};
use crate::history::{HistoryAction, HistoryEntry, HistoryLog};
use crate::item::{ItemDraft, StockItem};
use crate::report::{InventoryReport, generate};
use crate::store::{InventoryStore, QuantityChange};
use crate::valuation::total_value;

/// A successful mutation: the item as it now stands (or as it was when
/// removed) together with the history entry it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub item: StockItem,
    pub entry: HistoryEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    categories: CategorySet,
    store: InventoryStore,
    history: HistoryLog,
}

impl Inventory {
    pub fn new(categories: CategorySet) -> Self {
        Self {
            categories,
            store: InventoryStore::new(),
            history: HistoryLog::new(),
        }
    }

    /// Rebuild from durable state. `history` is newest-first.
    pub fn restore(
        categories: CategorySet,
        items: impl IntoIterator<Item = StockItem>,
        history: impl IntoIterator<Item = HistoryEntry>,
    ) -> DomainResult<Self> {
        Ok(Self {
            categories,
            store: InventoryStore::from_items(items)?,
            history: HistoryLog::from_newest_first(history),
        })
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn add(&mut self, draft: &ItemDraft) -> DomainResult<Recorded> {
        let now = Utc::now();
        let item = self.store.add(draft, &self.categories, now)?;
        let entry = self.history.record(HistoryAction::Add, &item, None, now);
        tracing::debug!(item_id = %item.id(), "item added");
        Ok(Recorded { item, entry })
    }

    pub fn remove(&mut self, id: ItemId) -> DomainResult<Recorded> {
        let item = self.store.remove(id)?;
        let entry = self.history.record(HistoryAction::Remove, &item, None, Utc::now());
        tracing::debug!(item_id = %id, "item removed");
        Ok(Recorded { item, entry })
    }

    pub fn set_quantity(&mut self, id: ItemId, new_quantity: i64) -> DomainResult<Recorded> {
        let change = self.store.set_quantity(id, new_quantity)?;
        Ok(self.record_update(change))
    }

    /// Remove `units` of an item while keeping the item itself.
    pub fn remove_units(&mut self, id: ItemId, units: i64) -> DomainResult<Recorded> {
        let change = self.store.remove_units(id, units)?;
        Ok(self.record_update(change))
    }

    fn record_update(&mut self, change: QuantityChange) -> Recorded {
        let QuantityChange {
            item,
            previous_quantity,
        } = change;
        let entry = self
            .history
            .record(HistoryAction::Update, &item, Some(previous_quantity), Utc::now());
        tracing::debug!(
            item_id = %item.id(),
            previous_quantity,
            quantity = item.quantity(),
            "item quantity updated"
        );
        Recorded { item, entry }
    }

    pub fn get(&self, id: ItemId) -> Option<&StockItem> {
        self.store.get(id)
    }

    pub fn list(&self) -> &[StockItem] {
        self.store.list()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn total_value(&self) -> u128 {
        total_value(self.store.list())
    }

    pub fn filtered_history(&self, filter: &HistoryFilter) -> Vec<HistoryEntry> {
        filter_history(self.history.iter(), filter)
    }

    pub fn generate_report(&self) -> InventoryReport {
        generate(self.store.list(), &self.history.list())
    }
}
