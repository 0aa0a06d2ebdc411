//! In-memory collection of stock items keyed by id.
//!
//! The store only enforces item-level rules. Pairing each mutation with a
//! history entry is done by [`crate::Inventory`].

use chrono::{DateTime, Utc};

use stocktrack_core::{DomainError, DomainResult, Entity, ItemId};

use crate::category::CategorySet;
use crate::item::{ItemDraft, StockItem, non_negative};

/// Result of a quantity change: the item after the change and the quantity before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityChange {
    pub item: StockItem,
    pub previous_quantity: u64,
}

/// Items in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStore {
    items: Vec<StockItem>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from durable state. Rejects duplicate ids.
    pub fn from_items(items: impl IntoIterator<Item = StockItem>) -> DomainResult<Self> {
        let mut store = Self::new();
        for item in items {
            if store.position(item.id()).is_some() {
                return Err(DomainError::validation(format!("duplicate item id {}", item.id())));
            }
            store.items.push(item);
        }
        Ok(store)
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == id)
    }

    /// Validate `draft` and append a new item with a fresh id.
    pub fn add(
        &mut self,
        draft: &ItemDraft,
        categories: &CategorySet,
        created_at: DateTime<Utc>,
    ) -> DomainResult<StockItem> {
        let (name, quantity, price) = draft.validate()?;
        let category = categories.resolve(&draft.category).ok_or_else(|| {
            DomainError::validation(format!("unknown category '{}'", draft.category.trim()))
        })?;

        let mut id = ItemId::new();
        while self.position(id).is_some() {
            id = ItemId::new();
        }

        let item = StockItem::from_parts(id, name, category, quantity, price, created_at);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Delete the item and hand it back.
    pub fn remove(&mut self, id: ItemId) -> DomainResult<StockItem> {
        let idx = self.position(id).ok_or_else(DomainError::not_found)?;
        Ok(self.items.remove(idx))
    }

    /// Replace the quantity of an item in place, leaving every other field alone.
    pub fn set_quantity(&mut self, id: ItemId, new_quantity: i64) -> DomainResult<QuantityChange> {
        let new_quantity = non_negative("quantity", new_quantity)?;
        self.replace_quantity(id, new_quantity)
    }

    /// Take `units` off the quantity on hand.
    pub fn remove_units(&mut self, id: ItemId, units: i64) -> DomainResult<QuantityChange> {
        let on_hand = self.get(id).ok_or_else(DomainError::not_found)?.quantity();
        if units <= 0 {
            return Err(DomainError::validation(format!(
                "units to remove must be positive (got {units})"
            )));
        }
        let remaining = on_hand.checked_sub(units as u64).ok_or_else(|| {
            DomainError::validation(format!(
                "cannot remove {units} units, only {on_hand} on hand"
            ))
        })?;
        self.replace_quantity(id, remaining)
    }

    fn replace_quantity(&mut self, id: ItemId, new_quantity: u64) -> DomainResult<QuantityChange> {
        let idx = self.position(id).ok_or_else(DomainError::not_found)?;

        let previous_quantity = self.items[idx].quantity();
        let updated = self.items[idx].with_quantity(new_quantity);
        self.items[idx] = updated.clone();

        Ok(QuantityChange {
            item: updated,
            previous_quantity,
        })
    }

    pub fn get(&self, id: ItemId) -> Option<&StockItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn list(&self) -> &[StockItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ItemDraft {
        ItemDraft::new("Widget", "First", 10, 500)
    }

    fn store_with_widget() -> (InventoryStore, StockItem) {
        let mut store = InventoryStore::new();
        let item = store.add(&widget(), &CategorySet::default(), Utc::now()).unwrap();
        (store, item)
    }

    #[test]
    fn add_assigns_id_and_canonical_category() {
        let mut store = InventoryStore::new();
        let item = store
            .add(&ItemDraft::new("Bolt", "second", 3, 2), &CategorySet::default(), Utc::now())
            .unwrap();
        assert_eq!(item.category(), "Second");
        assert_eq!(store.get(item.id()), Some(&item));
    }

    #[test]
    fn add_rejects_unknown_category() {
        let mut store = InventoryStore::new();
        let err = store
            .add(&ItemDraft::new("Bolt", "Fourth", 3, 2), &CategorySet::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("Fourth")));
        assert!(store.is_empty());
    }

    #[test]
    fn list_keeps_insertion_order() {
        let mut store = InventoryStore::new();
        let cats = CategorySet::default();
        let a = store.add(&ItemDraft::new("A", "First", 1, 1), &cats, Utc::now()).unwrap();
        let b = store.add(&ItemDraft::new("B", "First", 1, 1), &cats, Utc::now()).unwrap();
        let ids: Vec<_> = store.list().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![a.id(), b.id()]);
    }

    #[test]
    fn remove_missing_id_is_not_found() {
        let (mut store, _) = store_with_widget();
        assert_eq!(store.remove(ItemId::new()), Err(DomainError::NotFound));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_quantity_reports_previous() {
        let (mut store, item) = store_with_widget();
        let change = store.set_quantity(item.id(), 4).unwrap();
        assert_eq!(change.previous_quantity, 10);
        assert_eq!(change.item.quantity(), 4);
        assert_eq!(store.get(item.id()).unwrap().quantity(), 4);
    }

    #[test]
    fn set_quantity_rejects_negative() {
        let (mut store, item) = store_with_widget();
        let before = store.clone();
        assert!(matches!(store.set_quantity(item.id(), -1), Err(DomainError::Validation(_))));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_units_cannot_exceed_on_hand() {
        let (mut store, item) = store_with_widget();
        let err = store.remove_units(item.id(), 11).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("only 10")));
        assert!(matches!(store.remove_units(item.id(), 0), Err(DomainError::Validation(_))));

        let change = store.remove_units(item.id(), 10).unwrap();
        assert_eq!(change.item.quantity(), 0);
        assert_eq!(change.previous_quantity, 10);
    }

    #[test]
    fn from_items_rejects_duplicates() {
        let (_, item) = store_with_widget();
        let err = InventoryStore::from_items([item.clone(), item]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
