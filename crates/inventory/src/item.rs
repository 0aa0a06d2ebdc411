use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stocktrack_core::{DomainError, DomainResult, Entity, ItemId};

/// User-supplied fields for a new item, before id/timestamp assignment.
///
/// Quantities and prices arrive as signed values straight from the input
/// form; [`ItemDraft::validate`] is the only way they become a [`StockItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub price: i64,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
        price: i64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity,
            price,
        }
    }

    /// Check the draft and return `(trimmed name, quantity, price)`.
    pub(crate) fn validate(&self) -> DomainResult<(String, u64, u64)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let quantity = non_negative("quantity", self.quantity)?;
        let price = non_negative("price", self.price)?;
        Ok((name.to_string(), quantity, price))
    }
}

pub(crate) fn non_negative(field: &str, value: i64) -> DomainResult<u64> {
    u64::try_from(value)
        .map_err(|_| DomainError::validation(format!("{field} cannot be negative (got {value})")))
}

/// A single stock-keeping unit.
///
/// Only `quantity` changes after creation; the other fields are fixed, so
/// they are exposed through getters rather than public fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    id: ItemId,
    name: String,
    category: String,
    quantity: u64,
    price: u64,
    created_at: DateTime<Utc>,
}

impl StockItem {
    /// Rebuild an item from durable state (ids and timestamps already assigned).
    pub fn from_parts(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: u64,
        price: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            quantity,
            price,
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Unit price in the smallest unit of the configured currency.
    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this item with a different quantity.
    pub fn with_quantity(&self, quantity: u64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

impl Entity for StockItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_name() {
        let (name, quantity, price) = ItemDraft::new("  Widget ", "First", 3, 10)
            .validate()
            .unwrap();
        assert_eq!(name, "Widget");
        assert_eq!(quantity, 3);
        assert_eq!(price, 10);
    }

    #[test]
    fn draft_rejects_blank_name() {
        let err = ItemDraft::new("   ", "First", 1, 1).validate().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("name")),
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn draft_rejects_negative_values() {
        assert!(matches!(
            ItemDraft::new("Widget", "First", -1, 1).validate(),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            ItemDraft::new("Widget", "First", 1, -1).validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn with_quantity_keeps_other_fields() {
        let item = StockItem::from_parts(ItemId::new(), "Widget", "First", 10, 500, Utc::now());
        let updated = item.with_quantity(4);
        assert_eq!(updated.quantity(), 4);
        assert_eq!(updated.id(), item.id());
        assert_eq!(updated.name(), item.name());
        assert_eq!(updated.category(), item.category());
        assert_eq!(updated.price(), item.price());
        assert_eq!(updated.created_at(), item.created_at());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let item = StockItem::from_parts(ItemId::new(), "Widget", "First", 1, 2, Utc::now());
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["quantity"], 1);
    }
}
