//! Export report: summary, current inventory and transaction history.
//!
//! Field names are part of the export format and must stay stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::{HistoryAction, HistoryEntry};
use crate::item::StockItem;
use crate::valuation::{item_value, total_value};

/// Shown in the "Previous Quantity" column for entries that are not updates.
pub const ABSENT_MARKER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(rename = "Total Items")]
    pub total_items: usize,
    #[serde(rename = "Total Value")]
    pub total_value: u128,
    #[serde(rename = "Currency", default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "Generated At")]
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Quantity")]
    pub quantity: u64,
    #[serde(rename = "Price")]
    pub price: u64,
    #[serde(rename = "Total Value")]
    pub total_value: u128,
    #[serde(rename = "Added Date")]
    pub added_at: DateTime<Utc>,
}

/// Either the prior quantity of an update or the absent marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreviousQuantity {
    Known(u64),
    Absent(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    #[serde(rename = "Action")]
    pub action: HistoryAction,
    #[serde(rename = "Item Name")]
    pub item_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Quantity")]
    pub quantity: u64,
    #[serde(rename = "Previous Quantity")]
    pub previous_quantity: PreviousQuantity,
    #[serde(rename = "Price")]
    pub price: u64,
    #[serde(rename = "Total Value")]
    pub total_value: u128,
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// The export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub summary: ReportSummary,
    pub current_inventory: Vec<InventoryRow>,
    pub transaction_history: Vec<HistoryRow>,
}

impl InventoryReport {
    /// Label the summary with a currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.summary.currency = Some(currency.into());
        self
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Download name, dated by generation day: `inventory-report-YYYY-MM-DD.json`.
    pub fn file_name(&self) -> String {
        format!(
            "inventory-report-{}.json",
            self.summary.generated_at.format("%Y-%m-%d")
        )
    }
}

/// Build a report stamped with the current time.
pub fn generate(items: &[StockItem], history: &[HistoryEntry]) -> InventoryReport {
    generate_at(items, history, Utc::now())
}

/// Build a report stamped with `generated_at`. Pure.
pub fn generate_at(
    items: &[StockItem],
    history: &[HistoryEntry],
    generated_at: DateTime<Utc>,
) -> InventoryReport {
    let current_inventory = items
        .iter()
        .map(|item| InventoryRow {
            name: item.name().to_string(),
            category: item.category().to_string(),
            quantity: item.quantity(),
            price: item.price(),
            total_value: item_value(item),
            added_at: item.created_at(),
        })
        .collect();

    let transaction_history = history
        .iter()
        .map(|entry| {
            let item = entry.item();
            HistoryRow {
                action: entry.action(),
                item_name: item.name().to_string(),
                category: item.category().to_string(),
                quantity: item.quantity(),
                previous_quantity: match entry.previous_quantity() {
                    Some(q) => PreviousQuantity::Known(q),
                    None => PreviousQuantity::Absent(ABSENT_MARKER.to_string()),
                },
                price: item.price(),
                total_value: item_value(item),
                timestamp: entry.timestamp(),
            }
        })
        .collect();

    InventoryReport {
        summary: ReportSummary {
            total_items: items.len(),
            total_value: total_value(items),
            currency: None,
            generated_at,
        },
        current_inventory,
        transaction_history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use stocktrack_core::{HistoryEntryId, ItemId};

    fn item(name: &str, quantity: u64, price: u64) -> StockItem {
        StockItem::from_parts(ItemId::new(), name, "First", quantity, price, Utc::now())
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap()
    }

    #[test]
    fn summary_uses_total_value() {
        let items = vec![item("A", 3, 1500), item("B", 2, 10)];
        let report = generate_at(&items, &[], fixed_time());
        assert_eq!(report.summary.total_items, 2);
        assert_eq!(report.summary.total_value, 4520);
        assert_eq!(report.summary.generated_at, fixed_time());
        assert!(report.transaction_history.is_empty());
    }

    #[test]
    fn history_rows_mark_absent_previous_quantity() {
        let widget = item("Widget", 4, 500);
        let history = vec![
            HistoryEntry::from_parts(
                HistoryEntryId::new(),
                HistoryAction::Update,
                widget.clone(),
                Some(10),
                Utc::now(),
            ),
            HistoryEntry::from_parts(
                HistoryEntryId::new(),
                HistoryAction::Add,
                widget,
                None,
                Utc::now(),
            ),
        ];
        let report = generate_at(&[], &history, fixed_time());
        assert_eq!(report.transaction_history[0].previous_quantity, PreviousQuantity::Known(10));
        assert_eq!(report.transaction_history[0].total_value, 2000);
        assert_eq!(
            report.transaction_history[1].previous_quantity,
            PreviousQuantity::Absent(ABSENT_MARKER.to_string())
        );
    }

    #[test]
    fn json_uses_stable_field_names() {
        let widget = item("Widget", 10, 500);
        let history = vec![HistoryEntry::from_parts(
            HistoryEntryId::new(),
            HistoryAction::Add,
            widget.clone(),
            None,
            Utc::now(),
        )];
        let report = generate_at(&[widget], &history, fixed_time()).with_currency("RWF");
        let text = report.to_json_pretty().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["summary"]["Total Items"], 1);
        assert_eq!(json["summary"]["Total Value"], 5000);
        assert_eq!(json["summary"]["Currency"], "RWF");
        assert_eq!(json["currentInventory"][0]["Name"], "Widget");
        assert_eq!(json["currentInventory"][0]["Total Value"], 5000);
        assert_eq!(json["transactionHistory"][0]["Action"], "add");
        assert_eq!(json["transactionHistory"][0]["Previous Quantity"], "-");
    }

    #[test]
    fn currency_is_omitted_when_unset() {
        let json = serde_json::to_value(generate_at(&[], &[], fixed_time())).unwrap();
        assert!(json["summary"].get("Currency").is_none());
    }

    #[test]
    fn file_name_uses_generation_date() {
        let report = generate_at(&[], &[], fixed_time());
        assert_eq!(report.file_name(), "inventory-report-2024-03-09.json");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: one inventory row per item, each valued at quantity × price.
        #[test]
        fn one_row_per_item(
            pairs in prop::collection::vec((0u64..100_000, 0u64..100_000), 0..40)
        ) {
            let items: Vec<_> = pairs.iter().map(|(q, p)| item("X", *q, *p)).collect();
            let report = generate_at(&items, &[], fixed_time());
            prop_assert_eq!(report.current_inventory.len(), items.len());
            for (row, (q, p)) in report.current_inventory.iter().zip(&pairs) {
                prop_assert_eq!(row.total_value, u128::from(*q) * u128::from(*p));
            }
        }
    }
}
