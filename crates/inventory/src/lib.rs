//! Inventory domain: stock items, their audit history and derived views.
//!
//! Everything here is deterministic domain logic (no IO, no storage). The
//! [`Inventory`] container is the narrow mutation API; the remaining modules
//! are pure functions over its state.

pub mod category;
pub mod filter;
pub mod history;
pub mod inventory;
pub mod item;
pub mod report;
pub mod store;
pub mod valuation;

pub use category::{CategorySet, DEFAULT_CATEGORIES};
pub use filter::{HistoryFilter, available_filters, filter_history, matches};
pub use history::{HistoryAction, HistoryEntry, HistoryLog};
pub use inventory::{Inventory, Recorded};
pub use item::{ItemDraft, StockItem};
pub use report::{InventoryReport, generate, generate_at};
pub use store::{InventoryStore, QuantityChange};
pub use valuation::{item_value, total_quantity, total_value};
