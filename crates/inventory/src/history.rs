//! Append-only audit log of inventory mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stocktrack_core::{Entity, HistoryEntryId};

use crate::item::StockItem;

/// Kind of mutation recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Add,
    Remove,
    Update,
}

impl HistoryAction {
    pub const ALL: [HistoryAction; 3] = [
        HistoryAction::Add,
        HistoryAction::Remove,
        HistoryAction::Update,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HistoryAction::Add => "add",
            HistoryAction::Remove => "remove",
            HistoryAction::Update => "update",
        }
    }

    /// Exact, case-sensitive match on the wire name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == key)
    }
}

impl core::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded mutation.
///
/// `item` is a snapshot of the item after the action; it never tracks the live item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: HistoryEntryId,
    action: HistoryAction,
    item: StockItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    previous_quantity: Option<u64>,
    timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Rebuild an entry from durable state.
    pub fn from_parts(
        id: HistoryEntryId,
        action: HistoryAction,
        item: StockItem,
        previous_quantity: Option<u64>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            action,
            item,
            previous_quantity,
            timestamp,
        }
    }

    pub fn action(&self) -> HistoryAction {
        self.action
    }

    pub fn item(&self) -> &StockItem {
        &self.item
    }

    /// Quantity immediately before an `update`; `None` for other actions.
    pub fn previous_quantity(&self) -> Option<u64> {
        self.previous_quantity
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Entity for HistoryEntry {
    type Id = HistoryEntryId;

    fn id(&self) -> HistoryEntryId {
        self.id
    }
}

/// Newest-first log. Entries are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    // Stored oldest-first so recording is a push; read order is reversed.
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from durable state given newest-first.
    pub fn from_newest_first(entries: impl IntoIterator<Item = HistoryEntry>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.reverse();
        Self { entries }
    }

    /// Append an entry for `action` on `item`, stamped with `timestamp`.
    ///
    /// `previous_quantity` is kept only for `update` actions.
    pub fn record(
        &mut self,
        action: HistoryAction,
        item: &StockItem,
        previous_quantity: Option<u64>,
        timestamp: DateTime<Utc>,
    ) -> HistoryEntry {
        let previous_quantity = match action {
            HistoryAction::Update => previous_quantity,
            HistoryAction::Add | HistoryAction::Remove => None,
        };
        let entry = HistoryEntry {
            id: HistoryEntryId::new(),
            action,
            item: item.clone(),
            previous_quantity,
            timestamp,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Entries newest-first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter().rev()
    }

    /// Owned snapshot, newest-first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
