//! Plain-text views of the service state.

use std::fmt::Write;

use stocktrack_core::Entity;
use stocktrack_infra::FailedWrite;
use stocktrack_inventory::{HistoryAction, HistoryEntry, StockItem, item_value};

pub fn items(items: &[StockItem], currency: &str) -> String {
    if items.is_empty() {
        return "No items. Add your first item to get started.\n".to_string();
    }
    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "{}  {:<20} {:<10} qty {:>6}  @ {:>8}  = {} {currency}",
            item.id(),
            item.name(),
            item.category(),
            item.quantity(),
            item.price(),
            item_value(item),
        );
    }
    out
}

pub fn history(entries: &[HistoryEntry], currency: &str) -> String {
    if entries.is_empty() {
        return "No history entries found.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let item = entry.item();
        let label = match entry.action() {
            HistoryAction::Add => "Added".to_string(),
            HistoryAction::Remove => "Removed".to_string(),
            HistoryAction::Update => match entry.previous_quantity() {
                Some(prev) => format!("Updated {prev} ->"),
                None => "Updated".to_string(),
            },
        };
        let _ = writeln!(
            out,
            "{}  {label} {} x {} ({})  value {} {currency}",
            entry.timestamp().format("%Y-%m-%d %H:%M:%S"),
            item.quantity(),
            item.name(),
            item.category(),
            item_value(item),
        );
    }
    out
}

pub fn failed(writes: &[FailedWrite]) -> String {
    if writes.is_empty() {
        return "No refused writes.\n".to_string();
    }
    let mut out = String::new();
    for failed in writes {
        let _ = writeln!(
            out,
            "{} {}: {}",
            failed.write.kind(),
            failed.write.item_id(),
            failed.error
        );
    }
    out
}

/// Warning printed on exit while writes are still queued.
pub fn exit_notice(pending_writes: usize) -> Option<String> {
    (pending_writes > 0).then(|| {
        format!("warning: {pending_writes} writes were never saved and are lost on exit")
    })
}
