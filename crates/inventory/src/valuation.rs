//! Inventory valuation (quantity × unit price).
//!
//! Products are widened to `u128` before multiplying, so a single item can
//! never overflow and a sum only saturates far beyond any real inventory.

use crate::item::StockItem;

/// Value of one item: `quantity * price`.
pub fn item_value(item: &StockItem) -> u128 {
    u128::from(item.quantity()) * u128::from(item.price())
}

/// Sum of `quantity * price` over all items. Order-independent; zero for no items.
pub fn total_value<'a>(items: impl IntoIterator<Item = &'a StockItem>) -> u128 {
    items
        .into_iter()
        .fold(0u128, |acc, item| acc.saturating_add(item_value(item)))
}

/// Total units on hand.
pub fn total_quantity<'a>(items: impl IntoIterator<Item = &'a StockItem>) -> u128 {
    items
        .into_iter()
        .fold(0u128, |acc, item| acc.saturating_add(u128::from(item.quantity())))
}
