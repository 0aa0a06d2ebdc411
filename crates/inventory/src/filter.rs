//! History filtering by action kind or category.

use crate::category::CategorySet;
use crate::history::{HistoryAction, HistoryEntry};

/// Key that shows every entry.
pub const ALL_KEY: &str = "all";

/// Parsed filter key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    Action(HistoryAction),
    /// Category label, compared case-insensitively.
    Category(String),
}

impl HistoryFilter {
    /// Parse a filter key. Never fails: anything that is not `all` or an
    /// action name is treated as a category label.
    pub fn parse(key: &str) -> Self {
        if key == ALL_KEY {
            return HistoryFilter::All;
        }
        match HistoryAction::from_key(key) {
            Some(action) => HistoryFilter::Action(action),
            None => HistoryFilter::Category(key.to_string()),
        }
    }

    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Action(action) => entry.action() == *action,
            HistoryFilter::Category(label) => {
                entry.item().category().to_lowercase() == label.to_lowercase()
            }
        }
    }

    pub fn key(&self) -> String {
        match self {
            HistoryFilter::All => ALL_KEY.to_string(),
            HistoryFilter::Action(action) => action.as_str().to_string(),
            HistoryFilter::Category(label) => label.clone(),
        }
    }
}

/// Whether `entry` is selected by `key`.
pub fn matches(entry: &HistoryEntry, key: &str) -> bool {
    HistoryFilter::parse(key).matches(entry)
}

/// Entries selected by `filter`, preserving the input order.
pub fn filter_history<'a>(
    entries: impl IntoIterator<Item = &'a HistoryEntry>,
    filter: &HistoryFilter,
) -> Vec<HistoryEntry> {
    entries
        .into_iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect()
}

/// Filters a presentation layer should offer: all, added, removed, then one per category.
pub fn available_filters(categories: &CategorySet) -> Vec<HistoryFilter> {
    let mut filters = vec![
        HistoryFilter::All,
        HistoryFilter::Action(HistoryAction::Add),
        HistoryFilter::Action(HistoryAction::Remove),
    ];
    filters.extend(categories.iter().map(|c| HistoryFilter::Category(c.to_string())));
    filters
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use stocktrack_core::{HistoryEntryId, ItemId};

    use crate::item::StockItem;

    fn entry(action: HistoryAction, category: &str) -> HistoryEntry {
        let item = StockItem::from_parts(ItemId::new(), "Widget", category, 1, 1, Utc::now());
        let previous = (action == HistoryAction::Update).then_some(2);
        HistoryEntry::from_parts(HistoryEntryId::new(), action, item, previous, Utc::now())
    }

    #[test]
    fn parses_keys() {
        assert_eq!(HistoryFilter::parse("all"), HistoryFilter::All);
        assert_eq!(HistoryFilter::parse("add"), HistoryFilter::Action(HistoryAction::Add));
        assert_eq!(HistoryFilter::parse("update"), HistoryFilter::Action(HistoryAction::Update));
        assert_eq!(HistoryFilter::parse("First"), HistoryFilter::Category("First".into()));
    }

    #[test]
    fn action_filter_selects_only_that_action() {
        let add = entry(HistoryAction::Add, "First");
        let remove = entry(HistoryAction::Remove, "First");
        assert!(matches(&add, "add"));
        assert!(!matches(&remove, "add"));
        assert!(matches(&remove, "remove"));
    }

    #[test]
    fn category_filter_ignores_case() {
        let e = entry(HistoryAction::Add, "Second");
        assert!(matches(&e, "second"));
        assert!(matches(&e, "SECOND"));
        assert!(!matches(&e, "First"));
    }

    #[test]
    fn filter_history_keeps_order() {
        let entries = vec![
            entry(HistoryAction::Remove, "First"),
            entry(HistoryAction::Add, "Second"),
            entry(HistoryAction::Add, "First"),
        ];
        let filtered = filter_history(&entries, &HistoryFilter::parse("first"));
        assert_eq!(filtered, vec![entries[0].clone(), entries[2].clone()]);
    }

    #[test]
    fn available_filters_follow_categories() {
        let keys: Vec<_> = available_filters(&CategorySet::new(["Tools"]))
            .iter()
            .map(HistoryFilter::key)
            .collect();
        assert_eq!(keys, vec!["all", "add", "remove", "Tools"]);
    }

    fn arb_action() -> impl Strategy<Value = HistoryAction> {
        prop_oneof![
            Just(HistoryAction::Add),
            Just(HistoryAction::Remove),
            Just(HistoryAction::Update),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the `all` key selects every entry of any log.
        #[test]
        fn all_matches_everything(
            specs in prop::collection::vec((arb_action(), "[A-Za-z]{1,12}"), 0..30)
        ) {
            let entries: Vec<_> = specs.iter().map(|(a, c)| entry(*a, c)).collect();
            for e in &entries {
                prop_assert!(matches(e, "all"));
            }
            prop_assert_eq!(filter_history(&entries, &HistoryFilter::All), entries);
        }
    }
}
