//! # Global Search
//!
//! Case-insensitive substring search over the pack and every external
//! storage, annotated with where each hit lives and whether it can be
//! pulled into the pack right now.
//!
//! ## Scan Order
//! ```text
//! pack items (in order)
//!   └─► storage[0] items ─► storage[1] items ─► ... ─► storage[n] items
//!
//! Vaults hold coins only and are never scanned.
//! ```
//!
//! Results are not ranked; the scan order is the result order.

use serde::Serialize;

use crate::types::{Inventory, Item};
use crate::SEARCH_MIN_QUERY_LEN;

/// Location label for hits in the player's own pack.
pub const PACK_LOCATION: &str = "Player Pack";

/// One search result, borrowing from the searched inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit<'a> {
    pub item: &'a Item,
    /// [`PACK_LOCATION`] or the storage's name.
    pub location: &'a str,
    /// `None` for pack hits.
    pub storage_id: Option<&'a str>,
    /// True only for hits inside a nearby storage.
    pub can_transfer: bool,
}

/// Matches `item` against an already-lowercased query.
pub(crate) fn item_matches(item: &Item, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle) || item.category.label().contains(needle)
}

impl Inventory {
    /// Searches the pack and all storages for `query`.
    ///
    /// Queries shorter than two characters return nothing. The query is
    /// used as given (no trimming).
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        if query.chars().count() < SEARCH_MIN_QUERY_LEN {
            return Vec::new();
        }
        let lowered = query.to_lowercase();
        let needle = lowered.as_str();

        let pack_hits = self
            .items
            .iter()
            .filter(move |item| item_matches(item, needle))
            .map(|item| SearchHit {
                item,
                location: PACK_LOCATION,
                storage_id: None,
                can_transfer: false,
            });

        let storage_hits = self.external_storages.iter().flat_map(move |storage| {
            storage
                .inventory
                .items
                .iter()
                .filter(move |item| item_matches(item, needle))
                .map(move |item| SearchHit {
                    item,
                    location: storage.name.as_str(),
                    storage_id: Some(storage.id.as_str()),
                    can_transfer: storage.nearby,
                })
        });

        let hits: Vec<_> = pack_hits.chain(storage_hits).collect();
        tracing::debug!(query, hits = hits.len(), "Search finished");
        hits
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExternalStorage, ItemCategory};

    fn item(id: &str, name: &str, category: ItemCategory) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            category,
            quantity: 1,
            weight: 0.0,
            requires_attunement: false,
            is_attuned: false,
            description: None,
            value: None,
            uses: None,
        }
    }

    fn storage(id: &str, name: &str, nearby: bool, items: Vec<Item>) -> ExternalStorage {
        ExternalStorage {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            storage_type_id: "large-cart".to_string(),
            nearby,
            inventory: Inventory {
                items,
                ..Inventory::default()
            },
        }
    }

    fn sample() -> Inventory {
        Inventory {
            items: vec![
                item("p1", "Rope", ItemCategory::ToolKit),
                item("p2", "Potion of Healing", ItemCategory::Consumable),
            ],
            external_storages: vec![
                storage("s1", "Cart", true, vec![item("c1", "Spare Rope", ItemCategory::ToolKit)]),
                storage("s2", "Home", false, vec![item("h1", "Rope Ladder", ItemCategory::Large)]),
            ],
            ..Inventory::default()
        }
    }

    #[test]
    fn test_short_query_returns_nothing() {
        let inv = sample();
        assert!(inv.search("").is_empty());
        assert!(inv.search("r").is_empty());
    }

    #[test]
    fn test_hits_are_ordered_pack_then_storages() {
        let inv = sample();
        let hits = inv.search("RoPe");
        let ids: Vec<_> = hits.iter().map(|h| h.item.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "c1", "h1"]);

        assert_eq!(hits[0].location, PACK_LOCATION);
        assert_eq!(hits[0].storage_id, None);
        assert!(!hits[0].can_transfer);

        assert_eq!(hits[1].location, "Cart");
        assert_eq!(hits[1].storage_id, Some("s1"));
        assert!(hits[1].can_transfer);

        assert_eq!(hits[2].location, "Home");
        assert!(!hits[2].can_transfer);
    }

    #[test]
    fn test_matches_category_label() {
        let inv = sample();
        let hits = inv.search("tool/");
        assert_eq!(hits.len(), 2);
        assert_eq!(inv.search("consum").len(), 1);
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let inv = sample();
        let hits = inv.search(" r");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item.name, "Spare Rope");
        assert_eq!(inv.search("of ").len(), 1);
    }

    #[test]
    fn test_vault_contents_are_not_searched() {
        let mut inv = sample();
        inv.vaults.push(crate::types::Vault {
            id: "v1".into(),
            name: "Rope Bank".into(),
            location: String::new(),
            currency: Default::default(),
            notes: None,
            nearby: true,
        });
        assert_eq!(inv.search("bank").len(), 0);
    }
}
