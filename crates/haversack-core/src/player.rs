//! # Player Data
//!
//! The per-player record a host stores: the character's inventory, the
//! items they starred, and when the record was last opened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::types::Inventory;

/// Stored record for one player token.
///
/// `lastAccessed` is stored as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub token_id: String,
    #[serde(default)]
    pub inventory: Inventory,
    /// Starred item ids, in the order they were starred.
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[ts(type = "number")]
    pub last_accessed: DateTime<Utc>,
}

impl PlayerData {
    /// A fresh record with the default inventory.
    pub fn new(token_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        PlayerData {
            token_id: token_id.into(),
            inventory: Inventory::default(),
            favorites: Vec::new(),
            last_accessed: now,
        }
    }

    pub fn is_favorite(&self, item_id: &str) -> bool {
        self.favorites.iter().any(|id| id == item_id)
    }

    /// Stars or unstars an item. Returns true if it is now a favorite.
    pub fn toggle_favorite(&mut self, item_id: &str) -> bool {
        if let Some(pos) = self.favorites.iter().position(|id| id == item_id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(item_id.to_string());
            true
        }
    }

    /// Drops favorites pointing at items no longer in the pack.
    pub fn prune_favorites(&mut self) -> usize {
        let before = self.favorites.len();
        let inventory = &self.inventory;
        self.favorites.retain(|id| inventory.item(id).is_some());
        before - self.favorites.len()
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed = now;
    }
}

/// Every favorite across a set of players, once each, in first-seen order.
pub fn all_favorites<'a>(players: impl IntoIterator<Item = &'a PlayerData>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    players
        .into_iter()
        .flat_map(|p| p.favorites.iter().map(String::as_str))
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_toggle_favorite() {
        let mut player = PlayerData::new("token-1", at(0));
        assert!(player.toggle_favorite("sword"));
        assert!(player.is_favorite("sword"));
        assert!(!player.toggle_favorite("sword"));
        assert!(player.favorites.is_empty());
    }

    #[test]
    fn test_prune_favorites() {
        let mut player = PlayerData::new("token-1", at(0));
        player.favorites = vec!["gone".into()];
        assert_eq!(player.prune_favorites(), 1);
        assert!(player.favorites.is_empty());
    }

    #[test]
    fn test_touch_and_millisecond_round_trip() {
        let mut player = PlayerData::new("token-1", at(1_000));
        player.touch(at(1_700_000_000_123));

        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["lastAccessed"], 1_700_000_000_123i64);
        assert_eq!(json["tokenId"], "token-1");

        let back: PlayerData = serde_json::from_value(json).unwrap();
        assert_eq!(back, player);
    }

    #[test]
    fn test_all_favorites() {
        let mut a = PlayerData::new("a", at(0));
        let mut b = PlayerData::new("b", at(0));
        a.toggle_favorite("x");
        b.toggle_favorite("y");
        b.toggle_favorite("z");
        assert_eq!(all_favorites([&a, &b]), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_all_favorites_shared_item_listed_once() {
        let mut a = PlayerData::new("a", at(0));
        let mut b = PlayerData::new("b", at(0));
        a.toggle_favorite("rope");
        a.toggle_favorite("torch");
        b.toggle_favorite("torch");
        b.toggle_favorite("rope");
        b.toggle_favorite("map");
        assert_eq!(all_favorites([&a, &b]), vec!["rope", "torch", "map"]);
    }
}
