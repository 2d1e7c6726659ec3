//! # Inventory Summary
//!
//! A single digest of everything the pack and body views display, with
//! the advisory severities already worked out.

use serde::Serialize;
use ts_rs::TS;

use crate::calc::{
    attunement_severity, coin_carry_severity, count_attuned_items, pack_load_severity,
    storage_coin_severity, total_weight, Severity,
};
use crate::currency::CopperPieces;
use crate::rules::RuleTables;
use crate::types::{EquipmentSlots, Inventory};

/// Coin advisory for one external storage.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StorageSummary {
    pub storage_id: String,
    pub name: String,
    /// `None` when the storage type id is not in the rule tables.
    pub type_name: Option<String>,
    pub nearby: bool,
    pub item_count: usize,
    pub total_weight: f64,
    pub total_coins: u64,
    pub coin_severity: Severity,
}

/// Inventory summary for display and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub pack_type_id: String,
    pub pack_name: String,
    pub item_count: usize,
    pub total_weight: f64,
    pub capacity: u32,
    pub coin_weight: u64,
    pub total_coins: u64,
    pub pack_value: CopperPieces,
    pub nearby_value: CopperPieces,
    pub attuned_count: usize,
    pub slots: EquipmentSlots,
    pub load_severity: Severity,
    pub coin_severity: Severity,
    pub attunement_severity: Severity,
    pub storages: Vec<StorageSummary>,
}

impl InventorySummary {
    pub fn new(inventory: &Inventory, rules: &RuleTables) -> Self {
        let pack = inventory.current_pack_type(rules);
        let attuned = count_attuned_items(&inventory.items);

        let storages = inventory
            .external_storages
            .iter()
            .map(|storage| {
                let kind = rules.find_storage_type(&storage.storage_type_id);
                let coins = &storage.inventory.currency;
                StorageSummary {
                    storage_id: storage.id.clone(),
                    name: storage.name.clone(),
                    type_name: kind.map(|k| k.name.clone()),
                    nearby: storage.nearby,
                    item_count: storage.inventory.items.len(),
                    total_weight: total_weight(&storage.inventory.items),
                    total_coins: coins.total_coins(),
                    coin_severity: storage_coin_severity(
                        coins,
                        rules.storage_type(&storage.storage_type_id).coin_capacity,
                    ),
                }
            })
            .collect();

        InventorySummary {
            pack_type_id: pack.id.clone(),
            pack_name: pack.name.clone(),
            item_count: inventory.items.len(),
            total_weight: total_weight(&inventory.items),
            capacity: pack.capacity,
            coin_weight: inventory.currency.coin_weight(),
            total_coins: inventory.currency.total_coins(),
            pack_value: inventory.currency.value(),
            nearby_value: inventory.nearby_total_value(),
            attuned_count: attuned,
            slots: inventory.equipment_slots(rules),
            load_severity: pack_load_severity(&inventory.items, pack),
            coin_severity: coin_carry_severity(&inventory.currency),
            attunement_severity: attunement_severity(attuned),
            storages,
        }
    }

    /// Worst severity across every advisory.
    pub fn worst(&self) -> Severity {
        self.storages
            .iter()
            .map(|s| s.coin_severity)
            .chain([
                self.load_severity,
                self.coin_severity,
                self.attunement_severity,
            ])
            .max()
            .unwrap_or(Severity::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use crate::types::{ExternalStorage, ItemCategory, ItemDraft};

    #[test]
    fn test_summary_of_default_inventory() {
        let summary = InventorySummary::new(&Inventory::default(), &RuleTables::default());
        assert_eq!(summary.pack_name, "Standard Pack");
        assert_eq!(summary.capacity, 55);
        assert_eq!(summary.slots.utility, 4);
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.worst(), Severity::Ok);
    }

    #[test]
    fn test_summary_flags_overloads() {
        let rules = RuleTables::default();
        let mut inv = Inventory::default();
        let mut n = 0;
        let mut ids = || {
            n += 1;
            n.to_string()
        };
        inv.add_item(ItemDraft::new("Anvil", ItemCategory::Massive), &mut ids)
            .unwrap();
        inv.add_item(ItemDraft::new("Plate Armor", ItemCategory::HeavyArmor), &mut ids)
            .unwrap();
        inv.currency = Currency {
            gold: 35,
            ..Currency::empty()
        };
        inv.external_storages.push(ExternalStorage {
            id: "pet".into(),
            name: "Whiskers".into(),
            description: String::new(),
            storage_type_id: "retired-type".into(),
            nearby: true,
            inventory: Inventory {
                currency: Currency {
                    copper: 25,
                    ..Currency::empty()
                },
                ..Inventory::default()
            },
        });

        let summary = InventorySummary::new(&inv, &rules);
        // 50 + 12 against the standard pack's 55
        assert_eq!(summary.total_weight, 62.0);
        assert_eq!(summary.capacity, 55);
        assert_eq!(summary.load_severity, Severity::Error);
        assert_eq!(summary.coin_severity, Severity::Warning);
        assert_eq!(summary.coin_weight, 1);
        assert_eq!(summary.nearby_value.cp(), 3525);

        // Unknown type: no name, but coin limits come from the fallback (20)
        let pet = &summary.storages[0];
        assert_eq!(pet.type_name, None);
        assert_eq!(pet.coin_severity, Severity::Warning);
        assert_eq!(summary.worst(), Severity::Error);
    }

    #[test]
    fn test_summary_load_at_capacity_is_ok() {
        let mut inv = Inventory::default();
        inv.add_item(
            ItemDraft::new("Anvil", ItemCategory::Massive),
            &mut || "anvil".to_string(),
        )
        .unwrap();
        inv.add_item(
            ItemDraft::new("Rope", ItemCategory::ToolKit).weight(5.0),
            &mut || "rope".to_string(),
        )
        .unwrap();

        let summary = InventorySummary::new(&inv, &RuleTables::default());
        assert_eq!(summary.total_weight, 55.0);
        assert_eq!(summary.load_severity, Severity::Ok);
    }
}
