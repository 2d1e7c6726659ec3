//! # Rule Tables
//!
//! Pack archetypes, storage archetypes and coin names that every
//! calculation consults.
//!
//! ## Where the Tables Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  default_pack_types()            ┐                                      │
//! │  default_external_storage_types()├──► RuleTables::from_customizations() │
//! │  RuleCustomizations (DM edits)   ┘        defaults first, customs after │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                           passed by reference into every query          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Built-ins always come first, so a lookup miss can fall back to entry 0
//! of a table that is never empty.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::currency::Denomination;
use crate::error::{CoreError, CoreResult};
use crate::id::IdGenerator;
use crate::types::{CoinCapacity, ExternalStorageType, ItemCategory, PackType};
use crate::validation::{
    validate_pack_type, validate_storage_type, validate_unique_ids, ValidationResult,
};

// =============================================================================
// Coin Names
// =============================================================================

/// Display labels for the four denominations. Purely cosmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct CoinNames {
    pub copper: String,
    pub silver: String,
    pub gold: String,
    pub platinum: String,
}

impl CoinNames {
    pub fn name(&self, denomination: Denomination) -> &str {
        match denomination {
            Denomination::Copper => &self.copper,
            Denomination::Silver => &self.silver,
            Denomination::Gold => &self.gold,
            Denomination::Platinum => &self.platinum,
        }
    }

    pub fn name_mut(&mut self, denomination: Denomination) -> &mut String {
        match denomination {
            Denomination::Copper => &mut self.copper,
            Denomination::Silver => &mut self.silver,
            Denomination::Gold => &mut self.gold,
            Denomination::Platinum => &mut self.platinum,
        }
    }
}

impl Default for CoinNames {
    fn default() -> Self {
        CoinNames {
            copper: "Copper".to_string(),
            silver: "Silver".to_string(),
            gold: "Gold".to_string(),
            platinum: "Platinum".to_string(),
        }
    }
}

// =============================================================================
// Built-in Tables
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn pack(
    id: &str,
    name: &str,
    capacity: u32,
    utility_slots: u32,
    weapon_modifier: i32,
    armor_modifier: i32,
    clothing_modifier: i32,
    utility_equip_rules: &[ItemCategory],
) -> PackType {
    PackType {
        id: id.to_string(),
        name: name.to_string(),
        capacity,
        utility_slots,
        weapon_modifier,
        armor_modifier,
        clothing_modifier,
        jewelry_modifier: 0,
        utility_equip_rules: utility_equip_rules.to_vec(),
        description: None,
    }
}

/// The ten built-in pack types. `npc-pack` is first and is the fallback.
pub fn default_pack_types() -> Vec<PackType> {
    use ItemCategory::{Camp, OneHandedWeapon, ToolKit};

    vec![
        pack("npc-pack", "NPC Pack", 100, 0, 0, 0, 0, &[]),
        pack("simple-pack", "Simple Pack", 25, 3, 0, 0, 0, &[]),
        pack("standard-pack", "Standard Pack", 55, 4, 0, 0, 0, &[]),
        pack("warrior-pack", "Warrior Pack", 30, 6, 0, 1, 0, &[OneHandedWeapon]),
        pack("explorer-pack", "Explorer Pack", 30, 6, 0, 0, 1, &[ToolKit]),
        pack("tinkerer-pack", "Tinkerer's Pack", 20, 10, 0, 0, 0, &[ToolKit]),
        pack("travel-pack", "Travel Pack", 35, 8, -2, 0, 0, &[Camp]),
        pack("shadow-pack", "Shadow Pack", 15, 10, 0, -2, 0, &[ToolKit, OneHandedWeapon]),
        pack("mule-pack", "Mule's Pack", 150, 1, -3, -3, 0, &[]),
        pack("utility-pack", "Utility Pack", 10, 14, 0, 0, 0, &[]),
    ]
}

fn storage(
    id: &str,
    name: &str,
    capacity: u32,
    weapon_slots: u32,
    armor_slots: u32,
    coin_capacity: CoinCapacity,
) -> ExternalStorageType {
    ExternalStorageType {
        id: id.to_string(),
        name: name.to_string(),
        capacity,
        weapon_slots,
        armor_slots,
        coin_capacity,
        description: None,
    }
}

/// The ten built-in storage types. `small-pet` is first and is the fallback.
pub fn default_external_storage_types() -> Vec<ExternalStorageType> {
    use CoinCapacity::{Limited, Unlimited};

    vec![
        storage("small-pet", "Small Pet", 20, 2, 2, Limited(20)),
        storage("large-pet", "Large Pet", 100, 2, 4, Limited(100)),
        storage("standard-mount", "Standard Mount", 150, 0, 2, Limited(200)),
        storage("large-mount", "Large Mount", 250, 0, 4, Limited(500)),
        storage("small-cart", "Small Cart", 300, 0, 0, Limited(1000)),
        storage("large-cart", "Large Cart", 500, 0, 0, Limited(2000)),
        storage("boat", "Boat", 500, 0, 0, Limited(2000)),
        storage("ship", "Ship", 2000, 0, 0, Unlimited),
        storage("house", "House", 1000, 0, 0, Unlimited),
        storage("warehouse", "Warehouse", 2000, 0, 0, Unlimited),
    ]
}

// =============================================================================
// Rule Customizations
// =============================================================================

/// The configurator's edits on top of the built-in tables.
///
/// ## Lifecycle
/// ```text
/// load (collaborator) ──► add / update / remove entries ──► save (collaborator)
///                                      │
///                                      └──► RuleTables::from_customizations()
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleCustomizations {
    pub custom_pack_types: Vec<PackType>,
    /// Stored as `customExternalStorageTypes` in configurator records.
    #[serde(rename = "customExternalStorageTypes", alias = "customStorageTypes")]
    pub custom_storage_types: Vec<ExternalStorageType>,
    pub coin_names: CoinNames,
    /// Free-text notes the configurator keeps for themselves.
    pub notes: String,
}

impl RuleCustomizations {
    /// Appends a pack type built from the "New Pack" template.
    ///
    /// Returns the new entry's id.
    pub fn add_pack_type(&mut self, ids: &mut impl IdGenerator) -> CoreResult<String> {
        let id = ids.next_id();
        if self.custom_pack_types.iter().any(|p| p.id == id) {
            return Err(CoreError::DuplicateId {
                id,
                container: "custom pack types".to_string(),
            });
        }

        self.custom_pack_types.push(PackType {
            id: id.clone(),
            name: "New Pack".to_string(),
            capacity: 50,
            utility_slots: 5,
            weapon_modifier: 0,
            armor_modifier: 0,
            clothing_modifier: 0,
            jewelry_modifier: 0,
            utility_equip_rules: Vec::new(),
            description: None,
        });
        debug!(pack_type_id = %id, "Added custom pack type");
        Ok(id)
    }

    /// Replaces the custom pack type with the same id.
    pub fn update_pack_type(&mut self, updated: PackType) -> CoreResult<()> {
        validate_pack_type(&updated)?;
        let slot = self
            .custom_pack_types
            .iter_mut()
            .find(|p| p.id == updated.id)
            .ok_or_else(|| CoreError::RuleEntryNotFound {
                kind: "pack type",
                id: updated.id.clone(),
            })?;
        *slot = updated;
        Ok(())
    }

    /// Deletes a custom pack type and returns it.
    ///
    /// Characters still pointing at it fall back to the first built-in.
    pub fn remove_pack_type(&mut self, id: &str) -> CoreResult<PackType> {
        let index = self
            .custom_pack_types
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::RuleEntryNotFound {
                kind: "pack type",
                id: id.to_string(),
            })?;
        debug!(pack_type_id = %id, "Removed custom pack type");
        Ok(self.custom_pack_types.remove(index))
    }

    /// Appends a storage type built from the "New Storage Type" template.
    pub fn add_storage_type(&mut self, ids: &mut impl IdGenerator) -> CoreResult<String> {
        let id = ids.next_id();
        if self.custom_storage_types.iter().any(|s| s.id == id) {
            return Err(CoreError::DuplicateId {
                id,
                container: "custom storage types".to_string(),
            });
        }

        self.custom_storage_types.push(ExternalStorageType {
            id: id.clone(),
            name: "New Storage Type".to_string(),
            capacity: 100,
            weapon_slots: 0,
            armor_slots: 0,
            coin_capacity: CoinCapacity::Limited(100),
            description: None,
        });
        debug!(storage_type_id = %id, "Added custom storage type");
        Ok(id)
    }

    pub fn update_storage_type(&mut self, updated: ExternalStorageType) -> CoreResult<()> {
        validate_storage_type(&updated)?;
        let slot = self
            .custom_storage_types
            .iter_mut()
            .find(|s| s.id == updated.id)
            .ok_or_else(|| CoreError::RuleEntryNotFound {
                kind: "storage type",
                id: updated.id.clone(),
            })?;
        *slot = updated;
        Ok(())
    }

    pub fn remove_storage_type(&mut self, id: &str) -> CoreResult<ExternalStorageType> {
        let index = self
            .custom_storage_types
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::RuleEntryNotFound {
                kind: "storage type",
                id: id.to_string(),
            })?;
        debug!(storage_type_id = %id, "Removed custom storage type");
        Ok(self.custom_storage_types.remove(index))
    }

    /// Checks every custom entry, and that no id is used twice in a merged
    /// table (a custom entry shadowed by a built-in would be unreachable).
    pub fn validate(&self) -> ValidationResult<()> {
        for pack in &self.custom_pack_types {
            validate_pack_type(pack)?;
        }
        for storage in &self.custom_storage_types {
            validate_storage_type(storage)?;
        }

        let packs = default_pack_types();
        validate_unique_ids(
            "pack type id",
            packs
                .iter()
                .chain(&self.custom_pack_types)
                .map(|p| p.id.as_str()),
        )?;

        let storages = default_external_storage_types();
        validate_unique_ids(
            "storage type id",
            storages
                .iter()
                .chain(&self.custom_storage_types)
                .map(|s| s.id.as_str()),
        )
    }
}

// =============================================================================
// Rule Tables
// =============================================================================

/// The active, read-only rule set for a session.
///
/// Built once per session and replaced wholesale when the configurator
/// saves. Fields are private so the "built-ins first" shape holds.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTables {
    pack_types: Vec<PackType>,
    storage_types: Vec<ExternalStorageType>,
    coin_names: CoinNames,
}

impl Default for RuleTables {
    fn default() -> Self {
        RuleTables {
            pack_types: default_pack_types(),
            storage_types: default_external_storage_types(),
            coin_names: CoinNames::default(),
        }
    }
}

impl RuleTables {
    /// Built-ins followed by the configurator's custom entries.
    pub fn from_customizations(custom: &RuleCustomizations) -> Self {
        let mut tables = RuleTables::default();
        tables
            .pack_types
            .extend(custom.custom_pack_types.iter().cloned());
        tables
            .storage_types
            .extend(custom.custom_storage_types.iter().cloned());
        tables.coin_names = custom.coin_names.clone();
        tables
    }

    pub fn pack_types(&self) -> &[PackType] {
        &self.pack_types
    }

    pub fn storage_types(&self) -> &[ExternalStorageType] {
        &self.storage_types
    }

    pub fn coin_names(&self) -> &CoinNames {
        &self.coin_names
    }

    /// Exact lookup with no fallback.
    pub fn find_pack_type(&self, id: &str) -> Option<&PackType> {
        self.pack_types.iter().find(|p| p.id == id)
    }

    /// Exact lookup with no fallback, for "Unknown" displays.
    pub fn find_storage_type(&self, id: &str) -> Option<&ExternalStorageType> {
        self.storage_types.iter().find(|s| s.id == id)
    }

    /// Pack type for `id`, or the first built-in when `id` is unknown.
    pub fn pack_type(&self, id: &str) -> &PackType {
        match self.find_pack_type(id) {
            Some(pack) => pack,
            None => {
                let fallback = &self.pack_types[0];
                warn!(pack_type_id = %id, fallback = %fallback.id, "Unknown pack type, using fallback");
                fallback
            }
        }
    }

    /// Storage type for `id`, or the first built-in when `id` is unknown.
    pub fn storage_type(&self, id: &str) -> &ExternalStorageType {
        match self.find_storage_type(id) {
            Some(storage) => storage,
            None => {
                let fallback = &self.storage_types[0];
                warn!(storage_type_id = %id, fallback = %fallback.id, "Unknown storage type, using fallback");
                fallback
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn counter() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("custom-{}", n)
        }
    }

    #[test]
    fn test_default_tables_shape() {
        let packs = default_pack_types();
        assert_eq!(packs.len(), 10);
        assert_eq!(packs[0].id, "npc-pack");
        assert_eq!(packs[9].id, crate::UTILITY_PACK_ID);

        let mule = packs.iter().find(|p| p.id == "mule-pack").unwrap();
        assert_eq!(mule.name, "Mule's Pack");
        assert_eq!((mule.weapon_modifier, mule.armor_modifier), (-3, -3));

        let storages = default_external_storage_types();
        assert_eq!(storages.len(), 10);
        assert_eq!(storages[0].id, "small-pet");
        let ship = storages.iter().find(|s| s.id == "ship").unwrap();
        assert_eq!(ship.coin_capacity, CoinCapacity::Unlimited);
    }

    #[test]
    fn test_pack_type_lookup_falls_back_to_first_builtin() {
        let tables = RuleTables::default();
        assert_eq!(tables.pack_type("explorer-pack").id, "explorer-pack");
        assert_eq!(tables.pack_type("deleted-custom").id, "npc-pack");
        assert!(tables.find_pack_type("deleted-custom").is_none());
    }

    #[test]
    fn test_storage_type_lookup_falls_back_to_first_builtin() {
        let tables = RuleTables::default();
        assert_eq!(tables.storage_type("boat").capacity, 500);
        assert_eq!(tables.storage_type("airship").id, "small-pet");
        assert!(tables.find_storage_type("airship").is_none());
    }

    #[test]
    fn test_customs_are_appended_after_builtins() {
        let mut custom = RuleCustomizations::default();
        let mut ids = counter();
        let pack_id = custom.add_pack_type(&mut ids).unwrap();
        let storage_id = custom.add_storage_type(&mut ids).unwrap();
        custom.coin_names.gold = "Crowns".to_string();

        let tables = RuleTables::from_customizations(&custom);
        assert_eq!(tables.pack_types().len(), 11);
        assert_eq!(tables.pack_types()[10].id, pack_id);
        assert_eq!(tables.pack_type(&pack_id).name, "New Pack");
        assert_eq!(tables.pack_type(&pack_id).capacity, 50);
        assert_eq!(tables.pack_type(&pack_id).utility_slots, 5);

        let st = tables.storage_type(&storage_id);
        assert_eq!(st.name, "New Storage Type");
        assert_eq!(st.coin_capacity, CoinCapacity::Limited(100));

        assert_eq!(tables.coin_names().name(Denomination::Gold), "Crowns");
    }

    #[test]
    fn test_update_and_remove_custom_pack() {
        let mut custom = RuleCustomizations::default();
        let id = custom.add_pack_type(&mut counter()).unwrap();

        let mut edited = custom.custom_pack_types[0].clone();
        edited.name = "Bag of Holding".to_string();
        edited.capacity = 500;
        custom.update_pack_type(edited).unwrap();
        assert_eq!(custom.custom_pack_types[0].capacity, 500);

        let removed = custom.remove_pack_type(&id).unwrap();
        assert_eq!(removed.name, "Bag of Holding");
        assert!(custom.custom_pack_types.is_empty());

        let err = custom.remove_pack_type(&id).unwrap_err();
        assert!(matches!(err, CoreError::RuleEntryNotFound { kind: "pack type", .. }));
    }

    #[test]
    fn test_update_rejects_blank_name_and_keeps_entry() {
        let mut custom = RuleCustomizations::default();
        custom.add_storage_type(&mut counter()).unwrap();
        let before = custom.clone();

        let mut edited = custom.custom_storage_types[0].clone();
        edited.name = "  ".to_string();
        assert!(custom.update_storage_type(edited).is_err());
        assert_eq!(custom, before);
    }

    #[test]
    fn test_add_rejects_colliding_generator() {
        let mut custom = RuleCustomizations::default();
        let mut same = || "dup".to_string();
        custom.add_pack_type(&mut same).unwrap();
        let err = custom.add_pack_type(&mut same).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId { .. }));
        assert_eq!(custom.custom_pack_types.len(), 1);
    }

    #[test]
    fn test_validate_rejects_shadowed_builtin_id() {
        let mut custom = RuleCustomizations::default();
        custom.add_pack_type(&mut || "standard-pack".to_string()).unwrap();
        assert_eq!(
            custom.validate(),
            Err(ValidationError::Duplicate {
                field: "pack type id".to_string(),
                value: "standard-pack".to_string()
            })
        );
    }

    #[test]
    fn test_customizations_read_stored_shape() {
        let json = r#"{
            "customPackTypes": [{
                "id": "p1", "name": "Quiver Pack", "capacity": 12, "utilitySlots": 2,
                "weaponModifier": 1, "armorModifier": 0, "clothingModifier": 0,
                "jewelryModifier": 0, "utilityEquipRules": ["ammunition", "light-ammunition"]
            }],
            "customExternalStorageTypes": [{
                "id": "s1", "name": "Vault Cart", "capacity": 10, "weaponSlots": 0,
                "armorSlots": 0, "coinCapacity": -1
            }],
            "coinNames": {"copper": "Bits", "silver": "Shards", "gold": "Crowns", "platinum": "Suns"},
            "notes": "Session 12 loot"
        }"#;
        let custom: RuleCustomizations = serde_json::from_str(json).unwrap();
        assert!(custom.validate().is_ok());
        assert_eq!(
            custom.custom_pack_types[0].utility_equip_rules,
            vec![ItemCategory::Ammunition, ItemCategory::LightAmmunition]
        );
        assert_eq!(custom.custom_storage_types[0].coin_capacity, CoinCapacity::Unlimited);
        assert_eq!(custom.coin_names.copper, "Bits");
    }

    #[test]
    fn test_customizations_storage_types_key() {
        let mut custom = RuleCustomizations::default();
        custom.add_storage_type(&mut || "bag".to_string()).unwrap();

        let json = serde_json::to_value(&custom).unwrap();
        assert_eq!(json["customExternalStorageTypes"][0]["id"], "bag");
        assert!(json.get("customStorageTypes").is_none());

        // Older records written with the short key still load
        let short = r#"{"customStorageTypes": [{
            "id": "s2", "name": "Wagon", "capacity": 40, "weaponSlots": 0,
            "armorSlots": 0, "coinCapacity": 50
        }]}"#;
        let loaded: RuleCustomizations = serde_json::from_str(short).unwrap();
        assert_eq!(loaded.custom_storage_types.len(), 1);
        assert_eq!(loaded.custom_storage_types[0].coin_capacity, CoinCapacity::Limited(50));
    }
}
