//! # Domain Types
//!
//! Core domain types used throughout Haversack.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Inventory (root, one per character)                                   │
//! │  ├── items: Vec<Item>                                                  │
//! │  ├── equipped: EquippedItems   (5 slot sequences of Option<item id>)   │
//! │  ├── currency: Currency                                                │
//! │  ├── pack_type_id ──────────────► PackType (rule table)                │
//! │  ├── vaults: Vec<Vault>         (currency only)                        │
//! │  └── external_storages: Vec<ExternalStorage>                           │
//! │        ├── storage_type_id ─────► ExternalStorageType (rule table)     │
//! │        └── inventory: Inventory (nested, same shape)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Shape
//! Field names serialize in camelCase and categories as kebab-case ids
//! (`"one-handed-weapon"`, `"tool/kit"`), so a stored character record reads
//! the same whichever front end wrote it.
//!
//! ## Nested Inventories
//! An external storage owns a full [`Inventory`]. Its `equipped`,
//! `pack_type_id`, `vaults` and `external_storages` fields are inert
//! placeholders: no rule reads them, but they round-trip untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::currency::{CopperPieces, Currency};
use crate::error::CoreError;
use crate::DEFAULT_PACK_TYPE_ID;

// =============================================================================
// Item Category
// =============================================================================

/// The closed set of item categories.
///
/// Each category carries a default per-unit weight used whenever an item
/// has no positive weight override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ItemCategory {
    #[default]
    Other,
    Large,
    Massive,
    #[serde(rename = "tool/kit")]
    ToolKit,
    LightArmor,
    MediumArmor,
    HeavyArmor,
    Consumable,
    Instrument,
    OneHandedWeapon,
    TwoHandedWeapon,
    Clothing,
    LightAmmunition,
    Ammunition,
    Jewelry,
    Shield,
    MagicItem,
    Literature,
    Camp,
}

impl ItemCategory {
    /// Every category, in catalog order.
    pub const ALL: [ItemCategory; 19] = [
        ItemCategory::Other,
        ItemCategory::Large,
        ItemCategory::Massive,
        ItemCategory::ToolKit,
        ItemCategory::LightArmor,
        ItemCategory::MediumArmor,
        ItemCategory::HeavyArmor,
        ItemCategory::Consumable,
        ItemCategory::Instrument,
        ItemCategory::OneHandedWeapon,
        ItemCategory::TwoHandedWeapon,
        ItemCategory::Clothing,
        ItemCategory::LightAmmunition,
        ItemCategory::Ammunition,
        ItemCategory::Jewelry,
        ItemCategory::Shield,
        ItemCategory::MagicItem,
        ItemCategory::Literature,
        ItemCategory::Camp,
    ];

    /// Default weight of one unit of this category.
    ///
    /// Ammunition is fractional: 20 light arrows or 10 bolts make one unit.
    pub const fn default_unit_weight(&self) -> f64 {
        match self {
            ItemCategory::Other => 1.0,
            ItemCategory::Large => 10.0,
            ItemCategory::Massive => 50.0,
            ItemCategory::ToolKit => 2.0,
            ItemCategory::LightArmor => 5.0,
            ItemCategory::MediumArmor => 8.0,
            ItemCategory::HeavyArmor => 12.0,
            ItemCategory::Consumable => 1.0,
            ItemCategory::Instrument => 2.0,
            ItemCategory::OneHandedWeapon => 2.0,
            ItemCategory::TwoHandedWeapon => 4.0,
            ItemCategory::Clothing => 3.0,
            ItemCategory::LightAmmunition => 0.05,
            ItemCategory::Ammunition => 0.1,
            ItemCategory::Jewelry => 1.0,
            ItemCategory::Shield => 3.0,
            ItemCategory::MagicItem => 2.0,
            ItemCategory::Literature => 1.0,
            ItemCategory::Camp => 3.0,
        }
    }

    /// Stable id of the category, identical to its serialized form.
    ///
    /// Search matches against this label.
    pub const fn label(&self) -> &'static str {
        match self {
            ItemCategory::Other => "other",
            ItemCategory::Large => "large",
            ItemCategory::Massive => "massive",
            ItemCategory::ToolKit => "tool/kit",
            ItemCategory::LightArmor => "light-armor",
            ItemCategory::MediumArmor => "medium-armor",
            ItemCategory::HeavyArmor => "heavy-armor",
            ItemCategory::Consumable => "consumable",
            ItemCategory::Instrument => "instrument",
            ItemCategory::OneHandedWeapon => "one-handed-weapon",
            ItemCategory::TwoHandedWeapon => "two-handed-weapon",
            ItemCategory::Clothing => "clothing",
            ItemCategory::LightAmmunition => "light-ammunition",
            ItemCategory::Ammunition => "ammunition",
            ItemCategory::Jewelry => "jewelry",
            ItemCategory::Shield => "shield",
            ItemCategory::MagicItem => "magic-item",
            ItemCategory::Literature => "literature",
            ItemCategory::Camp => "camp",
        }
    }

    /// Whether "use" consumes one unit of the stack.
    pub const fn is_stack_consumable(&self) -> bool {
        matches!(
            self,
            ItemCategory::Consumable | ItemCategory::Ammunition | ItemCategory::LightAmmunition
        )
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemCategory::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown item category: '{}'", s))
    }
}

// =============================================================================
// Item
// =============================================================================

/// A stack of identical items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique within the owning item sequence. Never changes.
    pub id: String,

    pub name: String,

    pub category: ItemCategory,

    /// Stack size, at least 1.
    pub quantity: u32,

    /// Per-unit weight override. `<= 0` means "use the category default".
    #[serde(default)]
    pub weight: f64,

    #[serde(default)]
    pub requires_attunement: bool,

    /// Always false unless `requires_attunement` is true.
    #[serde(default)]
    pub is_attuned: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Per-unit value in copper pieces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,

    /// Remaining uses; camp gear only (0..=15).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<u8>,
}

impl Item {
    /// Value of the whole stack, if the item has a value at all.
    pub fn stack_value(&self) -> Option<CopperPieces> {
        self.value.map(|v| CopperPieces::from_cp(v) * self.quantity)
    }
}

/// Everything needed to create an item except its id.
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDraft {
    pub name: String,
    pub category: ItemCategory,
    pub quantity: u32,
    pub weight: f64,
    pub requires_attunement: bool,
    pub is_attuned: bool,
    pub description: Option<String>,
    pub value: Option<u64>,
    pub uses: Option<u8>,
}

impl ItemDraft {
    /// A single item of `category` with no overrides.
    pub fn new(name: impl Into<String>, category: ItemCategory) -> Self {
        ItemDraft {
            name: name.into(),
            category,
            ..ItemDraft::default()
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn attunement(mut self, requires: bool, attuned: bool) -> Self {
        self.requires_attunement = requires;
        self.is_attuned = attuned;
        self
    }

    pub fn value(mut self, cp: u64) -> Self {
        self.value = Some(cp);
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

impl Default for ItemDraft {
    fn default() -> Self {
        ItemDraft {
            name: String::new(),
            category: ItemCategory::Other,
            quantity: 1,
            weight: 0.0,
            requires_attunement: false,
            is_attuned: false,
            description: None,
            value: None,
            uses: None,
        }
    }
}

/// Partial update of an item. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<ItemCategory>,
    pub quantity: Option<u32>,
    pub weight: Option<f64>,
    pub requires_attunement: Option<bool>,
    pub is_attuned: Option<bool>,
    pub description: Option<String>,
    pub value: Option<u64>,
    pub uses: Option<u8>,
}

// =============================================================================
// Equipment
// =============================================================================

/// The five kinds of equipment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlotType {
    Weapon,
    Armor,
    Clothing,
    Jewelry,
    Utility,
}

impl EquipmentSlotType {
    pub const ALL: [EquipmentSlotType; 5] = [
        EquipmentSlotType::Weapon,
        EquipmentSlotType::Armor,
        EquipmentSlotType::Clothing,
        EquipmentSlotType::Jewelry,
        EquipmentSlotType::Utility,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            EquipmentSlotType::Weapon => "weapon",
            EquipmentSlotType::Armor => "armor",
            EquipmentSlotType::Clothing => "clothing",
            EquipmentSlotType::Jewelry => "jewelry",
            EquipmentSlotType::Utility => "utility",
        }
    }
}

impl fmt::Display for EquipmentSlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for EquipmentSlotType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentSlotType::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::InvalidSlotType(s.to_string()))
    }
}

/// Derived slot counts for one pack. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct EquipmentSlots {
    pub weapon: u32,
    pub armor: u32,
    pub clothing: u32,
    pub jewelry: u32,
    pub utility: u32,
}

impl EquipmentSlots {
    /// Slot count for one slot type.
    pub const fn count(&self, slot: EquipmentSlotType) -> u32 {
        match slot {
            EquipmentSlotType::Weapon => self.weapon,
            EquipmentSlotType::Armor => self.armor,
            EquipmentSlotType::Clothing => self.clothing,
            EquipmentSlotType::Jewelry => self.jewelry,
            EquipmentSlotType::Utility => self.utility,
        }
    }
}

/// Stored slot assignments, one sequence per slot type.
///
/// A sequence may be shorter than the derived slot count; missing trailing
/// entries read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct EquippedItems {
    pub weapon: Vec<Option<String>>,
    pub armor: Vec<Option<String>>,
    pub clothing: Vec<Option<String>>,
    pub jewelry: Vec<Option<String>>,
    pub utility: Vec<Option<String>>,
}

impl EquippedItems {
    pub fn slots(&self, slot: EquipmentSlotType) -> &[Option<String>] {
        match slot {
            EquipmentSlotType::Weapon => &self.weapon,
            EquipmentSlotType::Armor => &self.armor,
            EquipmentSlotType::Clothing => &self.clothing,
            EquipmentSlotType::Jewelry => &self.jewelry,
            EquipmentSlotType::Utility => &self.utility,
        }
    }

    pub fn slots_mut(&mut self, slot: EquipmentSlotType) -> &mut Vec<Option<String>> {
        match slot {
            EquipmentSlotType::Weapon => &mut self.weapon,
            EquipmentSlotType::Armor => &mut self.armor,
            EquipmentSlotType::Clothing => &mut self.clothing,
            EquipmentSlotType::Jewelry => &mut self.jewelry,
            EquipmentSlotType::Utility => &mut self.utility,
        }
    }

    /// Item id held at `index`, treating missing entries as empty.
    pub fn get(&self, slot: EquipmentSlotType, index: usize) -> Option<&str> {
        self.slots(slot).get(index).and_then(|s| s.as_deref())
    }

    /// Empties every slot holding `item_id`. Positions are preserved.
    ///
    /// Returns how many slots were cleared.
    pub fn clear_item(&mut self, item_id: &str) -> usize {
        let mut cleared = 0;
        for slot in EquipmentSlotType::ALL {
            for entry in self.slots_mut(slot).iter_mut() {
                if entry.as_deref() == Some(item_id) {
                    *entry = None;
                    cleared += 1;
                }
            }
        }
        cleared
    }
}

// =============================================================================
// Pack Type
// =============================================================================

/// A pack archetype from the rule tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PackType {
    pub id: String,
    pub name: String,

    /// Carrying capacity in weight units.
    pub capacity: u32,

    pub utility_slots: u32,

    #[serde(default)]
    pub weapon_modifier: i32,
    #[serde(default)]
    pub armor_modifier: i32,
    #[serde(default)]
    pub clothing_modifier: i32,
    #[serde(default)]
    pub jewelry_modifier: i32,

    /// Categories allowed in utility slots (ignored by `utility-pack`).
    #[serde(default)]
    pub utility_equip_rules: Vec<ItemCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// External Storage Type
// =============================================================================

/// Coin limit of an external storage type.
///
/// Stored as a signed integer where `-1` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CoinCapacity {
    Unlimited,
    Limited(u64),
}

impl CoinCapacity {
    /// Advisory check: does a purse of `coins` fit?
    pub const fn allows(&self, coins: u64) -> bool {
        match self {
            CoinCapacity::Unlimited => true,
            CoinCapacity::Limited(max) => coins <= *max,
        }
    }
}

impl TryFrom<i64> for CoinCapacity {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            -1 => Ok(CoinCapacity::Unlimited),
            n if n >= 0 => Ok(CoinCapacity::Limited(n as u64)),
            n => Err(format!("coin capacity must be -1 or >= 0, got {}", n)),
        }
    }
}

impl From<CoinCapacity> for i64 {
    fn from(cap: CoinCapacity) -> Self {
        match cap {
            CoinCapacity::Unlimited => -1,
            CoinCapacity::Limited(n) => i64::try_from(n).unwrap_or(i64::MAX),
        }
    }
}

/// A storage archetype (pet, mount, cart, building) from the rule tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExternalStorageType {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub weapon_slots: u32,
    pub armor_slots: u32,
    #[ts(type = "number")]
    pub coin_capacity: CoinCapacity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Vault
// =============================================================================

/// A currency-only remote store (bank, stash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Counts toward combined wealth while true.
    #[serde(default)]
    pub nearby: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultDraft {
    pub name: String,
    pub location: String,
    pub currency: Currency,
    pub notes: Option<String>,
    pub nearby: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub currency: Option<Currency>,
    pub notes: Option<String>,
    pub nearby: Option<bool>,
}

// =============================================================================
// External Storage
// =============================================================================

/// A secondary container with its own nested inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExternalStorage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub storage_type_id: String,
    /// Transfers in or out are only allowed while true.
    #[serde(default)]
    pub nearby: bool,
    #[serde(default)]
    pub inventory: Inventory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalStorageDraft {
    pub name: String,
    pub description: String,
    pub storage_type_id: String,
    pub nearby: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalStoragePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub storage_type_id: Option<String>,
    pub nearby: Option<bool>,
}

// =============================================================================
// Inventory
// =============================================================================

/// The root aggregate for one character (or the nested contents of a
/// storage). Behaviour lives in [`crate::container`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub equipped: EquippedItems,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default = "default_pack_type_id")]
    pub pack_type_id: String,
    #[serde(default)]
    pub vaults: Vec<Vault>,
    #[serde(default)]
    pub external_storages: Vec<ExternalStorage>,
}

fn default_pack_type_id() -> String {
    DEFAULT_PACK_TYPE_ID.to_string()
}

/// A fresh character: nothing carried, standard pack.
impl Default for Inventory {
    fn default() -> Self {
        Inventory {
            items: Vec::new(),
            equipped: EquippedItems::default(),
            currency: Currency::empty(),
            pack_type_id: default_pack_type_id(),
            vaults: Vec::new(),
            external_storages: Vec::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
