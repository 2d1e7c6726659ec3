//! # Calculation Library
//!
//! Pure functions for weight, coins, equipment slots and equip eligibility,
//! plus the advisory checks layered on top of them.
//!
//! ## Weight Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  item weight = unit weight × quantity                                   │
//! │                                                                         │
//! │  unit weight = item.weight            if item.weight > 0                │
//! │              = category default       otherwise                         │
//! │                                                                         │
//! │  Example: Greatsword (two-handed-weapon, weight 0, qty 3)              │
//! │           unit = 4 (default)  →  4 × 3 = 12 units                      │
//! │                                                                         │
//! │  Coins weigh separately: see Currency::coin_weight()                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Advisories
//! Attunement cap, coin carry cap, pack capacity and storage coin capacity
//! are never enforced. Each has a check returning a [`Severity`] for the
//! presentation layer to color.

use serde::Serialize;
use ts_rs::TS;

use crate::currency::{CopperPieces, Currency};
use crate::types::{
    CoinCapacity, EquipmentSlotType, EquipmentSlots, Item, ItemCategory, PackType,
};
use crate::{
    BASE_EQUIPMENT_SLOTS, COIN_CARRY_CAP, COIN_WEIGHT_THRESHOLD, MAX_ATTUNED_ITEMS,
    UTILITY_PACK_ID, UTILITY_PACK_MAX_UNIT_WEIGHT,
};

// =============================================================================
// Weight
// =============================================================================

/// Weight of one unit of `item`: its override if positive, else the
/// category default.
pub fn effective_unit_weight(item: &Item) -> f64 {
    if item.weight > 0.0 {
        item.weight
    } else {
        item.category.default_unit_weight()
    }
}

/// Weight of the whole stack.
pub fn item_weight(item: &Item) -> f64 {
    effective_unit_weight(item) * f64::from(item.quantity)
}

/// Sum of [`item_weight`] over `items`. Coins are not included.
pub fn total_weight(items: &[Item]) -> f64 {
    items.iter().map(item_weight).sum()
}

// =============================================================================
// Coins
// =============================================================================

pub fn total_coins(currency: &Currency) -> u64 {
    currency.total_coins()
}

pub fn coin_weight(currency: &Currency) -> u64 {
    currency.coin_weight()
}

pub fn currency_value(currency: &Currency) -> CopperPieces {
    currency.value()
}

// =============================================================================
// Equipment Slots
// =============================================================================

/// Derives slot counts from a pack type.
///
/// Weapon, armor, clothing and jewelry start at 4 and take the pack's
/// modifier, never dropping below 0. Utility slots come straight from the
/// pack.
pub fn equipment_slots(pack: &PackType) -> EquipmentSlots {
    let with_modifier = |modifier: i32| -> u32 {
        let slots = i64::from(BASE_EQUIPMENT_SLOTS) + i64::from(modifier);
        u32::try_from(slots.max(0)).unwrap_or(u32::MAX)
    };

    EquipmentSlots {
        weapon: with_modifier(pack.weapon_modifier),
        armor: with_modifier(pack.armor_modifier),
        clothing: with_modifier(pack.clothing_modifier),
        jewelry: with_modifier(pack.jewelry_modifier),
        utility: pack.utility_slots,
    }
}

/// Whether `item` may go into a slot of type `slot`.
///
/// ```text
/// weapon   ← one-handed-weapon, two-handed-weapon, shield, instrument
/// armor    ← light-armor, medium-armor, heavy-armor
/// clothing ← clothing
/// jewelry  ← jewelry
/// utility  ← always true here; use can_equip_to_utility_slot()
/// ```
pub fn can_equip_item(item: &Item, slot: EquipmentSlotType) -> bool {
    use ItemCategory::*;

    match slot {
        EquipmentSlotType::Weapon => matches!(
            item.category,
            OneHandedWeapon | TwoHandedWeapon | Shield | Instrument
        ),
        EquipmentSlotType::Armor => matches!(item.category, LightArmor | MediumArmor | HeavyArmor),
        EquipmentSlotType::Clothing => item.category == Clothing,
        EquipmentSlotType::Jewelry => item.category == Jewelry,
        EquipmentSlotType::Utility => true,
    }
}

/// Whether `item` may go into one of `pack`'s utility slots.
///
/// The utility pack takes anything lighter than 2 units per unit (quantity
/// is ignored). Every other pack takes the categories in its
/// `utility_equip_rules`.
pub fn can_equip_to_utility_slot(item: &Item, pack: &PackType) -> bool {
    if pack.id == UTILITY_PACK_ID {
        return effective_unit_weight(item) < UTILITY_PACK_MAX_UNIT_WEIGHT;
    }
    pack.utility_equip_rules.contains(&item.category)
}

/// Attuned items in `items`. Never clamped.
pub fn count_attuned_items(items: &[Item]) -> usize {
    items.iter().filter(|item| item.is_attuned).count()
}

// =============================================================================
// Advisories
// =============================================================================

/// How loudly to flag a soft limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

/// Coins carried: over 40 is an error, over 30 already weighs something.
pub fn coin_carry_severity(currency: &Currency) -> Severity {
    let coins = currency.total_coins();
    if coins > COIN_CARRY_CAP {
        Severity::Error
    } else if coins > COIN_WEIGHT_THRESHOLD {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

pub fn attunement_severity(attuned: usize) -> Severity {
    if attuned > MAX_ATTUNED_ITEMS {
        Severity::Error
    } else {
        Severity::Ok
    }
}

/// Item weight against pack capacity.
pub fn pack_load_severity(items: &[Item], pack: &PackType) -> Severity {
    if total_weight(items) > f64::from(pack.capacity) {
        Severity::Error
    } else {
        Severity::Ok
    }
}

/// Purse against a storage type's coin limit. Unlimited never warns.
pub fn storage_coin_severity(currency: &Currency, capacity: CoinCapacity) -> Severity {
    if capacity.allows(currency.total_coins()) {
        Severity::Ok
    } else {
        Severity::Warning
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
