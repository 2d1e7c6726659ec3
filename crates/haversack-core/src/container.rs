//! # Container Model
//!
//! Operations on the [`Inventory`] aggregate: pack selection, equipment,
//! the item lifecycle, coins, vaults and external storages.
//!
//! ## Mutation Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every &mut self method validates first, then mutates.                  │
//! │                                                                         │
//! │    Ok(..)   → inventory updated, caller persists the whole value        │
//! │    Err(..)  → inventory untouched                                       │
//! │                                                                         │
//! │  Callers that need "old value, new value" clone before calling.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same methods work on a storage's nested inventory, reached through
//! [`Inventory::storage_mut`].

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::calc::{can_equip_item, can_equip_to_utility_slot, equipment_slots};
use crate::currency::{CopperPieces, Denomination};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::id::IdGenerator;
use crate::rules::RuleTables;
use crate::search::item_matches;
use crate::types::{
    EquipmentSlotType, EquipmentSlots, ExternalStorage, ExternalStorageDraft,
    ExternalStoragePatch, Inventory, Item, ItemCategory, ItemDraft, ItemPatch, PackType, Vault,
    VaultDraft, VaultPatch,
};
use crate::validation::{
    validate_name, validate_quantity, validate_rule_id, validate_sell_quantity, validate_uses,
    validate_weight, ValidationResult,
};
use crate::{CAMP_ITEM_MAX_USES, MAX_SLOTS_PER_TYPE};

// =============================================================================
// Outcome Types
// =============================================================================

/// What happened to an item after one use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UseOutcome {
    /// A stack lost one unit.
    QuantityLeft { quantity: u32 },
    /// Camp gear lost one use.
    UsesLeft { uses: u8 },
    /// The last unit or use was spent; the item is gone.
    Depleted,
}

/// Coin value within reach, split by where it sits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WealthBreakdown {
    pub pack: CopperPieces,
    pub vaults: CopperPieces,
    pub storages: CopperPieces,
    pub total: CopperPieces,
}

// =============================================================================
// Item Normalization
// =============================================================================

/// Brings an item in line with its category and attunement flag, then
/// validates it.
fn normalize_and_validate(item: &mut Item) -> ValidationResult<()> {
    if !item.requires_attunement {
        item.is_attuned = false;
    }
    if item.category == ItemCategory::Camp && item.uses.is_none() {
        item.uses = Some(CAMP_ITEM_MAX_USES);
    }
    item.description = item.description.take().filter(|d| !d.trim().is_empty());

    validate_name("name", &item.name)?;
    validate_quantity(item.quantity)?;
    validate_weight(item.weight)?;
    validate_uses(item.category, item.uses)?;

    item.name = item.name.trim().to_string();
    Ok(())
}

// =============================================================================
// Pack & Equipment
// =============================================================================

impl Inventory {
    /// Pack type in use, falling back to the first built-in if the id is
    /// unknown.
    pub fn current_pack_type<'r>(&self, rules: &'r RuleTables) -> &'r PackType {
        rules.pack_type(&self.pack_type_id)
    }

    /// Switches pack. Unknown ids are accepted and resolve to the fallback.
    pub fn set_pack_type(&mut self, pack_type_id: impl Into<String>) {
        self.pack_type_id = pack_type_id.into();
        debug!(pack_type_id = %self.pack_type_id, "Pack type changed");
    }

    pub fn equipment_slots(&self, rules: &RuleTables) -> EquipmentSlots {
        equipment_slots(self.current_pack_type(rules))
    }

    /// Puts `item_id` into slot `index` of `slot`, or empties it with `None`.
    ///
    /// The stored sequence grows with empty entries to the derived slot
    /// count (or to `index + 1` if that is larger). Indexes at or past
    /// [`MAX_SLOTS_PER_TYPE`] are rejected unless the pack or the stored
    /// sequence already reaches that far. Eligibility is not checked here;
    /// see [`Inventory::equippable_items`].
    pub fn equip(
        &mut self,
        rules: &RuleTables,
        slot: EquipmentSlotType,
        index: usize,
        item_id: Option<&str>,
    ) -> CoreResult<()> {
        if let Some(id) = item_id {
            if self.item(id).is_none() {
                return Err(CoreError::ItemNotFound(id.to_string()));
            }
        }

        let derived = self.equipment_slots(rules).count(slot) as usize;
        let limit = derived
            .max(self.equipped.slots(slot).len())
            .max(MAX_SLOTS_PER_TYPE);
        if index >= limit {
            return Err(ValidationError::OutOfRange {
                field: format!("{} slot index", slot),
                min: 0,
                max: i64::try_from(limit - 1).unwrap_or(i64::MAX),
            }
            .into());
        }

        let sequence = self.equipped.slots_mut(slot);
        let needed = derived.max(index + 1);
        if sequence.len() < needed {
            sequence.resize(needed, None);
        }
        sequence[index] = item_id.map(str::to_string);

        debug!(slot = %slot, index, item_id = ?item_id, "Equipment slot set");
        Ok(())
    }

    /// Item shown in a slot. Dangling ids read as empty.
    pub fn equipped_item(&self, slot: EquipmentSlotType, index: usize) -> Option<&Item> {
        self.equipped
            .get(slot, index)
            .and_then(|id| self.item(id))
    }

    /// Items a slot picker should offer for `slot`.
    pub fn equippable_items(&self, rules: &RuleTables, slot: EquipmentSlotType) -> Vec<&Item> {
        let pack = self.current_pack_type(rules);
        self.items
            .iter()
            .filter(|item| match slot {
                EquipmentSlotType::Utility => can_equip_to_utility_slot(item, pack),
                _ => can_equip_item(item, slot),
            })
            .collect()
    }
}

// =============================================================================
// Item Lifecycle
// =============================================================================

impl Inventory {
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn item_index(&self, id: &str) -> CoreResult<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))
    }

    /// Creates an item from `draft` and appends it. Returns the new id.
    ///
    /// ## Normalization
    /// - `is_attuned` is forced false unless attunement is required
    /// - camp gear without uses starts with 15
    /// - a blank description is dropped
    /// - the name is trimmed
    pub fn add_item(&mut self, draft: ItemDraft, ids: &mut impl IdGenerator) -> CoreResult<String> {
        let mut item = Item {
            id: String::new(),
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            weight: draft.weight,
            requires_attunement: draft.requires_attunement,
            is_attuned: draft.is_attuned,
            description: draft.description,
            value: draft.value,
            uses: draft.uses,
        };
        normalize_and_validate(&mut item)?;

        let id = ids.next_id();
        if self.item(&id).is_some() {
            return Err(CoreError::DuplicateId {
                id,
                container: "items".to_string(),
            });
        }
        item.id = id.clone();

        debug!(item_id = %id, name = %item.name, category = %item.category, "Item added");
        self.items.push(item);
        Ok(id)
    }

    /// Applies `patch` to an item. The result is validated as a whole.
    ///
    /// Moving an item out of `camp` drops its uses unless the patch sets
    /// them (which then fails validation).
    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> CoreResult<()> {
        let index = self.item_index(id)?;
        let mut updated = self.items[index].clone();

        if let Some(name) = patch.name {
            updated.name = name;
        }
        if let Some(category) = patch.category {
            updated.category = category;
            if patch.uses.is_none() && category != ItemCategory::Camp {
                updated.uses = None;
            }
        }
        if let Some(quantity) = patch.quantity {
            updated.quantity = quantity;
        }
        if let Some(weight) = patch.weight {
            updated.weight = weight;
        }
        if let Some(requires) = patch.requires_attunement {
            updated.requires_attunement = requires;
        }
        if let Some(attuned) = patch.is_attuned {
            updated.is_attuned = attuned;
        }
        if let Some(description) = patch.description {
            updated.description = Some(description);
        }
        if let Some(value) = patch.value {
            updated.value = Some(value);
        }
        if let Some(uses) = patch.uses {
            updated.uses = Some(uses);
        }

        normalize_and_validate(&mut updated)?;
        self.items[index] = updated;
        debug!(item_id = %id, "Item updated");
        Ok(())
    }

    /// Deletes an item and empties every slot that held it.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<Item> {
        let index = self.item_index(id)?;
        let removed = self.items.remove(index);
        let cleared = self.equipped.clear_item(id);
        debug!(item_id = %id, cleared_slots = cleared, "Item removed");
        Ok(removed)
    }

    /// Spends one unit (consumables, ammunition) or one use (camp gear).
    ///
    /// ```text
    /// consumable / ammunition / light-ammunition:
    ///     quantity > 1 → quantity - 1
    ///     quantity = 1 → removed
    /// camp:
    ///     uses (missing = 15) > 1 → uses - 1
    ///     otherwise               → removed
    /// anything else → NotUsable
    /// ```
    pub fn use_item(&mut self, id: &str) -> CoreResult<UseOutcome> {
        let index = self.item_index(id)?;
        let item = &mut self.items[index];

        let outcome = if item.category.is_stack_consumable() {
            if item.quantity > 1 {
                item.quantity -= 1;
                UseOutcome::QuantityLeft {
                    quantity: item.quantity,
                }
            } else {
                UseOutcome::Depleted
            }
        } else if item.category == ItemCategory::Camp {
            let uses = item.uses.unwrap_or(CAMP_ITEM_MAX_USES);
            if uses > 1 {
                item.uses = Some(uses - 1);
                UseOutcome::UsesLeft { uses: uses - 1 }
            } else {
                UseOutcome::Depleted
            }
        } else {
            return Err(CoreError::NotUsable {
                name: item.name.clone(),
                category: item.category.to_string(),
            });
        };

        if outcome == UseOutcome::Depleted {
            self.remove_item(id)?;
        }
        debug!(item_id = %id, ?outcome, "Item used");
        Ok(outcome)
    }

    /// Sells `qty` units. Returns the quantity left (0 when the item is gone).
    ///
    /// Coins are not credited; the player records the payment themselves.
    pub fn sell_item(&mut self, id: &str, qty: u32) -> CoreResult<u32> {
        let index = self.item_index(id)?;
        let available = self.items[index].quantity;
        validate_sell_quantity(qty, available)?;

        let remaining = available - qty;
        if remaining == 0 {
            self.remove_item(id)?;
        } else {
            self.items[index].quantity = remaining;
        }
        debug!(item_id = %id, sold = qty, remaining, "Item sold");
        Ok(remaining)
    }

    /// Items whose name or category contains `query`, ignoring case.
    ///
    /// An empty query matches everything.
    pub fn filter_items(&self, query: &str) -> Vec<&Item> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item_matches(item, &needle))
            .collect()
    }
}

// =============================================================================
// Coins & Vaults
// =============================================================================

impl Inventory {
    pub fn set_coins(&mut self, denomination: Denomination, count: u64) {
        self.currency.set(denomination, count);
    }

    pub fn vault(&self, id: &str) -> Option<&Vault> {
        self.vaults.iter().find(|v| v.id == id)
    }

    fn vault_index(&self, id: &str) -> CoreResult<usize> {
        self.vaults
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| CoreError::VaultNotFound(id.to_string()))
    }

    pub fn add_vault(&mut self, draft: VaultDraft, ids: &mut impl IdGenerator) -> CoreResult<String> {
        validate_name("vault name", &draft.name)?;

        let id = ids.next_id();
        if self.vault(&id).is_some() {
            return Err(CoreError::DuplicateId {
                id,
                container: "vaults".to_string(),
            });
        }

        self.vaults.push(Vault {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            location: draft.location,
            currency: draft.currency,
            notes: draft.notes,
            nearby: draft.nearby,
        });
        debug!(vault_id = %id, "Vault added");
        Ok(id)
    }

    pub fn update_vault(&mut self, id: &str, patch: VaultPatch) -> CoreResult<()> {
        let index = self.vault_index(id)?;
        if let Some(name) = &patch.name {
            validate_name("vault name", name)?;
        }

        let vault = &mut self.vaults[index];
        if let Some(name) = patch.name {
            vault.name = name.trim().to_string();
        }
        if let Some(location) = patch.location {
            vault.location = location;
        }
        if let Some(currency) = patch.currency {
            vault.currency = currency;
        }
        if let Some(notes) = patch.notes {
            vault.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
        if let Some(nearby) = patch.nearby {
            vault.nearby = nearby;
        }
        Ok(())
    }

    pub fn remove_vault(&mut self, id: &str) -> CoreResult<Vault> {
        let index = self.vault_index(id)?;
        debug!(vault_id = %id, "Vault removed");
        Ok(self.vaults.remove(index))
    }

    /// Flips a vault's nearby flag and returns the new value.
    pub fn toggle_vault_nearby(&mut self, id: &str) -> CoreResult<bool> {
        let index = self.vault_index(id)?;
        let vault = &mut self.vaults[index];
        vault.nearby = !vault.nearby;
        Ok(vault.nearby)
    }
}

// =============================================================================
// External Storages
// =============================================================================

impl Inventory {
    pub fn storage(&self, id: &str) -> Option<&ExternalStorage> {
        self.external_storages.iter().find(|s| s.id == id)
    }

    pub fn storage_mut(&mut self, id: &str) -> CoreResult<&mut ExternalStorage> {
        self.external_storages
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::StorageNotFound(id.to_string()))
    }

    fn storage_index(&self, id: &str) -> CoreResult<usize> {
        self.external_storages
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::StorageNotFound(id.to_string()))
    }

    /// Adds a storage with an empty nested inventory. Returns the new id.
    pub fn add_storage(
        &mut self,
        draft: ExternalStorageDraft,
        ids: &mut impl IdGenerator,
    ) -> CoreResult<String> {
        validate_name("storage name", &draft.name)?;
        validate_rule_id(&draft.storage_type_id)?;

        let id = ids.next_id();
        if self.storage(&id).is_some() {
            return Err(CoreError::DuplicateId {
                id,
                container: "external storages".to_string(),
            });
        }

        self.external_storages.push(ExternalStorage {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            description: draft.description,
            storage_type_id: draft.storage_type_id,
            nearby: draft.nearby,
            inventory: Inventory::default(),
        });
        debug!(storage_id = %id, "External storage added");
        Ok(id)
    }

    pub fn update_storage(&mut self, id: &str, patch: ExternalStoragePatch) -> CoreResult<()> {
        let index = self.storage_index(id)?;
        if let Some(name) = &patch.name {
            validate_name("storage name", name)?;
        }
        if let Some(type_id) = &patch.storage_type_id {
            validate_rule_id(type_id)?;
        }

        let storage = &mut self.external_storages[index];
        if let Some(name) = patch.name {
            storage.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            storage.description = description;
        }
        if let Some(type_id) = patch.storage_type_id {
            storage.storage_type_id = type_id;
        }
        if let Some(nearby) = patch.nearby {
            storage.nearby = nearby;
        }
        Ok(())
    }

    /// Deletes a storage together with everything in it.
    pub fn remove_storage(&mut self, id: &str) -> CoreResult<ExternalStorage> {
        let index = self.storage_index(id)?;
        let removed = self.external_storages.remove(index);
        debug!(
            storage_id = %id,
            lost_items = removed.inventory.items.len(),
            "External storage removed"
        );
        Ok(removed)
    }

    /// Flips a storage's nearby flag and returns the new value.
    pub fn toggle_storage_nearby(&mut self, id: &str) -> CoreResult<bool> {
        let storage = self.storage_mut(id)?;
        storage.nearby = !storage.nearby;
        debug!(storage_id = %id, nearby = storage.nearby, "Storage nearby toggled");
        Ok(storage.nearby)
    }

    /// Coin value of the pack plus every nearby vault and storage.
    pub fn nearby_wealth(&self) -> WealthBreakdown {
        let pack = self.currency.value();
        let vaults: CopperPieces = self
            .vaults
            .iter()
            .filter(|v| v.nearby)
            .map(|v| v.currency.value())
            .sum();
        let storages: CopperPieces = self
            .external_storages
            .iter()
            .filter(|s| s.nearby)
            .map(|s| s.inventory.currency.value())
            .sum();

        WealthBreakdown {
            pack,
            vaults,
            storages,
            total: pack + vaults + storages,
        }
    }

    /// Value of the pack's purse plus every nearby vault and storage purse.
    pub fn nearby_total_value(&self) -> CopperPieces {
        self.nearby_wealth().total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
