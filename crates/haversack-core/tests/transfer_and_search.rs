//! End-to-end scenarios across the pack, external storages and search.

use haversack_core::{
    calc, ContainerRef, ExternalStorageDraft, Inventory, ItemCategory, ItemDraft, RuleTables,
    TransferOutcome,
};
use pretty_assertions::assert_eq;

struct Fixture {
    inv: Inventory,
    cloak: String,
    rope: String,
    cart: String,
    tower: String,
}

fn fixture() -> Fixture {
    let mut n = 0;
    let mut ids = move || {
        n += 1;
        format!("id-{:03}", n)
    };

    let mut inv = Inventory::default();
    let cloak = inv
        .add_item(
            ItemDraft::new("Cloak of Elvenkind", ItemCategory::MagicItem).attunement(true, true),
            &mut ids,
        )
        .unwrap();
    let rope = inv
        .add_item(ItemDraft::new("Hempen Rope", ItemCategory::ToolKit), &mut ids)
        .unwrap();

    let cart = inv
        .add_storage(
            ExternalStorageDraft {
                name: "Supply Cart".into(),
                storage_type_id: "small-cart".into(),
                nearby: true,
                ..ExternalStorageDraft::default()
            },
            &mut ids,
        )
        .unwrap();
    let tower = inv
        .add_storage(
            ExternalStorageDraft {
                name: "Wizard Tower".into(),
                storage_type_id: "house".into(),
                nearby: false,
                ..ExternalStorageDraft::default()
            },
            &mut ids,
        )
        .unwrap();

    inv.storage_mut(&tower)
        .unwrap()
        .inventory
        .add_item(ItemDraft::new("Silk Rope", ItemCategory::ToolKit), &mut ids)
        .unwrap();

    Fixture {
        inv,
        cloak,
        rope,
        cart,
        tower,
    }
}

#[test]
fn test_round_trip_through_nearby_storage_de_attunes() {
    let Fixture {
        mut inv,
        cloak,
        cart,
        ..
    } = fixture();
    let original = inv.items.clone();
    let cart_ref = ContainerRef::Storage(cart.clone());

    let out = inv
        .transfer_item(&cloak, &ContainerRef::Pack, &cart_ref)
        .unwrap();
    assert_eq!(
        out,
        TransferOutcome::Moved {
            item_id: cloak.clone(),
            de_attuned: true
        }
    );
    let back = inv
        .transfer_item(&cloak, &cart_ref, &ContainerRef::Pack)
        .unwrap();
    assert_eq!(
        back,
        TransferOutcome::Moved {
            item_id: cloak.clone(),
            de_attuned: false
        }
    );

    // Same item set, cloak now at the end and no longer attuned
    let mut ids: Vec<_> = inv.items.iter().map(|i| i.id.clone()).collect();
    let mut original_ids: Vec<_> = original.iter().map(|i| i.id.clone()).collect();
    ids.sort();
    original_ids.sort();
    assert_eq!(ids, original_ids);

    let returned = inv.item(&cloak).unwrap();
    assert!(returned.requires_attunement);
    assert!(!returned.is_attuned);

    let mut expected = original[0].clone();
    expected.is_attuned = false;
    assert_eq!(returned, &expected);
    assert_eq!(calc::count_attuned_items(&inv.items), 0);
}

#[test]
fn test_far_storage_blocks_both_directions() {
    let Fixture {
        mut inv,
        rope,
        tower,
        ..
    } = fixture();
    let before = inv.clone();
    let tower_ref = ContainerRef::Storage(tower.clone());

    let into = inv
        .transfer_item(&rope, &ContainerRef::Pack, &tower_ref)
        .unwrap();
    assert_eq!(
        into,
        TransferOutcome::NotNearby {
            storage_id: tower.clone()
        }
    );

    let silk = inv.storage(&tower).unwrap().inventory.items[0].id.clone();
    let out = inv
        .transfer_item(&silk, &tower_ref, &ContainerRef::Pack)
        .unwrap();
    assert!(!out.is_moved());

    assert_eq!(inv, before);
}

#[test]
fn test_search_orders_pack_then_storages() {
    let Fixture { mut inv, rope, cart, tower, .. } = fixture();
    assert!(inv.search("R").is_empty());

    inv.transfer_item(&rope, &ContainerRef::Pack, &ContainerRef::Storage(cart.clone()))
        .unwrap();
    inv.add_item(ItemDraft::new("Rope Ladder", ItemCategory::Large), &mut || "id-900".to_string())
        .unwrap();

    let hits = inv.search("rope");
    let found: Vec<_> = hits
        .iter()
        .map(|h| (h.item.name.as_str(), h.location, h.storage_id, h.can_transfer))
        .collect();
    assert_eq!(
        found,
        vec![
            ("Rope Ladder", "Player Pack", None, false),
            ("Hempen Rope", "Supply Cart", Some(cart.as_str()), true),
            ("Silk Rope", "Wizard Tower", Some(tower.as_str()), false),
        ]
    );
}

#[test]
fn test_storage_items_weigh_against_storage_not_pack() {
    let Fixture { mut inv, rope, cart, .. } = fixture();
    let rules = RuleTables::default();
    let pack_before = calc::total_weight(&inv.items);

    inv.transfer_item(&rope, &ContainerRef::Pack, &ContainerRef::Storage(cart.clone()))
        .unwrap();

    assert_eq!(calc::total_weight(&inv.items), pack_before - 2.0);
    let cart_storage = inv.storage(&cart).unwrap();
    assert_eq!(calc::total_weight(&cart_storage.inventory.items), 2.0);
    assert_eq!(
        rules.storage_type(&cart_storage.storage_type_id).capacity,
        300
    );
}

#[test]
fn test_inventory_json_round_trip_is_lossless() {
    let Fixture { inv, .. } = fixture();
    let json = serde_json::to_string_pretty(&inv).unwrap();
    let back: Inventory = serde_json::from_str(&json).unwrap();
    assert_eq!(back, inv);
}
