#![allow(clippy::float_cmp)]

use super::*;
use crate::storage::MemoryStore;

// =============================================================
// Helpers
// =============================================================

fn workspace() -> Workspace {
    Workspace::new(WorkspaceConfig { seed: Some(7), ..WorkspaceConfig::default() })
}

fn created(action: Action) -> Item {
    match action {
        Action::ItemCreated(item) => item,
        other => panic!("expected ItemCreated, got {other:?}"),
    }
}

fn add(ws: &mut Workspace, kind: &str) -> ItemId {
    created(ws.add_item(kind)).id
}

// =============================================================
// Adding
// =============================================================

#[test]
fn add_item_updates_registry_and_costs() {
    let mut ws = workspace();
    let item = created(ws.add_item("bureau"));
    assert_eq!(item.id.as_str(), "bureau_1");
    assert_eq!(ws.registry().len(), 1);
    assert_eq!(ws.cost_summary().total_cost, 1000);
}

#[test]
fn rename_regroups_costs_without_changing_total() {
    let mut ws = workspace();
    add(&mut ws, "bureau");
    let stoel = add(&mut ws, "stoel");
    assert_eq!(ws.cost_summary().total_cost, 1500);
    assert_eq!(ws.cost_summary().by_label.len(), 2);

    ws.update_label(&stoel, "Bureau").unwrap();
    let summary = ws.cost_summary();
    assert_eq!(summary.total_cost, 1500);
    assert_eq!(summary.by_label.len(), 1);
    assert_eq!(summary.by_label[0].label, "Bureau");
    assert_eq!(summary.by_label[0].count, 2);
    assert_eq!(summary.by_label[0].subtotal, 2000);
}

#[test]
fn custom_item_spawns_at_fixed_point_with_trimmed_name() {
    let mut ws = workspace();
    let item = created(ws.add_custom_item("  Bank  ").unwrap());
    assert_eq!(item.label, "Bank");
    assert_eq!(item.kind, ItemKind::Custom);
    assert_eq!(item.position, Point::new(50.0, 50.0));
    assert_eq!(item.size, Size::new(100.0, 100.0));
    assert_eq!(item.price, Price::ZERO);
    assert!(item.photo.is_none());
}

#[test]
fn custom_item_rejects_empty_name() {
    let mut ws = workspace();
    let err = ws.add_custom_item("   ").unwrap_err();
    assert!(matches!(err, LayoutError::InvalidInput(_)));
    assert!(ws.registry().is_empty());
}

#[test]
fn custom_photo_defaults_and_overrides() {
    let mut ws = workspace();
    let item = created(ws.add_custom_photo("Poster", "https://img/p.png", None, None).unwrap());
    assert_eq!(item.kind, ItemKind::CustomPhoto);
    assert_eq!(item.size, Size::new(100.0, 100.0));
    let photo = item.photo.unwrap();
    assert_eq!(photo.url.as_deref(), Some("https://img/p.png"));
    assert_eq!(photo.backup_color, "#3498db");

    let item = created(ws.add_custom_photo("Bank", "u", Some(Size::new(200.0, 90.0)), Some("#ff0000")).unwrap());
    assert_eq!(item.size, Size::new(200.0, 90.0));
    assert_eq!(item.photo.unwrap().backup_color, "#ff0000");
}

#[test]
fn custom_photo_validates_inputs() {
    let mut ws = workspace();
    assert!(matches!(ws.add_custom_photo("", "u", None, None), Err(LayoutError::InvalidInput(_))));
    assert!(matches!(ws.add_custom_photo("a", " ", None, None), Err(LayoutError::InvalidInput(_))));
    assert!(matches!(
        ws.add_custom_photo("a", "u", Some(Size::new(0.0, 10.0)), None),
        Err(LayoutError::InvalidInput(_))
    ));
    assert!(matches!(
        ws.add_custom_photo("a", "u", Some(Size::new(10.0, f64::NAN)), None),
        Err(LayoutError::InvalidInput(_))
    ));
    assert!(ws.registry().is_empty());
}

#[test]
fn same_seed_places_items_identically() {
    let mut a = workspace();
    let mut b = workspace();
    for kind in ["bureau", "plant", "kast"] {
        assert_eq!(created(a.add_item(kind)).position, created(b.add_item(kind)).position);
    }
}

// =============================================================
// Removing and selection
// =============================================================

#[test]
fn remove_updates_costs_and_ignores_unknown() {
    let mut ws = workspace();
    let id = add(&mut ws, "lamp");
    assert_eq!(ws.remove_item(&ItemId::from("ghost_9")), Action::None);
    assert_eq!(ws.remove_item(&id), Action::ItemDeleted { id: id.clone() });
    assert!(ws.registry().is_empty());
    assert_eq!(ws.cost_summary().total_cost, 0);
}

#[test]
fn selection_is_exclusive() {
    let mut ws = workspace();
    let a = add(&mut ws, "plant");
    let b = add(&mut ws, "lamp");
    assert_eq!(ws.select_item(&a), Action::SelectionChanged { id: Some(a.clone()) });
    assert_eq!(ws.select_item(&b), Action::SelectionChanged { id: Some(b.clone()) });
    assert_eq!(ws.selection(), Some(&b));
    assert!(!ws.item(&a).unwrap().selected);
    assert_eq!(ws.select_item(&ItemId::from("nope_1")), Action::None);
    assert_eq!(ws.selection(), Some(&b));
    assert_eq!(ws.deselect(), Action::SelectionChanged { id: None });
    assert_eq!(ws.deselect(), Action::None);
}

#[test]
fn delete_selected_removes_only_the_selection() {
    let mut ws = workspace();
    let a = add(&mut ws, "plant");
    let b = add(&mut ws, "lamp");
    assert_eq!(ws.delete_selected(), Action::None);
    ws.select_item(&b);
    assert_eq!(ws.delete_selected(), Action::ItemDeleted { id: b });
    assert_eq!(ws.registry().len(), 1);
    assert!(ws.item(&a).is_some());
    assert_eq!(ws.selection(), None);
}

// =============================================================
// Edits
// =============================================================

#[test]
fn price_edit_validates_and_recomputes() {
    let mut ws = workspace();
    let id = add(&mut ws, "bureau");
    ws.update_price(&id, "1200").unwrap();
    assert_eq!(ws.cost_summary().total_cost, 1200);
    assert!(matches!(ws.update_price(&id, -5_i64), Err(LayoutError::InvalidInput(_))));
    assert!(matches!(ws.update_price(&id, 12.5_f64), Err(LayoutError::InvalidInput(_))));
    assert_eq!(ws.cost_summary().total_cost, 1200);
}

#[test]
fn edits_on_unknown_id_are_not_found() {
    let mut ws = workspace();
    let ghost = ItemId::from("ghost_1");
    assert!(matches!(ws.update_label(&ghost, "x"), Err(LayoutError::NotFound(_))));
    assert!(matches!(ws.update_scale(&ghost, 120.0), Err(LayoutError::NotFound(_))));
    assert!(matches!(ws.update_color_filter(&ghost, "none"), Err(LayoutError::NotFound(_))));
    assert!(matches!(ws.clear_photo(&ghost), Err(LayoutError::NotFound(_))));
}

#[test]
fn transform_edits_compose() {
    let mut ws = workspace();
    let id = add(&mut ws, "kast");
    ws.update_transform(&id, 150.0, 30.0).unwrap();
    ws.update_rotation(&id, 90.0).unwrap();
    let t = ws.item(&id).unwrap().transform;
    assert_eq!(t.scale, 1.5);
    assert_eq!(t.rotation, 90.0);
    assert_eq!(t.to_string(), "scale(1.5) rotate(90deg)");
    assert!(matches!(ws.update_scale(&id, 0.0), Err(LayoutError::InvalidInput(_))));
}

#[test]
fn photo_edits() {
    let mut ws = workspace();
    let id = created(ws.add_custom_item("Bord").unwrap()).id;
    assert_eq!(ws.update_photo(&id, "https://x/y.jpg").unwrap(), Action::ItemUpdated { id: id.clone() });
    assert_eq!(ws.item(&id).unwrap().photo.as_ref().unwrap().url.as_deref(), Some("https://x/y.jpg"));
    ws.clear_photo(&id).unwrap();
    assert_eq!(ws.item(&id).unwrap().photo.as_ref().and_then(|p| p.url.as_deref()), None);
}

#[test]
fn clear_resets_everything() {
    let mut ws = workspace();
    let id = add(&mut ws, "bureau");
    add(&mut ws, "stoel");
    ws.pointer_down(&id, Point::new(0.0, 0.0));
    assert_eq!(ws.clear(), Action::Cleared);
    assert!(ws.registry().is_empty());
    assert!(!ws.drag().is_dragging());
    assert_eq!(ws.cost_summary(), &CostSummary::default());
    assert_eq!(add(&mut ws, "bureau").as_str(), "bureau_1");
}

// =============================================================
// Pointer input
// =============================================================

#[test]
fn drag_moves_item_and_ends_at_last_clamped_position() {
    let mut ws = workspace();
    let id = created(ws.add_item_with(
        ItemKind::Stoel,
        ItemOverrides { position: Some(Point::new(100.0, 100.0)), ..Default::default() },
    ))
    .id;

    let actions = ws.pointer_down(&id, Point::new(110.0, 120.0));
    assert_eq!(
        actions,
        vec![Action::SelectionChanged { id: Some(id.clone()) }, Action::SetCursor("grabbing".into())]
    );

    let actions = ws.pointer_move(Point::new(210.0, 220.0));
    assert_eq!(actions, vec![Action::ItemMoved { id: id.clone(), position: Point::new(200.0, 200.0) }]);

    // Way past the right/bottom edge: clamped to canvas minus the 60x60 chair.
    let actions = ws.pointer_move(Point::new(2000.0, 2000.0));
    assert_eq!(actions, vec![Action::ItemMoved { id: id.clone(), position: Point::new(740.0, 540.0) }]);

    assert_eq!(ws.pointer_up(), vec![Action::SetCursor(String::new())]);
    assert_eq!(ws.item(&id).unwrap().position, Point::new(740.0, 540.0));
    assert!(ws.pointer_move(Point::new(0.0, 0.0)).is_empty());
    assert!(ws.pointer_up().is_empty());
}

#[test]
fn second_pointer_down_is_ignored_during_drag() {
    let mut ws = workspace();
    let a = add(&mut ws, "plant");
    let b = add(&mut ws, "lamp");
    assert!(!ws.pointer_down(&a, Point::new(0.0, 0.0)).is_empty());
    assert!(ws.pointer_down(&b, Point::new(0.0, 0.0)).is_empty());
    assert_eq!(ws.drag().active_item(), Some(&a));
    assert_eq!(ws.selection(), Some(&a));
}

#[test]
fn pointer_down_on_unknown_item_does_nothing() {
    let mut ws = workspace();
    assert!(ws.pointer_down(&ItemId::from("ghost_1"), Point::new(0.0, 0.0)).is_empty());
    assert!(!ws.drag().is_dragging());
}

#[test]
fn removing_dragged_item_ends_drag() {
    let mut ws = workspace();
    let id = add(&mut ws, "plant");
    ws.pointer_down(&id, Point::new(0.0, 0.0));
    ws.remove_item(&id);
    assert!(!ws.drag().is_dragging());
    assert!(ws.pointer_move(Point::new(10.0, 10.0)).is_empty());
}

#[test]
fn canvas_size_applies_to_later_moves() {
    let mut ws = workspace();
    let id = created(ws.add_item_with(
        ItemKind::Plant,
        ItemOverrides { position: Some(Point::new(0.0, 0.0)), ..Default::default() },
    ))
    .id;
    ws.set_canvas_size(Size::new(300.0, 200.0));
    assert_eq!(ws.canvas(), Size::new(300.0, 200.0));
    ws.pointer_down(&id, Point::new(0.0, 0.0));
    let size = ws.item(&id).unwrap().size;
    let actions = ws.pointer_move(Point::new(1000.0, 1000.0));
    assert_eq!(
        actions,
        vec![Action::ItemMoved { id, position: Point::new(300.0 - size.width, 200.0 - size.height) }]
    );
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn save_and_load_round_trip() {
    let mut ws = workspace();
    let id = add(&mut ws, "bureau");
    ws.update_label(&id, "Hoofdbureau").unwrap();
    ws.update_color_filter(&id, "hue-rotate(90deg)").unwrap();
    add(&mut ws, "stoel");

    let mut store = MemoryStore::new();
    assert!(!ws.has_saved_layout(&store));
    assert_eq!(ws.save(&mut store).unwrap(), Action::LayoutSaved);
    assert!(ws.has_saved_layout(&store));
    assert!(store.get("werkplekLayout").is_some());

    let mut other = workspace();
    assert!(other.load(&store).unwrap());
    assert_eq!(other.registry(), ws.registry());
    assert_eq!(other.cost_summary(), ws.cost_summary());
}

#[test]
fn load_without_saved_layout_is_false() {
    let mut ws = workspace();
    add(&mut ws, "plant");
    assert!(!ws.load(&MemoryStore::new()).unwrap());
    assert_eq!(ws.registry().len(), 1);
}

#[test]
fn save_surfaces_storage_errors() {
    let mut ws = workspace();
    add(&mut ws, "plant");
    let mut store = MemoryStore::with_quota(8);
    assert!(matches!(ws.save(&mut store), Err(LayoutError::Storage(_))));
}

#[test]
fn corrupt_restore_leaves_registry_untouched() {
    let mut ws = workspace();
    add(&mut ws, "plant");
    let before = ws.registry().clone();
    assert!(matches!(ws.restore_json("{not json"), Err(LayoutError::CorruptSnapshot(_))));
    assert!(matches!(ws.restore_json(r#"{"version":"3.0"}"#), Err(LayoutError::CorruptSnapshot(_))));
    assert_eq!(ws.registry(), &before);
}

#[test]
fn restore_replaces_registry_and_costs() {
    let mut ws = workspace();
    add(&mut ws, "bureau");
    let json = r#"{"version":"1.0","items":[
        {"type":"lamp","id":"lamp_3","left":"10px","top":"20px","textContent":"Lamp"},
        {"type":"plant","id":"plant_4","left":"30px","top":"40px","price":40}
    ]}"#;
    assert_eq!(ws.restore_json(json).unwrap(), Action::LayoutRestored { count: 2 });
    assert_eq!(ws.registry().len(), 2);
    assert_eq!(ws.cost_summary().total_cost, 40);
    assert_eq!(add(&mut ws, "kast").as_str(), "kast_5");
}

#[test]
fn override_built_items_survive_a_save_and_load() {
    let mut ws = workspace();
    let item = created(ws.add_item_with(
        ItemKind::Bureau,
        ItemOverrides { label: Some("  Desk ".into()), ..Default::default() },
    ));
    assert_eq!(item.label, "Desk");
    ws.add_item(" lamp");

    let mut store = MemoryStore::new();
    ws.save(&mut store).unwrap();
    let mut other = workspace();
    assert!(other.load(&store).unwrap());
    assert_eq!(other.registry(), ws.registry());
}

#[test]
fn adding_after_restoring_a_maxed_counter_does_not_overflow() {
    let mut ws = workspace();
    let json = format!(r#"{{"items":[{{"kind":"bureau","id":"bureau_{}"}}]}}"#, u64::MAX);
    ws.restore_json(&json).unwrap();
    assert_eq!(add(&mut ws, "stoel").as_str(), "stoel_1");
    assert_eq!(ws.registry().len(), 2);
}
