use super::*;

#[test]
fn default_geometry() {
    let l = LayoutConfig::default();
    assert_eq!(l.canvas, Size::new(912, 1368));
    assert_eq!(l.portrait.origin, Point::new(36, 50));
    assert_eq!(l.portrait.size, Size::new(800, 700));
    assert_eq!(l.name_plate.anchor(0), Some(Point::new(156, 1050)));
    assert_eq!(l.name.anchor(0), Some(Point::new(456, 1110)));
    assert_eq!(l.weapons.anchors.len(), 2);
    assert_eq!(l.armors.anchors.len(), 3);
    assert_eq!(l.health.font_size, 76.0);
}

#[test]
fn every_slot_name_resolves() {
    let l = LayoutConfig::default();
    for name in SlotName::ALL {
        assert!(!l.slot(name).anchors.is_empty(), "{name:?}");
    }
    assert_eq!(l.slot(SlotName::Armors).size, Size::square(120));
}

#[test]
fn language_row_is_centered() {
    let l = LayoutConfig::default();
    assert!(l.language_row(0).is_empty());
    assert_eq!(l.language_row(1), vec![Point::new(381, 1200)]);

    let row = l.language_row(4);
    assert_eq!(row.len(), 4);
    assert_eq!(row[0], Point::new(111, 1200));
    assert_eq!(row[3].x - row[2].x, 180);
    assert_eq!(l.language_row(9).len(), 4);
}

#[test]
fn display_name_truncates_by_characters() {
    let l = LayoutConfig::default();
    assert_eq!(l.display_name("Ala"), "Ala");
    let long = "Ł".repeat(30);
    assert_eq!(l.display_name(&long).chars().count(), 24);
}

#[test]
fn layout_serializes() {
    let json = serde_json::to_string(&LayoutConfig::default()).unwrap();
    let back: LayoutConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, LayoutConfig::default());
}

#[test]
fn label_offsets_are_carried_for_icon_slots() {
    let l = LayoutConfig::default();
    assert_eq!(l.weapons.label_offset, Point::new(40, 40));
    assert_eq!(l.armors.label_offset, Point::new(40, 40));
    assert_eq!(l.health.label_offset, Point::default());

    let json = serde_json::to_value(&l).unwrap();
    assert_eq!(json["weapons"]["label_offset"]["x"], 40);
}
