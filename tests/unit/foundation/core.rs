use super::*;

#[test]
fn card_size_is_portrait() {
    assert_eq!(CARD_SIZE, Size::new(912, 1368));
    assert!(CARD_SIZE.height > CARD_SIZE.width);
}

#[test]
fn size_center_rounds_down() {
    assert_eq!(Size::square(120).center(), Point::new(60, 60));
    assert_eq!(Size::new(5, 3).center(), Point::new(2, 1));
}

#[test]
fn point_offset_adds_components() {
    assert_eq!(Point::new(10, -2).offset(-3, 5), Point::new(7, 3));
}
