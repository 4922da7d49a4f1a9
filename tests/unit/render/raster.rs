use super::*;

#[test]
fn pixmap_size_rejects_oversized_surfaces() {
    assert_eq!(pixmap_size(912, 1368).unwrap(), (912, 1368));
    assert_eq!(pixmap_size(0, 0).unwrap(), (1, 1));
    assert!(pixmap_size(70_000, 10).unwrap_err().is_validation());
}

#[test]
fn resize_hits_the_exact_size() {
    let img = Canvas::from_pixel(37, 11, image::Rgba([9, 9, 9, 255]));
    let out = resize(&img, Size::square(120));
    assert_eq!(out.dimensions(), (120, 120));
    assert_eq!(out.get_pixel(60, 60).0, [9, 9, 9, 255]);
}

#[test]
fn overlay_clips_at_the_edges() {
    let mut bottom = Canvas::new(4, 4);
    let top = Canvas::from_pixel(3, 3, image::Rgba([255, 0, 0, 255]));
    overlay(&mut bottom, &top, Point::new(2, -1));
    assert_eq!(bottom.get_pixel(3, 0).0, [255, 0, 0, 255]);
    assert_eq!(bottom.get_pixel(3, 1).0, [255, 0, 0, 255]);
    assert_eq!(bottom.get_pixel(1, 0).0, [0, 0, 0, 0]);
    assert_eq!(bottom.get_pixel(3, 2).0, [0, 0, 0, 0]);
}

#[test]
fn circle_covers_center_not_corners() {
    let mut surface = Canvas::new(40, 40);
    fill_circle(&mut surface, Point::new(20, 20), 10, Rgba8::new(0, 0, 0, 160)).unwrap();

    let center = surface.get_pixel(20, 20).0;
    assert!(center[3].abs_diff(160) <= 2, "{center:?}");
    assert_eq!(surface.get_pixel(0, 0).0[3], 0);
    assert_eq!(surface.get_pixel(39, 39).0[3], 0);
    assert_eq!(surface.get_pixel(20, 35).0[3], 0);
}

#[test]
fn zero_radius_draws_nothing() {
    let mut surface = Canvas::new(8, 8);
    fill_circle(&mut surface, Point::new(4, 4), 0, Rgba8::WHITE).unwrap();
    assert!(surface.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}
