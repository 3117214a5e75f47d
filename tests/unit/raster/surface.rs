use super::*;

#[test]
fn rejects_empty_and_oversized_dimensions() {
    assert!(matches!(Surface::new(0, 10), Err(SketchError::Surface(_))));
    assert!(matches!(Surface::new(10, 0), Err(SketchError::Surface(_))));
    assert!(matches!(
        Surface::new(u32::from(u16::MAX) + 1, 4),
        Err(SketchError::Surface(_))
    ));
}

#[test]
fn fill_then_read_back() {
    let mut s = Surface::new(4, 3).unwrap();
    assert_eq!(s.pixel(0, 0), [0, 0, 0, 0]);
    s.fill(Rgba::rgb(250, 248, 242));
    assert_eq!(s.pixel(3, 2), [250, 248, 242, 255]);
    assert_eq!(s.pixel(4, 0), [0, 0, 0, 0]);
}

#[test]
fn line_marks_only_land_after_commit() {
    let mut s = Surface::new(10, 10).unwrap();
    s.fill(Rgba::WHITE);
    s.line((0.0, 5.0), (10.0, 5.0), Rgba::BLACK, 2.0);
    assert_eq!(s.pixel(5, 5), [255, 255, 255, 255]);
    s.commit();
    let px = s.pixel(5, 5);
    assert!(px[0] < 64, "line should darken the row, got {px:?}");
    assert_eq!(s.pixel(5, 0), [255, 255, 255, 255]);
}

#[test]
fn committed_marks_reach_the_whole_canvas() {
    let mut s = Surface::new(10, 10).unwrap();
    s.fill(Rgba::WHITE);
    s.fill_rect(0.0, 0.0, 10.0, 10.0, Rgba::BLACK);
    let bmp = s.into_bitmap();
    assert_eq!(bmp.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(bmp.get_pixel(9, 9).0, [0, 0, 0, 255]);
}

#[test]
fn global_alpha_scales_marks() {
    let mut s = Surface::new(4, 4).unwrap();
    s.set_global_alpha(0.0);
    s.fill_rect(0.0, 0.0, 4.0, 4.0, Rgba::BLACK);
    s.fill(Rgba::BLACK);
    s.commit();
    assert_eq!(s.pixel(1, 1), [0, 0, 0, 0]);

    s.set_global_alpha(0.5);
    s.fill(Rgba::BLACK);
    let a = s.pixel(1, 1)[3];
    assert!((127..=129).contains(&a));
}

#[test]
fn non_finite_marks_are_ignored() {
    let mut s = Surface::new(4, 4).unwrap();
    s.line((f64::NAN, 0.0), (3.0, 3.0), Rgba::BLACK, 1.0);
    s.fill_rect(0.0, 0.0, f64::INFINITY, 2.0, Rgba::BLACK);
    s.fill_circle(2.0, 2.0, f64::NAN, Rgba::BLACK);
    let bmp = s.into_bitmap();
    assert!(bmp.pixels().all(|p| p.0[3] == 0));
}

#[test]
fn blurred_layer_softens_edges() {
    let mut s = Surface::new(20, 20).unwrap();
    s.fill(Rgba::WHITE);
    s.blurred_layer(2.0, |layer| {
        layer.fill_rect(8.0, 0.0, 4.0, 20.0, Rgba::BLACK);
    })
    .unwrap();
    let inside = s.pixel(10, 10)[0];
    let near = s.pixel(6, 10)[0];
    let far = s.pixel(0, 10)[0];
    assert!(inside < near, "inside {inside} near {near}");
    assert!(near < far, "near {near} far {far}");
    assert_eq!(far, 255);
}

#[test]
fn crop_returns_rows_of_bounds() {
    let mut s = Surface::new(4, 4).unwrap();
    s.fill_rect(1.0, 1.0, 1.0, 1.0, Rgba::BLACK);
    let crop = s.crop_premul(PixelBounds::new(1, 1, 3, 2).unwrap());
    assert_eq!(crop.len(), 2 * 4);
    assert!(crop[3] > 200);
    assert_eq!(&crop[4..8], &[0, 0, 0, 0]);
}
