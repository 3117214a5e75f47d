use super::*;
use crate::style::Style;

#[test]
fn blend_spec_defaults_to_soft_ten() {
    let blend = BlendSpec::default();
    assert_eq!(blend.mode, BlendMode::Soft);
    assert_eq!(blend.radius, 10.0);
    assert!(!blend.is_hard());
}

#[test]
fn blend_radius_is_clamped() {
    assert_eq!(BlendSpec::new(BlendMode::Soft, 80.0).clamped_radius(), 50.0);
    assert_eq!(BlendSpec::new(BlendMode::Soft, -5.0).clamped_radius(), 0.0);
    assert_eq!(BlendSpec::new(BlendMode::Soft, f64::NAN).clamped_radius(), 10.0);
}

#[test]
fn hard_mode_and_zero_radius_overwrite() {
    assert!(BlendSpec::hard().is_hard());
    assert!(BlendSpec::new(BlendMode::Hard, 30.0).is_hard());
    assert!(BlendSpec::new(BlendMode::Feather, 0.0).is_hard());
    assert!(!BlendSpec::new(BlendMode::Gradient, 1.0).is_hard());
}

#[test]
fn blend_records_parse_with_defaults() {
    let blend: BlendSpec = serde_json::from_str(r#"{"mode":"feather","radius":25}"#).unwrap();
    assert_eq!(blend, BlendSpec::new(BlendMode::Feather, 25.0));
    let blend: BlendSpec = serde_json::from_str("{}").unwrap();
    assert_eq!(blend, BlendSpec::default());

    let mode: NonSelectedAreaMode = serde_json::from_str(r#""transparent""#).unwrap();
    assert_eq!(mode, NonSelectedAreaMode::Transparent);
    assert_eq!(NonSelectedAreaMode::default(), NonSelectedAreaMode::Original);
}

#[test]
fn selection_records_parse_with_defaults() {
    let json = r#"{
        "id": "selection-1",
        "rect": {"x": 4, "y": 8, "width": 20, "height": 12},
        "settings": {"style": "ink", "shading": 0}
    }"#;
    let selection: Selection = serde_json::from_str(json).unwrap();
    assert_eq!(selection.id, "selection-1");
    assert_eq!(selection.name, "");
    assert_eq!(selection.rect, Rect::new(4.0, 8.0, 20.0, 12.0));
    assert_eq!(selection.settings.style(), Style::Ink);
    assert_eq!(selection.settings.common.shading, 0.0);
    assert_eq!(selection.blend, BlendSpec::default());
}

#[test]
fn pixel_bounds_clip_to_the_image() {
    let rect = Rect::new(-5.0, 10.5, 20.0, 100.0);
    let s = Selection::new("a", "A", rect, StyleSettings::default());
    assert_eq!(s.pixel_bounds(64, 32), Some(PixelBounds::new(0, 10, 15, 32).unwrap()));
    let rect = Rect::new(70.0, 0.0, 5.0, 5.0);
    let outside = Selection::new("b", "B", rect, StyleSettings::default());
    assert_eq!(outside.pixel_bounds(64, 32), None);
}

#[test]
fn blend_preview_rect_insets_by_radius() {
    let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
    let s = Selection::new("a", "A", rect, StyleSettings::default());
    assert_eq!(blend_preview_rect(&s), Rect::new(20.0, 30.0, 80.0, 30.0));

    let wide = s.with_blend(BlendSpec::new(BlendMode::Gradient, 30.0));
    assert_eq!(blend_preview_rect(&wide), Rect::new(40.0, 50.0, 40.0, 0.0));
}
