use super::*;
use crate::foundation::error::SketchError;
use crate::foundation::rng::seeded_rng;
use crate::style::Style;

fn white(width: u32, height: u32) -> Bitmap {
    Bitmap::from_pixel(width, height, image::Rgba([255, 255, 255, 255]))
}

#[test]
fn white_pencil_without_shading_stays_white() {
    let settings = StyleSettings::new(Style::Pencil).with_shading(0.0);
    let out = apply_style(&white(100, 100), &settings, &mut seeded_rng(1));
    assert_eq!(out.dimensions(), (100, 100));
    assert!(out.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn unusable_surfaces_return_the_source_unchanged() {
    let settings = StyleSettings::new(Style::Charcoal);
    let empty = Bitmap::new(0, 0);
    assert_eq!(apply_style(&empty, &settings, &mut seeded_rng(1)), empty);

    let wide = Bitmap::from_pixel(70_000, 1, image::Rgba([1, 2, 3, 255]));
    assert_eq!(apply_style(&wide, &settings, &mut seeded_rng(1)), wide);
    assert!(matches!(
        try_apply_style(&wide, &settings, &mut seeded_rng(1)),
        Err(SketchError::Surface(_))
    ));
}

#[test]
fn sketcher_matches_apply_style() {
    let image = Bitmap::from_fn(24, 24, |x, _| {
        let v = if x < 12 { 0 } else { 255 };
        image::Rgba([v, v, v, 255])
    });
    let settings = StyleSettings::new(Style::Ink);
    let direct = apply_style(&image, &settings, &mut seeded_rng(4));
    let via_trait = Sketcher.render(&image, &settings, &mut seeded_rng(4));
    assert_eq!(direct, via_trait);
}

#[test]
fn background_comes_from_the_style() {
    let settings = StyleSettings::new(Style::Blueprint).with_shading(0.0);
    let out = apply_style(&white(8, 8), &settings, &mut seeded_rng(1));
    let bg = Style::Blueprint.background();
    assert!(out.pixels().all(|p| p.0 == [bg.r, bg.g, bg.b, 255]));
}

#[test]
fn sketch_png_decodes_renders_and_encodes() {
    let png = encode_png(&white(20, 10)).unwrap();
    let settings = StyleSettings::new(Style::Pencil).with_shading(0.0);
    let out = sketch_png(&png, &settings, &mut seeded_rng(1)).unwrap();
    let decoded = decode_image(&out).unwrap();
    assert_eq!(decoded.dimensions(), (20, 10));

    let err = sketch_png(b"nope", &settings, &mut seeded_rng(1)).unwrap_err();
    assert!(matches!(err, SketchError::Decode(_)));
}

#[test]
fn selections_delegate_to_the_compositor() {
    let image = white(16, 16);
    let out =
        apply_style_with_selections(&image, &[], NonSelectedAreaMode::Original, &mut seeded_rng(1))
            .unwrap();
    assert_eq!(out, image);
}
