use super::*;
use crate::edges::{Luminance, detect_edges};
use crate::foundation::core::Bitmap;
use crate::foundation::rng::{ConstantRng, seeded_rng};
use crate::raster::Surface;
use crate::style::settings::{CommonParams, Style};
use rand::RngCore;

fn flat(size: u32) -> Bitmap {
    Bitmap::from_pixel(size, size, image::Rgba([255, 255, 255, 255]))
}

fn gradient(size: u32) -> Bitmap {
    Bitmap::from_fn(size, size, |x, _| {
        let v = (x * 255 / (size - 1)) as u8;
        image::Rgba([v, v, v, 255])
    })
}

fn split(size: u32) -> Bitmap {
    Bitmap::from_fn(size, size, |x, _| {
        if x < size / 4 {
            image::Rgba([0, 0, 0, 255])
        } else {
            image::Rgba([255, 255, 255, 255])
        }
    })
}

fn no_shading() -> CommonParams {
    CommonParams {
        shading: 0.0,
        ..CommonParams::default()
    }
}

fn render(
    bmp: &Bitmap,
    background: Rgba,
    common: CommonParams,
    rng: &mut dyn RngCore,
    draw: impl FnOnce(&mut Marks<'_>) -> SketchResult<()>,
) -> Bitmap {
    let edges = detect_edges(bmp, common.sensitivity());
    let luma = Luminance::from_bitmap(bmp);
    let mut surface = Surface::new(bmp.width(), bmp.height()).unwrap();
    surface.fill(background);
    {
        let mut m = Marks::new(&mut surface, &edges, &luma, common, rng);
        draw(&mut m).unwrap();
    }
    surface.into_bitmap()
}

fn uniform(bmp: &Bitmap, color: Rgba) -> bool {
    let expected = [color.r, color.g, color.b, 255];
    bmp.pixels().all(|p| p.0 == expected)
}

#[test]
fn band_splits_the_byte_range_evenly() {
    assert_eq!(band(0, 8), 0);
    assert_eq!(band(31, 8), 0);
    assert_eq!(band(32, 8), 1);
    assert_eq!(band(255, 8), 7);
    assert_eq!(band(255, 2), 1);
}

#[test]
fn snap_right_angle_rounds_to_quarter_turns() {
    assert_eq!(snap_right_angle(0.2), 0.0);
    assert_eq!(snap_right_angle(1.4), FRAC_PI_2);
    assert_eq!(snap_right_angle(-1.7), -FRAC_PI_2);
}

#[test]
fn drafting_styles_leave_flat_paper_blank() {
    let bmp = flat(40);
    let topo = Style::Topographic.background();
    let out = render(&bmp, topo, no_shading(), &mut seeded_rng(8), |m| {
        topographic(m, TopographicParams::default())
    });
    assert!(uniform(&out, topo));
    let blue = Style::Blueprint.background();
    let out = render(&bmp, blue, no_shading(), &mut seeded_rng(8), |m| {
        blueprint(m, BlueprintParams::default())
    });
    assert!(uniform(&out, blue));
    let paper = Style::Architectural.background();
    let out = render(&bmp, paper, no_shading(), &mut seeded_rng(8), |m| {
        architectural(m, ArchitecturalParams::default())
    });
    assert!(uniform(&out, paper));
}

#[test]
fn topographic_draws_one_contour_per_band_boundary() {
    let bg = Style::Topographic.background();
    let levels = TopographicParams {
        topographic_levels: 4.0,
    };
    let out = render(&gradient(64), bg, no_shading(), &mut ConstantRng(0), |m| {
        topographic(m, levels)
    });
    // Four bands over a horizontal ramp leave three vertical contours.
    let marked_columns = (0..64)
        .filter(|&x| (0..64).any(|y| out.get_pixel(x, y).0 != [bg.r, bg.g, bg.b, 255]))
        .count();
    assert!((3..=12).contains(&marked_columns), "{marked_columns} columns marked");
}

#[test]
fn blueprint_draws_chalk_on_blue() {
    let bg = Style::Blueprint.background();
    let out = render(&split(32), bg, no_shading(), &mut ConstantRng(0), |m| {
        blueprint(m, BlueprintParams::default())
    });
    let lighter = out.pixels().any(|p| p.0[0] > bg.r && p.0[1] > bg.g);
    assert!(lighter);
}

#[test]
fn blueprint_grid_needs_shading() {
    let bg = Style::Blueprint.background();
    let common = CommonParams {
        shading: 50.0,
        ..CommonParams::default()
    };
    let out = render(&flat(40), bg, common, &mut seeded_rng(1), |m| {
        blueprint(m, BlueprintParams::default())
    });
    assert!(!uniform(&out, bg));
    assert_ne!(out.get_pixel(20, 5).0, [bg.r, bg.g, bg.b, 255]);
}

#[test]
fn architectural_strokes_snap_to_the_edge_axis() {
    let bg = Style::Architectural.background();
    let precise = ArchitecturalParams {
        architectural_precision: 100.0,
    };
    let out = render(&split(32), bg, no_shading(), &mut ConstantRng(0), |m| {
        architectural(m, precise)
    });
    let expected = [bg.r, bg.g, bg.b, 255];
    // Vertical edge at x = 8: snapped strokes stay within a couple of columns of it.
    let marked = (0..32).any(|y| out.get_pixel(8, y).0 != expected);
    assert!(marked);
    for y in 0..32 {
        for x in 12..32 {
            assert_eq!(out.get_pixel(x, y).0, expected, "({x}, {y})");
        }
    }
}
