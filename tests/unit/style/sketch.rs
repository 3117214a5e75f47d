use super::*;
use crate::edges::{Luminance, detect_edges};
use crate::foundation::core::Bitmap;
use crate::foundation::rng::{ConstantRng, seeded_rng};
use crate::raster::Surface;
use crate::style::settings::CommonParams;
use rand::RngCore;

fn flat(size: u32) -> Bitmap {
    Bitmap::from_pixel(size, size, image::Rgba([255, 255, 255, 255]))
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
    common: CommonParams,
    rng: &mut dyn RngCore,
    draw: impl FnOnce(&mut Marks<'_>) -> SketchResult<()>,
) -> Bitmap {
    let edges = detect_edges(bmp, common.sensitivity());
    let luma = Luminance::from_bitmap(bmp);
    let mut surface = Surface::new(bmp.width(), bmp.height()).unwrap();
    surface.fill(Rgba::WHITE);
    {
        let mut m = Marks::new(&mut surface, &edges, &luma, common, rng);
        draw(&mut m).unwrap();
    }
    surface.into_bitmap()
}

fn all_white(bmp: &Bitmap) -> bool {
    bmp.pixels().all(|p| p.0 == [255, 255, 255, 255])
}

#[test]
fn pencil_on_flat_image_without_shading_is_blank() {
    let out = render(&flat(16), no_shading(), &mut seeded_rng(3), |m| {
        pencil(m, PencilParams::default())
    });
    assert!(all_white(&out));
}

#[test]
fn pencil_strokes_follow_the_edge() {
    // The constant source makes every stroke a unit segment pointing right.
    let out = render(&split(16), no_shading(), &mut ConstantRng(0), |m| {
        pencil(m, PencilParams::default())
    });
    assert!(out.get_pixel(4, 8).0[0] < 250);
    assert_eq!(out.get_pixel(12, 8).0, [255, 255, 255, 255]);
}

#[test]
fn pencil_shading_adds_grain_to_flat_paper() {
    let common = CommonParams {
        shading: 100.0,
        ..CommonParams::default()
    };
    let out = render(&flat(32), common, &mut seeded_rng(11), |m| {
        pencil(m, PencilParams { pencil_hardness: 1.0 })
    });
    assert!(!all_white(&out));
}

#[test]
fn charcoal_and_detailed_leave_flat_paper_blank() {
    let out = render(&flat(16), no_shading(), &mut seeded_rng(5), |m| {
        charcoal(m, CharcoalParams::default())
    });
    assert!(all_white(&out));
    let out = render(&flat(16), no_shading(), &mut seeded_rng(5), |m| {
        detailed(m, DetailedParams::default())
    });
    assert!(all_white(&out));
}

#[test]
fn detailed_hatches_strong_edges() {
    let common = CommonParams {
        line_strength: 100.0,
        ..no_shading()
    };
    let out = render(&split(16), common, &mut ConstantRng(0), |m| {
        detailed(m, DetailedParams { detailed_density: 100.0 })
    });
    let touched = (1..15).any(|y| out.get_pixel(4, y).0[0] < 255);
    assert!(touched);
    assert_eq!(out.get_pixel(13, 8).0, [255, 255, 255, 255]);
}

#[test]
fn crosshatch_stays_near_edges() {
    let out = render(&split(16), no_shading(), &mut ConstantRng(0), |m| {
        crosshatch(m, CrosshatchParams::default())
    });
    let near = (0..16).any(|y| (3..9).any(|x| out.get_pixel(x, y).0[0] < 255));
    assert!(near);
    for y in 0..16 {
        assert_eq!(out.get_pixel(14, y).0, [255, 255, 255, 255], "row {y}");
    }
}
