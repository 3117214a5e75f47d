use super::*;
use crate::edges::{Luminance, detect_edges};
use crate::foundation::core::{Bitmap, Rgba};
use crate::foundation::rng::{ConstantRng, seeded_rng};
use crate::raster::Surface;
use crate::style::settings::CommonParams;
use rand::RngCore;
use vello_cpu::kurbo::{PathEl, Point};

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

fn white_from_column(bmp: &Bitmap, x0: u32) -> bool {
    (0..bmp.height()).all(|y| (x0..bmp.width()).all(|x| bmp.get_pixel(x, y).0 == [255; 4]))
}

#[test]
fn pattern_styles_leave_flat_paper_blank() {
    let bmp = flat(40);
    let out = render(&bmp, no_shading(), &mut seeded_rng(4), |m| {
        scribble(m, ScribbleParams::default())
    });
    assert!(all_white(&out));
    let out = render(&bmp, no_shading(), &mut seeded_rng(4), |m| {
        geometric(m, GeometricParams::default())
    });
    assert!(all_white(&out));
    let out = render(&bmp, no_shading(), &mut seeded_rng(4), |m| {
        zentangle(m, ZentangleParams::default())
    });
    assert!(all_white(&out));
    let out = render(&bmp, no_shading(), &mut seeded_rng(4), |m| {
        wireframe(m, WireframeParams::default())
    });
    assert!(all_white(&out));
}

#[test]
fn scribble_walks_start_at_edges() {
    let out = render(&split(32), no_shading(), &mut ConstantRng(0), |m| {
        scribble(m, ScribbleParams::default())
    });
    assert!(!all_white(&out));
}

#[test]
fn geometric_marks_only_busy_cells() {
    let out = render(&split(24), no_shading(), &mut ConstantRng(0), |m| {
        geometric(m, GeometricParams::default())
    });
    let marked = (0..12).any(|y| (0..12).any(|x| out.get_pixel(x, y).0[0] < 255));
    assert!(marked);
    assert!(white_from_column(&out, 12));
}

#[test]
fn zentangle_fills_tiles_crossed_by_edges() {
    let out = render(&split(40), no_shading(), &mut ConstantRng(0), |m| {
        zentangle(m, ZentangleParams::default())
    });
    let marked = (0..20).any(|y| (0..20).any(|x| out.get_pixel(x, y).0[0] < 255));
    assert!(marked);
    assert!(white_from_column(&out, 22));
}

#[test]
fn wireframe_spacing_spans_forty_to_eight_pixels() {
    assert_eq!(wireframe_spacing(1.0), 40);
    assert_eq!(wireframe_spacing(100.0), 8);
    assert_eq!(wireframe_spacing(50.5), 24);
}

#[test]
fn wireframe_mesh_bends_toward_edges_and_fades_elsewhere() {
    let dense = WireframeParams {
        wireframe_density: 100.0,
    };
    let out = render(&split(48), no_shading(), &mut ConstantRng(0), |m| wireframe(m, dense));
    let marked = (0..48).any(|y| (8..17).any(|x| out.get_pixel(x, y).0[0] < 255));
    assert!(marked);
    assert!(white_from_column(&out, 30));
}

#[test]
fn polygon_is_closed_with_one_vertex_per_side() {
    let square = polygon((0.0, 0.0), 1.0, 4, 0.0);
    let elements = square.elements();
    assert_eq!(elements.len(), 5);
    assert_eq!(elements[0], PathEl::MoveTo(Point::new(1.0, 0.0)));
    assert_eq!(elements[4], PathEl::ClosePath);
}
