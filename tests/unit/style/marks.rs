use super::*;
use crate::edges::detect_edges;
use crate::foundation::core::Bitmap;
use crate::foundation::rng::ConstantRng;

fn split_image() -> Bitmap {
    Bitmap::from_fn(8, 8, |x, _| {
        if x < 4 {
            image::Rgba([0, 0, 0, 255])
        } else {
            image::Rgba([255, 255, 255, 255])
        }
    })
}

#[test]
fn tangent_runs_along_a_vertical_edge() {
    let bmp = split_image();
    let edges = detect_edges(&bmp, 1.0);
    let luma = Luminance::from_bitmap(&bmp);
    let mut surface = Surface::new(8, 8).unwrap();
    let mut rng = ConstantRng(0);
    let m = Marks::new(&mut surface, &edges, &luma, CommonParams::default(), &mut rng);

    let angle = m.tangent(4, 4).unwrap();
    assert!(angle.cos().abs() < 1e-9, "expected vertical, got {angle}");
    assert_eq!(m.tangent(1, 1), None);
}

#[test]
fn common_params_resolve_to_fractions() {
    let bmp = split_image();
    let edges = detect_edges(&bmp, 1.0);
    let luma = Luminance::from_bitmap(&bmp);
    let mut surface = Surface::new(8, 8).unwrap();
    let mut rng = ConstantRng(0);
    let common = CommonParams {
        line_strength: 250.0,
        detail: 50.0,
        shading: 40.0,
    };
    let m = Marks::new(&mut surface, &edges, &luma, common, &mut rng);
    assert_eq!(m.line, 1.0);
    assert_eq!(m.shading, 0.4);
    assert_eq!((m.width, m.height), (8, 8));
    assert_eq!(m.area(), 64.0);
}

#[test]
fn zero_alpha_speckles_leave_surface_untouched() {
    let bmp = split_image();
    let edges = detect_edges(&bmp, 1.0);
    let luma = Luminance::from_bitmap(&bmp);
    let mut surface = Surface::new(8, 8).unwrap();
    surface.fill(Rgba::WHITE);
    let mut rng = ConstantRng(0);
    {
        let mut m = Marks::new(&mut surface, &edges, &luma, CommonParams::default(), &mut rng);
        m.speckles(50, 3.0, 0.0, Rgba::BLACK);
    }
    let out = surface.into_bitmap();
    assert!(out.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}
