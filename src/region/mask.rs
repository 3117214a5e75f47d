use crate::foundation::core::{PixelBounds, Rect};
use crate::foundation::error::SketchResult;
use crate::foundation::math::clamp_byte;
use crate::raster::blur::{blur_channels, radius_for_sigma};
use crate::region::selection::{BlendMode, BlendSpec};

/// Blend coverage for the pixels of `bounds`, one byte per pixel in row order.
///
/// `rect` is the selection rectangle the mask geometry is measured from; `bounds` is the part
/// of it inside the image. Returns `None` when the blend is hard and the selection replaces its
/// rectangle outright.
pub(crate) fn blend_mask(
    rect: Rect,
    blend: BlendSpec,
    bounds: PixelBounds,
) -> SketchResult<Option<Vec<u8>>> {
    if blend.is_hard() {
        return Ok(None);
    }
    let rect = rect.normalized();
    let radius = blend.clamped_radius();
    let mask = match blend.mode {
        BlendMode::Hard => return Ok(None),
        BlendMode::Soft => sample(bounds, |x, y| soft_coverage(rect, radius, x, y)),
        BlendMode::Gradient => sample(bounds, |x, y| gradient_coverage(rect, radius, x, y)),
        BlendMode::Feather => feather(rect, radius, bounds)?,
    };
    Ok(Some(mask))
}

/// Evaluate `coverage` at every pixel centre of `bounds`.
fn sample(bounds: PixelBounds, coverage: impl Fn(f64, f64) -> f64) -> Vec<u8> {
    let mut out = Vec::with_capacity(bounds.width() as usize * bounds.height() as usize);
    for y in bounds.y0..bounds.y1 {
        for x in bounds.x0..bounds.x1 {
            let c = coverage(f64::from(x) + 0.5, f64::from(y) + 0.5);
            out.push(clamp_byte(c * 255.0));
        }
    }
    out
}

/// Radial fade: opaque inside `min(w, h)/2 - radius`, transparent from `min(w, h)/2` outward.
pub(crate) fn soft_coverage(rect: Rect, radius: f64, x: f64, y: f64) -> f64 {
    let outer = rect.width.min(rect.height) / 2.0;
    let inner = (outer - radius).max(0.0);
    let (cx, cy) = (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    let d = (x - cx).hypot(y - cy);
    if d <= inner {
        1.0
    } else if d >= outer {
        0.0
    } else {
        (outer - d) / (outer - inner)
    }
}

/// Linear fade of `radius` along each side; the interior stays opaque.
pub(crate) fn gradient_coverage(rect: Rect, radius: f64, x: f64, y: f64) -> f64 {
    let fx = (x - rect.x).min(rect.x + rect.width - x) / radius;
    let fy = (y - rect.y).min(rect.y + rect.height - y) / radius;
    fx.min(fy).clamp(0.0, 1.0)
}

/// Opaque inset rectangle blurred with `sigma = radius`, sampled over `bounds`.
fn feather(rect: Rect, radius: f64, bounds: PixelBounds) -> SketchResult<Vec<u8>> {
    // The inset never collapses below a one-pixel core on the centre line.
    let inset = rect.inset(radius);
    let (cx, cy) = (inset.x + inset.width / 2.0, inset.y + inset.height / 2.0);
    let core_w = inset.width.max(1.0);
    let core_h = inset.height.max(1.0);
    let core = Rect::new(cx - core_w / 2.0, cy - core_h / 2.0, core_w, core_h);

    // Pad so the blur sees transparent surroundings rather than clamped edges.
    let pad = i64::from(radius_for_sigma(radius)) + 1;
    let x0 = i64::from(bounds.x0) - pad;
    let y0 = i64::from(bounds.y0) - pad;
    let w = bounds.width() as usize + 2 * pad as usize;
    let h = bounds.height() as usize + 2 * pad as usize;

    let mut fill = vec![0u8; w * h];
    for row in 0..h {
        let py = (y0 + row as i64) as f64 + 0.5;
        for col in 0..w {
            let px = (x0 + col as i64) as f64 + 0.5;
            if core.contains(px, py) && rect.contains(px, py) {
                fill[row * w + col] = 255;
            }
        }
    }
    let blurred = blur_channels(&fill, w as u32, h as u32, 1, radius)?;

    let mut out = Vec::with_capacity(bounds.width() as usize * bounds.height() as usize);
    let p = pad as usize;
    for row in p..p + bounds.height() as usize {
        out.extend_from_slice(&blurred[row * w + p..row * w + p + bounds.width() as usize]);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/region/mask.rs"]
mod tests;
