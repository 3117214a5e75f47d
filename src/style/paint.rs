//! Wet and dry media: ink wash, conte crayon, dry brush and gestural brush sweeps.

use std::f64::consts::PI;

use vello_cpu::kurbo::BezPath;

use crate::foundation::core::Rgba;
use crate::foundation::error::SketchResult;
use crate::style::marks::{Marks, ink};
use crate::style::settings::{ConteParams, DrybrushParams, GestureParams, InkParams};

const INK: Rgba = Rgba::rgb(20, 20, 30);
const CONTE: Rgba = Rgba::rgb(94, 38, 18);
const PAPER_FIBRE: Rgba = Rgba::rgb(120, 90, 60);

/// Dry-brush strokes are split into this many segments, each of which a bristle may skip.
const SEGMENTS: usize = 4;

pub(crate) fn ink_wash(m: &mut Marks<'_>, p: InkParams) -> SketchResult<()> {
    let texture = p.ink_texture / 100.0;
    let line = m.line;

    // Wash: broad low-opacity marks, blurred as one layer.
    let mut wash = Vec::new();
    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 40.0 || !m.chance(0.15) {
                continue;
            }
            let angle = m.unit() * PI;
            let length = m.between(3.0, 8.0);
            let width = m.between(2.0, 5.0);
            wash.push((
                (f64::from(x), f64::from(y)),
                angle,
                length,
                width,
                edge * line / 255.0 * 0.3,
            ));
        }
    }
    m.surface.blurred_layer(1.0 + texture * 4.0, |layer| {
        for &((x, y), angle, length, width, alpha) in &wash {
            let (dx, dy) = (angle.cos() * length / 2.0, angle.sin() * length / 2.0);
            layer.line((x - dx, y - dy), (x + dx, y + dy), INK.with_alpha(alpha), width);
        }
    })?;

    // Definition strokes.
    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 60.0 || !m.chance(0.35) {
                continue;
            }
            let angle = m.unit() * PI;
            let length = m.between(1.0, 4.0);
            let width = m.between(0.8, 1.6);
            let alpha = edge * line / 255.0 * 0.9;
            m.centered_stroke(
                (f64::from(x), f64::from(y)),
                angle,
                length,
                INK.with_alpha(alpha),
                width,
            );
        }
    }

    if m.shading > 0.0 {
        let spatter = (50.0 + 250.0 * texture).round() as usize;
        for _ in 0..spatter {
            let (x, y) = m.random_point();
            let radius = 0.3 + m.unit() * 2.0;
            let alpha = m.between(0.1, 0.6) * m.shading;
            m.surface.fill_circle(x, y, radius, INK.with_alpha(alpha));
        }
    }
    Ok(())
}

pub(crate) fn conte(m: &mut Marks<'_>, p: ConteParams) -> SketchResult<()> {
    let softness = p.conte_softness / 100.0;
    let line = m.line;

    if m.shading > 0.0 {
        let grain = (m.area() / 80.0).round() as usize;
        let max_alpha = 0.15 * m.shading;
        m.speckles(grain, 1.0, max_alpha, PAPER_FIBRE);
    }

    let mut strokes = Vec::new();
    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 25.0 || !m.chance(0.35) {
                continue;
            }
            let angle = m.unit() * PI;
            let length = m.between(2.0, 6.0);
            let width = m.between(1.5, 3.0);
            strokes.push((
                (f64::from(x), f64::from(y)),
                angle,
                length,
                width,
                edge * line / 255.0 * 0.8,
            ));
        }
    }
    m.surface.blurred_layer(softness * 3.0, |layer| {
        for &((x, y), angle, length, width, alpha) in &strokes {
            let (dx, dy) = (angle.cos() * length / 2.0, angle.sin() * length / 2.0);
            layer.line((x - dx, y - dy), (x + dx, y + dy), CONTE.with_alpha(alpha), width);
        }
    })?;

    if softness > 0.3 {
        // Smudge: drag already-rendered colour at random edge points.
        let attempts = (400.0 + softness * 600.0).round() as usize;
        let mut smudges = Vec::new();
        for _ in 0..attempts {
            let (x, y) = m.random_point();
            if m.edge_at(x, y) <= 60.0 {
                continue;
            }
            let [r, g, b, _] = m.surface.pixel(x.floor() as i64, y.floor() as i64);
            let angle = m.unit() * PI;
            let length = m.between(3.0, 8.0);
            smudges.push(((x, y), angle, length, Rgba::rgb(r, g, b).with_alpha(0.25)));
        }
        m.surface.blurred_layer(1.5, |layer| {
            for &((x, y), angle, length, color) in &smudges {
                let (dx, dy) = (angle.cos() * length, angle.sin() * length);
                layer.line((x, y), (x + dx, y + dy), color, 2.0);
            }
        })?;
    }
    Ok(())
}

pub(crate) fn drybrush(m: &mut Marks<'_>, p: DrybrushParams) -> SketchResult<()> {
    let bristles = p.drybrush_bristles.round().max(1.0) as usize;
    let brush_width = 1.0 + bristles as f64 * 0.4;

    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 50.0 || !m.chance(0.08) {
                continue;
            }
            let angle = m.tangent_or_random(x, y) + m.between(-0.3, 0.3);
            let length = m.between(6.0, 16.0);
            let (dir_x, dir_y) = (angle.cos(), angle.sin());
            let (norm_x, norm_y) = (-dir_y, dir_x);
            let start_x = f64::from(x) - dir_x * length / 2.0;
            let start_y = f64::from(y) - dir_y * length / 2.0;
            let seg = length / SEGMENTS as f64;

            for b in 0..bristles {
                let offset = if bristles == 1 {
                    0.0
                } else {
                    (b as f64 / (bristles - 1) as f64 - 0.5) * brush_width
                };
                let alpha = edge * m.line / 255.0 * m.between(0.4, 0.9);
                let bx = start_x + norm_x * offset;
                let by = start_y + norm_y * offset;
                for s in 0..SEGMENTS {
                    // Bristles lift off the paper now and then.
                    if !m.chance(0.75) {
                        continue;
                    }
                    let t0 = seg * s as f64;
                    let t1 = t0 + seg;
                    m.surface.line(
                        (bx + dir_x * t0, by + dir_y * t0),
                        (bx + dir_x * t1, by + dir_y * t1),
                        ink(alpha),
                        0.6,
                    );
                }
            }
        }
    }

    if m.shading > 0.0 {
        let attempts = (m.area() / 300.0 * m.shading).round() as usize;
        for _ in 0..attempts {
            let (x, y) = m.random_point();
            if m.luma_at(x, y) >= 120.0 {
                continue;
            }
            for b in 0..3 {
                let by = y + f64::from(b) * 0.8;
                let length = m.between(4.0, 10.0);
                m.surface.line((x, by), (x + length, by), ink(0.1), 0.6);
            }
        }
    }
    Ok(())
}

pub(crate) fn gesture(m: &mut Marks<'_>, p: GestureParams) -> SketchResult<()> {
    let fluidity = p.gesture_fluidity / 100.0;

    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 60.0 || !m.chance(0.03) {
                continue;
            }
            let angle = m.tangent_or_random(x, y);
            let length = m.between(10.0, 30.0);
            let bend = fluidity * m.between(-1.0, 1.0) * length * 0.6;
            let width = m.between(0.6, 1.6);
            let alpha = edge * m.line / 255.0 * 0.7;
            let path = sweep((f64::from(x), f64::from(y)), angle, length, bend, fluidity);
            m.surface.stroke_path(&path, ink(alpha), width);
        }
    }

    if m.shading > 0.0 {
        let attempts = (m.area() / 500.0 * m.shading).round() as usize;
        for _ in 0..attempts {
            let (x, y) = m.random_point();
            if m.luma_at(x, y) >= 100.0 {
                continue;
            }
            let angle = m.unit() * PI;
            let length = m.between(15.0, 40.0);
            let bend = m.between(-1.0, 1.0) * length * 0.4;
            let path = sweep((x, y), angle, length, bend, fluidity);
            m.surface.stroke_path(&path, ink(0.08), 3.0);
        }
    }
    Ok(())
}

/// Cubic sweep of `length` centred on `center` along `angle`, bowed sideways by `bend`.
///
/// Higher `fluidity` gives the second control point an opposite bow, producing an S-curve.
fn sweep(center: (f64, f64), angle: f64, length: f64, bend: f64, fluidity: f64) -> BezPath {
    let (dx, dy) = (angle.cos(), angle.sin());
    let (nx, ny) = (-dy, dx);
    let at = |t: f64, off: f64| {
        (
            center.0 + dx * length * (t - 0.5) + nx * off,
            center.1 + dy * length * (t - 0.5) + ny * off,
        )
    };
    let mut path = BezPath::new();
    path.move_to(at(0.0, 0.0));
    path.curve_to(
        at(1.0 / 3.0, bend),
        at(2.0 / 3.0, bend * (1.0 - 2.0 * fluidity)),
        at(1.0, 0.0),
    );
    path
}

#[cfg(test)]
#[path = "../../tests/unit/style/paint.rs"]
mod tests;
