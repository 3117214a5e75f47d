//! Graphite and charcoal recipes: random short strokes and hatching keyed on edge intensity.

use std::f64::consts::PI;

use crate::foundation::core::Rgba;
use crate::foundation::error::SketchResult;
use crate::style::marks::{Marks, ink};
use crate::style::settings::{CharcoalParams, CrosshatchParams, DetailedParams, PencilParams};

pub(crate) fn pencil(m: &mut Marks<'_>, p: PencilParams) -> SketchResult<()> {
    // 0 at the softest lead, 1 at the hardest.
    let hardness = (p.pencil_hardness - 1.0) / 4.0;
    let stroke_width = 1.6 - hardness;
    let opacity = 1.0 - hardness * 0.4;

    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 30.0 {
                continue;
            }
            let alpha = edge * m.line / 255.0 * opacity;
            if m.chance(0.3) {
                let length = m.between(1.0, 4.0);
                let angle = m.unit() * PI;
                let (x, y) = (f64::from(x), f64::from(y));
                m.surface.line(
                    (x, y),
                    (x + angle.cos() * length, y + angle.sin() * length),
                    ink(alpha),
                    stroke_width,
                );
            }
        }
    }

    if m.shading > 0.0 {
        m.surface.set_global_alpha(m.shading * 0.3);
        let grain = (1000.0 * (6.0 - p.pencil_hardness) / 3.0).round() as usize;
        m.speckles(grain, 2.0, 0.1, Rgba::BLACK);
        m.surface.set_global_alpha(1.0);
    }
    Ok(())
}

pub(crate) fn charcoal(m: &mut Marks<'_>, p: CharcoalParams) -> SketchResult<()> {
    let texture = p.charcoal_texture / 100.0;

    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 20.0 {
                continue;
            }
            let alpha = edge * m.line * 1.5 / 255.0;
            if m.chance(0.4) {
                let length = m.between(2.0, 7.0);
                let angle = m.unit() * PI;
                let width = m.between(1.0, 3.0);
                let (x, y) = (f64::from(x), f64::from(y));
                m.surface.line(
                    (x, y),
                    (x + angle.cos() * length, y + angle.sin() * length),
                    ink(alpha),
                    width,
                );
            }
        }
    }

    if m.shading > 0.0 {
        m.surface.set_global_alpha(m.shading * 0.5);
        let count = (2000.0 * (0.5 + texture)).round() as usize;
        m.speckles(count, 1.0 + 3.0 * texture, 0.2, Rgba::BLACK);
        m.surface.set_global_alpha(1.0);
    }
    Ok(())
}

pub(crate) fn detailed(m: &mut Marks<'_>, p: DetailedParams) -> SketchResult<()> {
    let density = p.detailed_density / 100.0;
    let spacing = (1.0 + (3.0 * (1.0 - density)).floor()).clamp(1.0, 3.0) as u32;
    let long = (3.0 * (1.5 - density)).max(1.0);
    let short = (2.0 * (1.5 - density)).max(1.0);

    for y in (0..m.height).step_by(spacing as usize) {
        for x in (0..m.width).step_by(spacing as usize) {
            let edge = m.edge(x, y);
            if edge <= 25.0 {
                continue;
            }
            let intensity = edge * m.line;
            let alpha = intensity / 255.0;
            let (x, y) = (f64::from(x), f64::from(y));
            if intensity > 150.0 {
                m.hatch(x, y, 45.0, long, alpha);
                m.hatch(x, y, -45.0, long, alpha);
            } else if intensity > 100.0 {
                m.hatch(x, y, 45.0, long, alpha);
            } else if intensity > 50.0 {
                m.hatch(x, y, 0.0, short, alpha);
            }
        }
    }

    if m.shading > 0.0 {
        m.surface.set_global_alpha(m.shading * 0.2);
        for _ in 0..3000 {
            let (x, y) = m.random_point();
            let angle = m.unit() * 180.0;
            let alpha = m.unit() * 0.1;
            m.hatch(x, y, angle, 1.0, alpha);
        }
        m.surface.set_global_alpha(1.0);
    }
    Ok(())
}

/// Grid pitch of the crosshatch sampler.
const CROSSHATCH_CELL: u32 = 4;

pub(crate) fn crosshatch(m: &mut Marks<'_>, p: CrosshatchParams) -> SketchResult<()> {
    let angle = p.crosshatch_angle;
    let density = p.crosshatch_density / 100.0;
    let length = 2.0 + 6.0 * density;
    let half = f64::from(CROSSHATCH_CELL) / 2.0;
    // Tier thresholds and the direction each tier adds.
    let tiers = [
        (40.0, angle),
        (100.0, -angle),
        (160.0, angle + 90.0),
        (220.0, 0.0),
    ];

    for y in (0..m.height).step_by(CROSSHATCH_CELL as usize) {
        for x in (0..m.width).step_by(CROSSHATCH_CELL as usize) {
            let intensity = m.edge(x, y) * m.line;
            if intensity <= tiers[0].0 {
                continue;
            }
            let alpha = (intensity / 255.0).min(1.0);
            let cx = f64::from(x) + half + m.between(-0.5, 0.5);
            let cy = f64::from(y) + half + m.between(-0.5, 0.5);
            for &(threshold, deg) in &tiers {
                if intensity <= threshold {
                    break;
                }
                m.centered_stroke((cx, cy), deg.to_radians(), length, ink(alpha), 0.6);
            }
        }
    }

    if m.shading > 0.0 {
        let step = 6;
        for y in (0..m.height).step_by(step) {
            for x in (0..m.width).step_by(step) {
                let luma = f64::from(m.luma.get(i64::from(x), i64::from(y)));
                if luma >= 128.0 {
                    continue;
                }
                let darkness = (255.0 - luma) / 255.0;
                if m.chance(darkness * m.shading) {
                    let center = (f64::from(x) + 3.0, f64::from(y) + 3.0);
                    m.centered_stroke(center, angle.to_radians(), 6.0, ink(0.15 * m.shading), 0.5);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/style/sketch.rs"]
mod tests;
