//! Drafting recipes: contour maps, blueprints and ruled architectural linework.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::foundation::core::Rgba;
use crate::foundation::error::SketchResult;
use crate::style::marks::{Marks, ink};
use crate::style::print::runs_above;
use crate::style::settings::{ArchitecturalParams, BlueprintParams, TopographicParams};

const CONTOUR: Rgba = Rgba::rgb(110, 80, 50);
const CHALK: Rgba = Rgba::WHITE;
const DRAFT_GRID: Rgba = Rgba::rgb(90, 110, 140);

/// Wavelength of the contour wobble, in pixels.
const CONTOUR_WAVELENGTH: f64 = 24.0;

/// Luminance band index of a byte, for `levels` bands.
pub(crate) fn band(luma: u8, levels: u32) -> u32 {
    u32::from(luma) * levels / 256
}

pub(crate) fn topographic(m: &mut Marks<'_>, p: TopographicParams) -> SketchResult<()> {
    let levels = p.topographic_levels.round().clamp(2.0, 255.0) as u32;
    let phase = m.unit() * TAU;
    let amplitude = m.between(0.5, 1.5);
    let w = m.width as usize;

    let level = |x: i64, y: i64| band(m.luma.get(x, y), levels);
    for y in 0..m.height {
        let yy = i64::from(y);
        // A pixel sits on a contour when its band differs from its right or lower neighbour.
        let on_contour = |x: usize| {
            let xx = x as i64;
            let here = level(xx, yy);
            let right = xx + 1 < i64::from(m.width) && level(xx + 1, yy) != here;
            let below = yy + 1 < i64::from(m.height) && level(xx, yy + 1) != here;
            if right || below { 1.0 } else { 0.0 }
        };
        for run in runs_above(w, 0.5, on_contour) {
            let index = level(run.start as i64, yy);
            let strength = (run.start..run.start + run.len)
                .map(|x| f64::from(m.edges.get(x as i64, yy)))
                .sum::<f64>()
                / run.len as f64;
            let alpha = (0.3 + 0.7 * strength / 255.0) * m.line;
            let width = if index % 4 == 0 { 1.2 } else { 0.6 };
            let points: Vec<_> = (run.start..=run.start + run.len)
                .map(|x| {
                    let x = x as f64;
                    let wave = (phase + x * TAU / CONTOUR_WAVELENGTH + f64::from(y) * 0.1).sin();
                    (x, f64::from(y) + 0.5 + amplitude * wave)
                })
                .collect();
            m.surface.polyline(&points, CONTOUR.with_alpha(alpha), width);
        }
    }

    if m.shading > 0.0 {
        // Hachure ticks pointing downhill toward darker ground.
        let attempts = (m.area() / 200.0 * m.shading).round() as usize;
        for _ in 0..attempts {
            let (x, y) = m.random_point();
            let Some(along) = m.tangent(x as u32, y as u32) else {
                continue;
            };
            let downhill = along + FRAC_PI_2;
            let tip = (x + downhill.cos() * 2.5, y + downhill.sin() * 2.5);
            m.surface.line((x, y), tip, CONTOUR.with_alpha(0.3 * m.shading), 0.5);
        }
    }
    Ok(())
}

/// Most strong points used as construction-line anchors.
const MAX_ANCHORS: usize = 400;

pub(crate) fn blueprint(m: &mut Marks<'_>, p: BlueprintParams) -> SketchResult<()> {
    let grid = p.blueprint_grid_size.round().max(1.0);

    if m.shading > 0.0 {
        let faint = CHALK.with_alpha(0.15);
        let (w, h) = (f64::from(m.width), f64::from(m.height));
        let mut x = 0.0;
        while x <= w {
            m.surface.line((x + 0.5, 0.0), (x + 0.5, h), faint, 0.5);
            x += grid;
        }
        let mut y = 0.0;
        while y <= h {
            m.surface.line((0.0, y + 0.5), (w, y + 0.5), faint, 0.5);
            y += grid;
        }
    }

    let mut anchors = Vec::new();
    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge > 40.0 && m.chance(0.5) {
                let angle = m.tangent_or_random(x, y);
                let length = m.between(1.0, 3.0);
                let alpha = edge * m.line / 255.0;
                let center = (f64::from(x), f64::from(y));
                m.centered_stroke(center, angle, length, CHALK.with_alpha(alpha), 0.8);
            }
            if edge > 150.0 && anchors.len() < MAX_ANCHORS && m.chance(0.01) {
                anchors.push((f64::from(x), f64::from(y)));
            }
        }
    }

    // Construction lines between nearby anchors, overshooting both ends.
    let reach = grid * 3.0;
    let color = CHALK.with_alpha(0.35 * m.line);
    for i in 0..anchors.len() {
        for _ in 0..5 {
            let j = m.pick(anchors.len());
            let (a, b) = (anchors[i], anchors[j]);
            let (dx, dy) = (b.0 - a.0, b.1 - a.1);
            let dist = dx.hypot(dy);
            if j == i || dist == 0.0 || dist > reach {
                continue;
            }
            let over = m.between(2.0, 6.0) / dist;
            let from = (a.0 - dx * over, a.1 - dy * over);
            let to = (b.0 + dx * over, b.1 + dy * over);
            m.surface.line(from, to, color, 0.5);
            break;
        }
    }
    Ok(())
}

/// Snap `angle` to the nearest multiple of 90 degrees.
pub(crate) fn snap_right_angle(angle: f64) -> f64 {
    (angle / FRAC_PI_2).round() * FRAC_PI_2
}

/// Pitch of the light construction grid.
const CONSTRUCTION_GRID: u32 = 40;

pub(crate) fn architectural(m: &mut Marks<'_>, p: ArchitecturalParams) -> SketchResult<()> {
    let precision = p.architectural_precision / 100.0;

    if m.shading > 0.0 {
        let color = DRAFT_GRID.with_alpha(0.2 * m.shading);
        let (w, h) = (f64::from(m.width), f64::from(m.height));
        for x in (0..=m.width).step_by(CONSTRUCTION_GRID as usize) {
            let x = f64::from(x) + 0.5;
            m.surface.line((x, 0.0), (x, h), color, 0.5);
        }
        for y in (0..=m.height).step_by(CONSTRUCTION_GRID as usize) {
            let y = f64::from(y) + 0.5;
            m.surface.line((0.0, y), (w, y), color, 0.5);
        }
    }

    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 35.0 || !m.chance(0.3) {
                continue;
            }
            let mut angle = m.tangent_or_random(x, y);
            if m.chance(precision) {
                angle = snap_right_angle(angle);
            }
            angle += m.between(-1.0, 1.0) * (1.0 - precision) * 0.3;
            let length = m.between(3.0, 8.0);
            let alpha = edge * m.line / 255.0;
            m.centered_stroke((f64::from(x), f64::from(y)), angle, length, ink(alpha), 0.7);
        }
    }

    // Drafting overshoot past strong corners.
    let overshoot_chance = 0.02 + 0.08 * precision;
    for y in 0..m.height {
        for x in 0..m.width {
            if m.edge(x, y) <= 200.0 || !m.chance(overshoot_chance) {
                continue;
            }
            let angle = snap_right_angle(m.tangent(x, y).unwrap_or(0.0));
            let length = m.between(10.0, 24.0);
            let color = ink(0.3 * m.line);
            let center = (f64::from(x) + 0.5, f64::from(y) + 0.5);
            m.centered_stroke(center, angle, length, color, 0.4);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/style/technical.rs"]
mod tests;
