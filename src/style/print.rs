//! Printmaking recipes: relief (woodcut), intaglio (etching), planographic (lithograph) and
//! stipple engraving.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::foundation::core::Rgba;
use crate::foundation::error::SketchResult;
use crate::foundation::math::smoothstep;
use crate::style::marks::{Marks, ink};
use crate::style::settings::{
    EtchingParams, LithographParams, StipplingParams, Style, WoodcutParams,
};

const CRAYON: Rgba = Rgba::rgb(30, 30, 30);

pub(crate) fn woodcut(m: &mut Marks<'_>, p: WoodcutParams) -> SketchResult<()> {
    let boldness = p.woodcut_boldness / 100.0;
    let threshold = 100.0 - boldness * 60.0;

    for y in 0..m.height {
        for x in 0..m.width {
            if m.edge(x, y) > threshold {
                m.surface.fill_rect(f64::from(x), f64::from(y), 1.0, 1.0, Rgba::BLACK);
            }
        }
    }

    if m.shading > 0.0 {
        // Gouge texture reads back the carved block.
        m.surface.commit();
        let count = (m.area() / 60.0 * m.shading).round() as usize;
        for _ in 0..count {
            let (x, y) = m.random_point();
            let axis = if m.chance(0.7) { 0.0 } else { FRAC_PI_2 };
            let angle = axis + m.between(-0.15, 0.15);
            let length = m.between(3.0, 12.0);
            let alpha = m.between(0.3, 0.7);
            let [r, g, b, _] = m.surface.pixel(x.floor() as i64, y.floor() as i64);
            let lum = 0.34 * f64::from(r) + 0.5 * f64::from(g) + 0.16 * f64::from(b);
            let color = if lum < 128.0 { Rgba::WHITE } else { Rgba::BLACK };
            m.surface.line(
                (x, y),
                (x + angle.cos() * length, y + angle.sin() * length),
                color.with_alpha(alpha),
                1.0,
            );
        }
    }

    let radius = (boldness * 3.0).round().max(1.0);
    let side = radius * 2.0 + 1.0;
    for y in 0..m.height {
        for x in 0..m.width {
            if m.edge(x, y) > 200.0 {
                let (x, y) = (f64::from(x) - radius, f64::from(y) - radius);
                m.surface.fill_rect(x, y, side, side, Rgba::BLACK);
            }
        }
    }
    Ok(())
}

/// Contiguous span of above-threshold samples along a scan line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Run {
    pub start: usize,
    pub len: usize,
    pub mean: f64,
}

/// Spans of `len` samples where `value(i) > threshold`.
pub(crate) fn runs_above(len: usize, threshold: f64, value: impl Fn(usize) -> f64) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current: Option<(usize, f64)> = None;
    for i in 0..=len {
        let v = if i < len { value(i) } else { f64::NEG_INFINITY };
        if v > threshold {
            if let Some((_, sum)) = current.as_mut() {
                *sum += v;
            } else {
                current = Some((i, v));
            }
        } else if let Some((start, sum)) = current.take() {
            let n = i - start;
            runs.push(Run {
                start,
                len: n,
                mean: sum / n as f64,
            });
        }
    }
    runs
}

pub(crate) fn etching(m: &mut Marks<'_>, p: EtchingParams) -> SketchResult<()> {
    let depth = p.etching_depth / 100.0;
    let width = 0.5 + depth * 0.7;
    let (w, h) = (m.width as usize, m.height as usize);

    for y in 0..m.height {
        let runs = runs_above(w, 70.0, |x| m.edge(x as u32, y));
        for run in runs.into_iter().filter(|r| r.len > 2) {
            let row = f64::from(y) + 0.5 + m.between(-0.3, 0.3);
            let alpha = run.mean / 255.0 * m.line;
            let (x0, x1) = (run.start as f64, (run.start + run.len) as f64);
            m.surface.line((x0, row), (x1, row), ink(alpha), width);
        }
    }

    for x in (0..m.width).step_by(2) {
        let runs = runs_above(h, 120.0, |y| m.edge(x, y as u32));
        for run in runs.into_iter().filter(|r| r.len > 2) {
            let col = f64::from(x) + 0.5;
            let alpha = run.mean / 255.0 * m.line * 0.8;
            let (y0, y1) = (run.start as f64, (run.start + run.len) as f64);
            m.surface.line((col, y0), (col, y1), ink(alpha), width);
        }
    }

    if depth > 0.4 {
        // Skewed scan along x - y = k.
        for k in (-(h as i64 - 1)..w as i64).step_by(3) {
            let t0 = (-k).max(0) as usize;
            let t1 = h.min((w as i64 - k).max(0) as usize);
            if t0 >= t1 {
                continue;
            }
            let runs = runs_above(t1 - t0, 180.0, |i| {
                let t = (t0 + i) as i64;
                f64::from(m.edges.get(t + k, t))
            });
            for run in runs.into_iter().filter(|r| r.len > 2) {
                let a = (t0 + run.start) as f64;
                let b = (t0 + run.start + run.len) as f64;
                let k = k as f64;
                let alpha = run.mean / 255.0 * m.line * 0.7;
                m.surface.line((a + k, a), (b + k, b), ink(alpha), width * 0.8);
            }
        }
    }

    if m.shading > 0.0 {
        // Aquatint tone in the darkest areas.
        let count = (m.area() * m.shading / 50.0).round() as usize;
        for _ in 0..count {
            let (x, y) = m.random_point();
            if m.luma_at(x, y) < 100.0 {
                m.surface.fill_rect(x, y, 1.0, 1.0, ink(0.2));
            }
        }
    }
    Ok(())
}

pub(crate) fn lithograph(m: &mut Marks<'_>, p: LithographParams) -> SketchResult<()> {
    let grain = p.lithograph_grain / 100.0;
    let tone_weight = 0.3 + 0.7 * m.shading;

    let attempts = (m.area() * (0.02 + 0.1 * grain)).round() as usize;
    for _ in 0..attempts {
        let (x, y) = m.random_point();
        let darkness = smoothstep(0.0, 255.0, 255.0 - m.luma_at(x, y));
        if m.chance(darkness * tone_weight) {
            let size = m.between(0.6, 1.4);
            let alpha = m.between(0.3, 0.8);
            m.surface.fill_rect(x, y, size, size, CRAYON.with_alpha(alpha));
        }
    }

    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 40.0 || !m.chance(0.25) {
                continue;
            }
            let length = m.between(1.0, 3.0);
            let angle = m.unit() * PI;
            let alpha = edge * m.line / 255.0 * 0.85;
            let center = (f64::from(x), f64::from(y));
            m.centered_stroke(center, angle, length, CRAYON.with_alpha(alpha), 1.2);
        }
    }

    // The stone's grain breaks up the crayon lines.
    let stone = Style::Lithograph.background();
    let breakup = (m.area() * grain / 200.0).round() as usize;
    for _ in 0..breakup {
        let (x, y) = m.random_point();
        if m.edge_at(x, y) > 40.0 {
            let speck = stone.with_alpha(0.6);
            m.surface.fill_rect(x.floor(), y.floor(), 1.0, 1.0, speck);
        }
    }
    Ok(())
}

/// Grid pitch of the stipple sampler.
const STIPPLE_CELL: usize = 3;

pub(crate) fn stippling(m: &mut Marks<'_>, p: StipplingParams) -> SketchResult<()> {
    let density = p.stippling_density / 50.0;
    let dot = ink(0.3 + 0.7 * m.line);

    for y in (0..m.height).step_by(STIPPLE_CELL) {
        for x in (0..m.width).step_by(STIPPLE_CELL) {
            let edge = m.edge(x, y);
            if edge > 0.0 && m.chance(edge / 255.0 * density) {
                m.surface.fill_rect(f64::from(x), f64::from(y), 1.0, 1.0, dot);
            }
        }
    }

    if m.shading > 0.0 {
        for y in (0..m.height).step_by(5) {
            for x in (0..m.width).step_by(5) {
                let (fx, fy) = (f64::from(x), f64::from(y));
                let darkness = (255.0 - m.luma_at(fx, fy)) / 255.0;
                if darkness > 0.0 && m.chance(darkness * m.shading * 0.5) {
                    m.surface.fill_rect(fx + 1.0, fy + 1.0, 1.0, 1.0, ink(0.6));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/style/print.rs"]
mod tests;
