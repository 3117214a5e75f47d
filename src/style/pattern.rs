//! Pattern-based recipes: random-walk scribbles, geometric primitives per cell, zentangle
//! micro-patterns and a displaced wireframe mesh.

use std::f64::consts::{PI, TAU};

use vello_cpu::kurbo::BezPath;

use crate::foundation::error::SketchResult;
use crate::style::marks::{Marks, ink};
use crate::style::settings::{GeometricParams, ScribbleParams, WireframeParams, ZentangleParams};

pub(crate) fn scribble(m: &mut Marks<'_>, p: ScribbleParams) -> SketchResult<()> {
    let chaos = p.scribble_chaos / 100.0;
    let seed_chance = 0.02 + 0.04 * chaos;
    let steps = 4 + (12.0 * chaos).round() as usize;
    let wiggle = 0.4 + 1.6 * chaos;

    for y in 0..m.height {
        for x in 0..m.width {
            let edge = m.edge(x, y);
            if edge <= 100.0 || !m.chance(seed_chance) {
                continue;
            }
            let heading = m.tangent_or_random(x, y);
            let points = walk(m, (f64::from(x), f64::from(y)), heading, steps, wiggle);
            let alpha = edge * m.line / 255.0 * 0.8;
            m.surface.polyline(&points, ink(alpha), 0.7);
        }
    }

    if m.shading > 0.0 {
        let attempts = (m.area() / 400.0 * m.shading).round() as usize;
        for _ in 0..attempts {
            let start = m.random_point();
            if m.luma_at(start.0, start.1) >= 110.0 {
                continue;
            }
            let heading = m.unit() * TAU;
            let points = walk(m, start, heading, steps, wiggle);
            m.surface.polyline(&points, ink(0.15), 0.7);
        }
    }
    Ok(())
}

/// Random walk of `steps` segments from `start`, turning by up to `wiggle` radians per step.
fn walk(
    m: &mut Marks<'_>,
    start: (f64, f64),
    mut heading: f64,
    steps: usize,
    wiggle: f64,
) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(steps + 1);
    let (mut x, mut y) = start;
    points.push(start);
    for _ in 0..steps {
        heading += m.between(-1.0, 1.0) * wiggle;
        let step = m.between(1.5, 3.0);
        x += heading.cos() * step;
        y += heading.sin() * step;
        points.push((x, y));
    }
    points
}

/// Closed regular polygon with `sides` vertices on a circle of `radius`.
fn polygon(center: (f64, f64), radius: f64, sides: usize, rotation: f64) -> BezPath {
    let mut path = BezPath::new();
    for i in 0..sides {
        let a = rotation + TAU * i as f64 / sides as f64;
        let pt = (center.0 + a.cos() * radius, center.1 + a.sin() * radius);
        if i == 0 {
            path.move_to(pt);
        } else {
            path.line_to(pt);
        }
    }
    path.close_path();
    path
}

/// Darken a cell in proportion to how dark the source is there.
fn tone_cell(m: &mut Marks<'_>, (x, y): (u32, u32), cell: u32, strength: f64) {
    let tone = 1.0 - m.luma.cell_mean(x, y, cell, cell) / 255.0;
    if tone > 0.0 {
        let side = f64::from(cell);
        m.surface.fill_rect(f64::from(x), f64::from(y), side, side, ink(tone * strength));
    }
}

pub(crate) fn geometric(m: &mut Marks<'_>, p: GeometricParams) -> SketchResult<()> {
    let cell = p.geometric_cell_size.round().max(1.0) as u32;
    let half = f64::from(cell) / 2.0;
    let tone = m.shading * 0.25;

    for cy in (0..m.height).step_by(cell as usize) {
        for cx in (0..m.width).step_by(cell as usize) {
            if m.shading > 0.0 {
                tone_cell(m, (cx, cy), cell, tone);
            }
            let mean = m.edges.cell_mean(cx, cy, cell, cell);
            if mean <= 8.0 {
                continue;
            }
            let density = mean / 255.0;
            let size = f64::from(cell) * (0.3 + 0.7 * density);
            let color = ink((3.0 * density).min(1.0) * m.line);
            let width = 0.5 + 1.5 * density;
            let center = (f64::from(cx) + half, f64::from(cy) + half);
            let rotation = m.unit() * PI;
            match m.pick(3) {
                0 => {
                    let square = polygon(center, size / 2.0, 4, rotation);
                    m.surface.stroke_path(&square, color, width);
                }
                1 => m.surface.stroke_circle(center.0, center.1, size / 2.0, color, width),
                _ => {
                    let triangle = polygon(center, size / 2.0, 3, rotation);
                    m.surface.stroke_path(&triangle, color, width);
                }
            }
        }
    }
    Ok(())
}

/// Side of a zentangle tile.
const TANGLE_CELL: u32 = 20;

pub(crate) fn zentangle(m: &mut Marks<'_>, p: ZentangleParams) -> SketchResult<()> {
    let reps = 2 + p.zentangle_complexity.round().max(1.0) as usize;
    let size = f64::from(TANGLE_CELL);
    let half = size / 2.0;
    let tone = m.shading * 0.2;

    for cy in (0..m.height).step_by(TANGLE_CELL as usize) {
        for cx in (0..m.width).step_by(TANGLE_CELL as usize) {
            if m.shading > 0.0 {
                tone_cell(m, (cx, cy), TANGLE_CELL, tone);
            }
            let mean = m.edges.cell_mean(cx, cy, TANGLE_CELL, TANGLE_CELL);
            if mean <= 20.0 {
                continue;
            }
            let color = ink((0.4 + 0.6 * mean / 255.0) * m.line);
            let (x0, y0) = (f64::from(cx), f64::from(cy));
            let (ox, oy) = (x0 + half, y0 + half);

            match m.pick(5) {
                // Concentric circles.
                0 => {
                    for i in 1..=reps {
                        let r = half * i as f64 / reps as f64;
                        m.surface.stroke_circle(ox, oy, r, color, 0.5);
                    }
                }
                // Parallel lines.
                1 => {
                    let horizontal = m.chance(0.5);
                    for i in 1..=reps {
                        let t = size * i as f64 / (reps + 1) as f64;
                        let (from, to) = if horizontal {
                            ((x0, y0 + t), (x0 + size, y0 + t))
                        } else {
                            ((x0 + t, y0), (x0 + t, y0 + size))
                        };
                        m.surface.line(from, to, color, 0.5);
                    }
                }
                // Radial spokes.
                2 => {
                    let rotation = m.unit() * PI;
                    let spokes = reps * 2;
                    for i in 0..spokes {
                        let a = rotation + TAU * i as f64 / spokes as f64;
                        let tip = (ox + a.cos() * half, oy + a.sin() * half);
                        m.surface.line((ox, oy), tip, color, 0.5);
                    }
                }
                // Checker dots.
                3 => {
                    let step = size / reps as f64;
                    for j in 0..reps {
                        for i in (0..reps).filter(|i| (i + j) % 2 == 0) {
                            let dx = x0 + (i as f64 + 0.5) * step;
                            let dy = y0 + (j as f64 + 0.5) * step;
                            m.surface.fill_circle(dx, dy, step * 0.3, color);
                        }
                    }
                }
                // Spiral.
                _ => {
                    let rotation = m.unit() * TAU;
                    let samples = reps * 16;
                    let turns = reps as f64 / 2.0;
                    let points: Vec<_> = (0..=samples)
                        .map(|k| {
                            let t = k as f64 / samples as f64;
                            let a = rotation + t * turns * TAU;
                            (ox + a.cos() * half * t, oy + a.sin() * half * t)
                        })
                        .collect();
                    m.surface.polyline(&points, color, 0.5);
                }
            }
        }
    }
    Ok(())
}

/// Mesh vertex after displacement, with the edge strength that pulled it.
#[derive(Clone, Copy, Debug)]
struct Vertex {
    x: f64,
    y: f64,
    strength: f64,
}

/// Grid pitch for a density in `[1, 100]`: 40 px at the sparsest, 8 px at the densest.
pub(crate) fn wireframe_spacing(density: f64) -> u32 {
    (40.0 - 32.0 * (density - 1.0) / 99.0).round().max(2.0) as u32
}

pub(crate) fn wireframe(m: &mut Marks<'_>, p: WireframeParams) -> SketchResult<()> {
    let spacing = wireframe_spacing(p.wireframe_density);
    let cols = (m.width / spacing + 1) as usize;
    let rows = (m.height / spacing + 1) as usize;

    if m.shading > 0.0 {
        // Undisplaced mesh underneath.
        let faint = ink(0.06 * m.shading);
        let (w, h) = (f64::from(m.width), f64::from(m.height));
        for i in 0..cols {
            let x = (i as u32 * spacing) as f64;
            m.surface.line((x, 0.0), (x, h), faint, 0.4);
        }
        for j in 0..rows {
            let y = (j as u32 * spacing) as f64;
            m.surface.line((0.0, y), (w, y), faint, 0.4);
        }
    }

    let reach = (spacing / 2) as i64;
    let mut mesh = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        for i in 0..cols {
            let (gx, gy) = ((i as u32 * spacing) as i64, (j as u32 * spacing) as i64);
            // Strongest edge within half a cell pulls the vertex toward it.
            let mut best = (0u8, gx, gy);
            for y in gy - reach..=gy + reach {
                for x in gx - reach..=gx + reach {
                    let e = m.edges.get(x, y);
                    if e > best.0 {
                        best = (e, x, y);
                    }
                }
            }
            let strength = f64::from(best.0) / 255.0;
            let jitter = (m.between(-0.5, 0.5), m.between(-0.5, 0.5));
            mesh.push(Vertex {
                x: gx as f64 + (best.1 - gx) as f64 * strength + jitter.0,
                y: gy as f64 + (best.2 - gy) as f64 * strength + jitter.1,
                strength,
            });
        }
    }

    let at = |i: usize, j: usize| mesh[j * cols + i];
    for j in 0..rows {
        for i in 0..cols {
            let v = at(i, j);
            if i + 1 < cols {
                segment(m, v, at(i + 1, j));
            }
            if j + 1 < rows {
                segment(m, v, at(i, j + 1));
            }
            if i + 1 < cols && j + 1 < rows && m.chance(0.3) {
                let (a, b) = if m.chance(0.5) {
                    (v, at(i + 1, j + 1))
                } else {
                    (at(i + 1, j), at(i, j + 1))
                };
                segment(m, a, b);
            }
        }
    }
    Ok(())
}

fn segment(m: &mut Marks<'_>, a: Vertex, b: Vertex) {
    let strength = (a.strength + b.strength) / 2.0;
    if strength > 0.02 {
        m.surface.line((a.x, a.y), (b.x, b.y), ink(strength * m.line), 0.6);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/pattern.rs"]
mod tests;
