use std::f64::consts::FRAC_PI_2;

use rand::RngCore;

use crate::edges::{EdgeMap, Luminance};
use crate::foundation::core::Rgba;
use crate::foundation::rng;
use crate::raster::Surface;
use crate::style::settings::CommonParams;

/// Hairline width used by hatch marks.
pub(crate) const HATCH_WIDTH: f64 = 0.5;

/// Black at the given opacity.
pub(crate) fn ink(alpha: f64) -> Rgba {
    Rgba::BLACK.with_alpha(alpha)
}

/// Everything a style function draws with: the target surface, the read-only analysis grids,
/// the random source and the common parameters resolved to fractions.
pub(crate) struct Marks<'a> {
    pub surface: &'a mut Surface,
    pub edges: &'a EdgeMap,
    pub luma: &'a Luminance,
    rng: &'a mut dyn RngCore,
    /// `lineStrength / 100`.
    pub line: f64,
    /// `shading / 100`.
    pub shading: f64,
    pub width: u32,
    pub height: u32,
}

impl<'a> Marks<'a> {
    pub(crate) fn new(
        surface: &'a mut Surface,
        edges: &'a EdgeMap,
        luma: &'a Luminance,
        common: CommonParams,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        let width = edges.width().min(surface.width());
        let height = edges.height().min(surface.height());
        Self {
            surface,
            edges,
            luma,
            rng,
            line: common.line_fraction(),
            shading: common.shading_fraction(),
            width,
            height,
        }
    }

    pub(crate) fn unit(&mut self) -> f64 {
        rng::unit(self.rng)
    }

    pub(crate) fn between(&mut self, lo: f64, hi: f64) -> f64 {
        rng::between(self.rng, lo, hi)
    }

    pub(crate) fn chance(&mut self, p: f64) -> bool {
        rng::chance(self.rng, p)
    }

    pub(crate) fn pick(&mut self, n: usize) -> usize {
        rng::pick(self.rng, n)
    }

    /// Uniform position anywhere on the canvas.
    pub(crate) fn random_point(&mut self) -> (f64, f64) {
        let x = self.unit() * f64::from(self.width);
        let y = self.unit() * f64::from(self.height);
        (x, y)
    }

    /// Edge intensity at `(x, y)` as a float in `[0, 255]`.
    pub(crate) fn edge(&self, x: u32, y: u32) -> f64 {
        f64::from(self.edges.get(i64::from(x), i64::from(y)))
    }

    /// Edge intensity at a fractional position (nearest pixel).
    pub(crate) fn edge_at(&self, x: f64, y: f64) -> f64 {
        f64::from(self.edges.get(x.floor() as i64, y.floor() as i64))
    }

    /// Luminance at a fractional position (nearest pixel).
    pub(crate) fn luma_at(&self, x: f64, y: f64) -> f64 {
        f64::from(self.luma.get(x.floor() as i64, y.floor() as i64))
    }

    /// Direction running along the edge at `(x, y)`, in radians, from the local luminance
    /// gradient. `None` where the image is flat.
    pub(crate) fn tangent(&self, x: u32, y: u32) -> Option<f64> {
        let (x, y) = (i64::from(x), i64::from(y));
        let gx = f64::from(self.luma.get(x + 1, y)) - f64::from(self.luma.get(x - 1, y));
        let gy = f64::from(self.luma.get(x, y + 1)) - f64::from(self.luma.get(x, y - 1));
        if gx == 0.0 && gy == 0.0 {
            return None;
        }
        Some(gy.atan2(gx) + FRAC_PI_2)
    }

    /// Along-edge direction, or a random one where the image is flat.
    pub(crate) fn tangent_or_random(&mut self, x: u32, y: u32) -> f64 {
        match self.tangent(x, y) {
            Some(angle) => angle,
            None => self.unit() * std::f64::consts::PI,
        }
    }

    /// Short hairline from `(x, y)` at `angle_deg` degrees.
    pub(crate) fn hatch(&mut self, x: f64, y: f64, angle_deg: f64, length: f64, alpha: f64) {
        let r = angle_deg.to_radians();
        self.surface.line(
            (x, y),
            (x + r.cos() * length, y + r.sin() * length),
            ink(alpha),
            HATCH_WIDTH,
        );
    }

    /// Segment of `length` centred on `(cx, cy)` at `angle` radians.
    pub(crate) fn centered_stroke(
        &mut self,
        (cx, cy): (f64, f64),
        angle: f64,
        length: f64,
        color: Rgba,
        width: f64,
    ) {
        let (dx, dy) = (angle.cos() * length / 2.0, angle.sin() * length / 2.0);
        self.surface.line((cx - dx, cy - dy), (cx + dx, cy + dy), color, width);
    }

    /// Scatter `count` small squares of `color` with random size up to `max_size` and random
    /// opacity up to `max_alpha`.
    pub(crate) fn speckles(&mut self, count: usize, max_size: f64, max_alpha: f64, color: Rgba) {
        for _ in 0..count {
            let (x, y) = self.random_point();
            let size = self.unit() * max_size;
            let alpha = self.unit() * max_alpha;
            self.surface.fill_rect(x, y, size, size, color.with_alpha(alpha));
        }
    }

    /// Number of pixels on the canvas.
    pub(crate) fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/marks.rs"]
mod tests;
