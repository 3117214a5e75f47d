use vello_cpu::kurbo::{self, BezPath, Cap, Shape, Stroke};
use vello_cpu::peniko::Color;

use crate::foundation::core::{Bitmap, PixelBounds, Rgba};
use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::unpremultiply;
use crate::raster::blur::blur_channels;
use crate::raster::composite::over;

const CURVE_TOLERANCE: f64 = 0.1;

/// Drawing surface: an accumulated premultiplied RGBA8 canvas plus a batch of pending vector
/// marks.
///
/// Marks are queued on a `vello_cpu` render context and composited onto the canvas on
/// [`Surface::commit`]. Pixel reads only see committed marks.
pub struct Surface {
    width: u16,
    height: u16,
    canvas: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
    pending: bool,
    global_alpha: f64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pending", &self.pending)
            .field("global_alpha", &self.global_alpha)
            .finish()
    }
}

impl Surface {
    /// Transparent surface of `width x height` pixels.
    ///
    /// Fails with [`SketchError::Surface`] when either side is zero or exceeds the rasterizer's
    /// `u16` limit.
    pub fn new(width: u32, height: u32) -> SketchResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| SketchError::surface("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| SketchError::surface("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(SketchError::surface(format!(
                "surface must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            width: width_u16,
            height: height_u16,
            canvas: vello_cpu::Pixmap::new(width_u16, height_u16),
            scratch: vello_cpu::Pixmap::new(width_u16, height_u16),
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            pending: false,
            global_alpha: 1.0,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Opacity multiplier applied to every subsequent mark, clamped to `[0, 1]`.
    pub fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
    }

    /// Composite a flat colour over the whole canvas.
    pub fn fill(&mut self, color: Rgba) {
        self.commit();
        let src = color.with_alpha(color.a * self.global_alpha).to_premul();
        if src[3] == 0 {
            return;
        }
        for px in self.canvas.data_as_u8_slice_mut().chunks_exact_mut(4) {
            let dst = [px[0], px[1], px[2], px[3]];
            px.copy_from_slice(&over(dst, src));
        }
    }

    /// Stroke the segment `from -> to`.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke_path(&path, color, width);
    }

    /// Stroke an open polyline through `points`.
    pub fn polyline(&mut self, points: &[(f64, f64)], color: Rgba, width: f64) {
        let Some((&first, rest)) = points.split_first() else {
            return;
        };
        let mut path = BezPath::new();
        path.move_to(first);
        for &p in rest {
            path.line_to(p);
        }
        self.stroke_path(&path, color, width);
    }

    pub fn stroke_path(&mut self, path: &BezPath, color: Rgba, width: f64) {
        if !width.is_finite() || width <= 0.0 || !path.is_finite() {
            return;
        }
        let Some(paint) = self.paint(color) else {
            return;
        };
        self.ctx.set_paint(paint);
        self.ctx.set_stroke(Stroke::new(width).with_caps(Cap::Butt));
        self.ctx.stroke_path(path);
        self.pending = true;
    }

    pub fn fill_path(&mut self, path: &BezPath, color: Rgba) {
        if !path.is_finite() {
            return;
        }
        let Some(paint) = self.paint(color) else {
            return;
        };
        self.ctx.set_paint(paint);
        self.ctx.fill_path(path);
        self.pending = true;
    }

    /// Fill an axis-aligned rectangle given by origin and size.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        let finite = [x, y, width, height].iter().all(|v| v.is_finite());
        if !finite || width <= 0.0 || height <= 0.0 {
            return;
        }
        let Some(paint) = self.paint(color) else {
            return;
        };
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&kurbo::Rect::new(x, y, x + width, y + height));
        self.pending = true;
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let path = kurbo::Circle::new((cx, cy), radius).to_path(CURVE_TOLERANCE);
        self.fill_path(&path, color);
    }

    pub fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba, width: f64) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let path = kurbo::Circle::new((cx, cy), radius).to_path(CURVE_TOLERANCE);
        self.stroke_path(&path, color, width);
    }

    /// Draw marks into a transparent child layer, gaussian-blur it with `sigma`, then composite
    /// it over this surface.
    ///
    /// The child covers the whole surface and inherits the global alpha.
    pub fn blurred_layer(
        &mut self,
        sigma: f64,
        draw: impl FnOnce(&mut Surface),
    ) -> SketchResult<()> {
        self.commit();
        let mut layer = Surface::new(self.width(), self.height())?;
        layer.global_alpha = self.global_alpha;
        draw(&mut layer);
        layer.commit();
        if layer.canvas.data_as_u8_slice().chunks_exact(4).all(|px| px[3] == 0) {
            return Ok(());
        }

        let blurred = blur_channels(
            layer.canvas.data_as_u8_slice(),
            layer.width(),
            layer.height(),
            4,
            sigma,
        )?;
        over_all(self.canvas.data_as_u8_slice_mut(), &blurred);
        Ok(())
    }

    /// Rasterize pending marks and composite them onto the canvas.
    pub fn commit(&mut self) {
        if !self.pending {
            return;
        }
        self.ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.scratch);
        self.ctx.reset();
        self.pending = false;

        over_all(
            self.canvas.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
        );
    }

    /// Straight-alpha pixel at `(x, y)` from the committed canvas. Out of range reads are
    /// transparent.
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * usize::from(self.width) + (x as usize)) * 4;
        let d = self.canvas.data_as_u8_slice();
        unpremultiply([d[idx], d[idx + 1], d[idx + 2], d[idx + 3]])
    }

    /// Premultiplied RGBA8 bytes of `bounds`, row by row. Pending marks are committed first.
    pub fn crop_premul(&mut self, bounds: PixelBounds) -> Vec<u8> {
        self.commit();
        let w = usize::from(self.width);
        let x1 = bounds.x1.min(self.width()) as usize;
        let y1 = bounds.y1.min(self.height()) as usize;
        let x0 = (bounds.x0 as usize).min(x1);
        let y0 = (bounds.y0 as usize).min(y1);
        let data = self.canvas.data_as_u8_slice();
        let mut out = Vec::with_capacity((x1 - x0) * (y1 - y0) * 4);
        for y in y0..y1 {
            out.extend_from_slice(&data[(y * w + x0) * 4..(y * w + x1) * 4]);
        }
        out
    }

    /// Commit and convert the canvas into a straight-alpha bitmap.
    pub fn into_bitmap(mut self) -> Bitmap {
        self.commit();
        let mut bitmap = Bitmap::new(self.width(), self.height());
        for (dst, src) in bitmap
            .pixels_mut()
            .zip(self.canvas.data_as_u8_slice().chunks_exact(4))
        {
            dst.0 = unpremultiply([src[0], src[1], src[2], src[3]]);
        }
        bitmap
    }

    fn paint(&self, color: Rgba) -> Option<Color> {
        let a = color.with_alpha(color.a * self.global_alpha).alpha_u8();
        (a > 0).then(|| Color::from_rgba8(color.r, color.g, color.b, a))
    }
}

/// Source-over of a same-size premultiplied buffer onto `dst`, skipping empty source pixels.
fn over_all(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
