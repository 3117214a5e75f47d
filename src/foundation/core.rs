use crate::foundation::error::{SketchError, SketchResult};

/// Straight-alpha RGBA8 bitmap exchanged with callers.
pub type Bitmap = image::RgbaImage;

/// Axis-aligned rectangle in image pixel space.
///
/// Coordinates are fractional because they come straight from pointer input. Width and height
/// may be negative while a drag is in progress; [`Rect::normalized`] folds them back.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Return the same area with non-negative width and height.
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Return `true` when `(px, py)` lies inside the (normalized) rectangle, edges included.
    pub fn contains(self, px: f64, py: f64) -> bool {
        let r = self.normalized();
        px >= r.x && px <= r.x + r.width && py >= r.y && py <= r.y + r.height
    }

    /// Shift the rectangle by `(dx, dy)`.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Shrink the rectangle by `amount` on every side. Size never goes below zero.
    pub fn inset(self, amount: f64) -> Self {
        let r = self.normalized();
        let width = (r.width - 2.0 * amount).max(0.0);
        let height = (r.height - 2.0 * amount).max(0.0);
        Self {
            x: r.x + amount.min(r.width / 2.0),
            y: r.y + amount.min(r.height / 2.0),
            width,
            height,
        }
    }

    /// Snap to whole pixels and clip to a `width x height` image.
    ///
    /// Returns `None` when nothing of the rectangle remains inside the image.
    pub fn to_pixel_bounds(self, width: u32, height: u32) -> Option<PixelBounds> {
        let r = self.normalized();
        if !(r.x.is_finite() && r.y.is_finite() && r.width.is_finite() && r.height.is_finite()) {
            return None;
        }
        let clamp_x = |v: f64| v.clamp(0.0, f64::from(width)) as u32;
        let clamp_y = |v: f64| v.clamp(0.0, f64::from(height)) as u32;
        let bounds = PixelBounds {
            x0: clamp_x(r.x.floor()),
            y0: clamp_y(r.y.floor()),
            x1: clamp_x((r.x + r.width).ceil()),
            y1: clamp_y((r.y + r.height).ceil()),
        };
        if bounds.is_empty() { None } else { Some(bounds) }
    }
}

/// Half-open integer pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelBounds {
    /// Inclusive left column.
    pub x0: u32,
    /// Inclusive top row.
    pub y0: u32,
    /// Exclusive right column.
    pub x1: u32,
    /// Exclusive bottom row.
    pub y1: u32,
}

impl PixelBounds {
    /// Bounds covering a whole `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
        }
    }

    /// Create validated bounds with `x0 <= x1` and `y0 <= y1`.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> SketchResult<Self> {
        if x0 > x1 || y0 > y1 {
            return Err(SketchError::validation("PixelBounds min must be <= max"));
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    /// Number of columns.
    pub fn width(self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Number of rows.
    pub fn height(self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Return `true` when the bounds cover no pixel.
    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Return `true` when pixel `(x, y)` is inside the bounds.
    pub fn contains(self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Straight-alpha paint colour with a fractional alpha, as in `rgba(r, g, b, a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f64,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour with a new opacity, clamped to `[0, 1]`. NaN becomes transparent.
    pub fn with_alpha(self, a: f64) -> Self {
        let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
        Self { a, ..self }
    }

    /// Alpha quantized to a byte.
    pub fn alpha_u8(self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Premultiplied RGBA8 representation.
    pub fn to_premul(self) -> [u8; 4] {
        crate::foundation::math::premultiply([self.r, self.g, self.b, self.alpha_u8()])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
