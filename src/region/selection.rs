use crate::foundation::core::{PixelBounds, Rect};
use crate::style::StyleSettings;
use crate::style::settings::clamp_param;

/// Largest blend radius, in pixels.
pub const MAX_BLEND_RADIUS: f64 = 50.0;

/// Default blend radius, in pixels.
pub const DEFAULT_BLEND_RADIUS: f64 = 10.0;

/// How a selection's edge transitions into the layer below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Rectangle replaced outright; the radius is ignored.
    Hard,
    /// Radial fade centred on the rectangle.
    #[default]
    Soft,
    /// Linear fade of `radius` px along each edge.
    Gradient,
    /// Inset rectangle blurred by `radius`.
    Feather,
}

/// Blend policy of one selection.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlendSpec {
    pub mode: BlendMode,
    /// Transition width in pixels, `[0, 50]`.
    pub radius: f64,
}

impl Default for BlendSpec {
    fn default() -> Self {
        Self {
            mode: BlendMode::Soft,
            radius: DEFAULT_BLEND_RADIUS,
        }
    }
}

impl BlendSpec {
    pub fn new(mode: BlendMode, radius: f64) -> Self {
        Self { mode, radius }
    }

    pub fn hard() -> Self {
        Self::new(BlendMode::Hard, 0.0)
    }

    /// Radius clamped into `[0, 50]`; non-finite values fall back to the default.
    pub fn clamped_radius(self) -> f64 {
        clamp_param(self.radius, 0.0, MAX_BLEND_RADIUS, DEFAULT_BLEND_RADIUS)
    }

    /// `true` when the selection simply overwrites its rectangle.
    pub fn is_hard(self) -> bool {
        self.mode == BlendMode::Hard || self.clamped_radius() == 0.0
    }
}

/// What the output holds outside every selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonSelectedAreaMode {
    /// The untouched source image.
    #[default]
    Original,
    /// Fully transparent pixels.
    Transparent,
}

/// A rectangle of the image with its own style and blend policy.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub rect: Rect,
    #[serde(default)]
    pub settings: StyleSettings,
    #[serde(default)]
    pub blend: BlendSpec,
}

impl Selection {
    /// Selection with the default soft blend.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rect: Rect,
        settings: StyleSettings,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rect,
            settings,
            blend: BlendSpec::default(),
        }
    }

    pub fn with_blend(mut self, blend: BlendSpec) -> Self {
        self.blend = blend;
        self
    }

    /// Pixels of a `width x height` image covered by this selection, if any.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> Option<PixelBounds> {
        self.rect.to_pixel_bounds(width, height)
    }
}

/// Inner rectangle `(x+r, y+r, w-2r, h-2r)` that stays fully opaque under the selection's blend
/// radius, for drawing a blend preview outline. Sizes never go below zero.
pub fn blend_preview_rect(selection: &Selection) -> Rect {
    let r = selection.rect.normalized();
    let radius = selection.blend.clamped_radius();
    Rect::new(
        r.x + radius,
        r.y + radius,
        (r.width - 2.0 * radius).max(0.0),
        (r.height - 2.0 * radius).max(0.0),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/region/selection.rs"]
mod tests;
