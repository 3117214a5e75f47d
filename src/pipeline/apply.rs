use rand::RngCore;

use crate::codec::{decode_image, encode_png};
use crate::edges::{Luminance, detect_edges_from_luma};
use crate::foundation::core::Bitmap;
use crate::foundation::error::SketchResult;
use crate::raster::Surface;
use crate::region::{NonSelectedAreaMode, Selection, composite_selections};
use crate::style::{StyleInput, StyleSettings, render_style};

/// Anything that turns a bitmap into a stylized bitmap.
///
/// The animation sampler takes one of these so callers can swap in a stub.
pub trait SketchRenderer {
    fn render(&self, image: &Bitmap, settings: &StyleSettings, rng: &mut dyn RngCore) -> Bitmap;
}

/// The procedural renderer behind [`apply_style`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Sketcher;

impl SketchRenderer for Sketcher {
    fn render(&self, image: &Bitmap, settings: &StyleSettings, rng: &mut dyn RngCore) -> Bitmap {
        apply_style(image, settings, rng)
    }
}

/// Render `image` in the style described by `settings`.
///
/// Best effort: when no drawing surface can be acquired for the image (zero-sized, or too large
/// for the rasterizer) a warning is logged and a copy of `image` comes back unchanged. Use
/// [`try_apply_style`] to observe the failure instead.
#[tracing::instrument(
    skip(image, settings, rng),
    fields(style = %settings.style(), width = image.width(), height = image.height())
)]
pub fn apply_style(image: &Bitmap, settings: &StyleSettings, rng: &mut dyn RngCore) -> Bitmap {
    match try_apply_style(image, settings, rng) {
        Ok(out) => out,
        Err(err) => {
            tracing::warn!(error = %err, "style rendering failed, returning the source image");
            image.clone()
        }
    }
}

/// Fallible form of [`apply_style`].
pub fn try_apply_style(
    image: &Bitmap,
    settings: &StyleSettings,
    rng: &mut dyn RngCore,
) -> SketchResult<Bitmap> {
    let mut surface = Surface::new(image.width(), image.height())?;
    let luma = Luminance::from_bitmap(image);
    let edges = detect_edges_from_luma(&luma, settings.common.sensitivity());
    tracing::debug!(strong = edges.count_above(128), "edges detected");

    surface.fill(settings.style().background());
    let input = StyleInput {
        edges: &edges,
        luma: &luma,
    };
    render_style(&mut surface, input, settings, rng)?;
    Ok(surface.into_bitmap())
}

/// Render every selection of `image` with its own style and blend.
///
/// See [`composite_selections`] for the merge rules.
pub fn apply_style_with_selections(
    image: &Bitmap,
    selections: &[Selection],
    mode: NonSelectedAreaMode,
    rng: &mut dyn RngCore,
) -> SketchResult<Bitmap> {
    composite_selections(image, selections, mode, rng)
}

/// Decode `bytes`, stylize the whole image and encode the result as PNG.
#[tracing::instrument(skip(bytes, settings, rng), fields(len = bytes.len()))]
pub fn sketch_png(
    bytes: &[u8],
    settings: &StyleSettings,
    rng: &mut dyn RngCore,
) -> SketchResult<Vec<u8>> {
    let image = decode_image(bytes)?;
    let out = apply_style(&image, settings, rng);
    encode_png(&out)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/apply.rs"]
mod tests;
