use std::collections::HashMap;

use rand::RngCore;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::edges::{EdgeMap, Luminance, detect_edges_from_luma};
use crate::foundation::core::{Bitmap, PixelBounds};
use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::{premultiply, unpremultiply};
use crate::foundation::rng::fork_rng;
use crate::raster::Surface;
use crate::raster::composite::{mask_in_place, over_in_place};
use crate::region::mask::blend_mask;
use crate::region::selection::{NonSelectedAreaMode, Selection};
use crate::style::{StyleInput, render_style};

/// One selection ready to render: its clipped bounds and its own random source.
struct RegionJob<'a> {
    selection: &'a Selection,
    bounds: PixelBounds,
    rng: StdRng,
}

/// Premultiplied pixels of one rendered selection, restricted to its bounds.
struct RegionLayer<'a> {
    selection: &'a Selection,
    bounds: PixelBounds,
    pixels: Vec<u8>,
}

/// Render every selection with its own style and merge them over `base`.
///
/// The output starts as `base` ([`NonSelectedAreaMode::Original`]) or fully transparent
/// ([`NonSelectedAreaMode::Transparent`]). Each selection renders its style over the whole image
/// on a private surface, exactly as [`crate::apply_style`] would, and only its rectangle is kept,
/// masked by its blend and composited over the output. Selections render in parallel, each with
/// a source forked in order from `rng`, and merge strictly in slice order so later selections
/// sit on top.
///
/// Rectangles are clipped to the image; those entirely outside it are skipped.
#[tracing::instrument(skip(base, selections, rng), fields(count = selections.len()))]
pub fn composite_selections(
    base: &Bitmap,
    selections: &[Selection],
    mode: NonSelectedAreaMode,
    rng: &mut dyn RngCore,
) -> SketchResult<Bitmap> {
    let (width, height) = base.dimensions();
    // Skipped selections still fork a source.
    let mut jobs = Vec::with_capacity(selections.len());
    for selection in selections {
        let rng = fork_rng(rng);
        match selection.pixel_bounds(width, height) {
            Some(bounds) => jobs.push(RegionJob {
                selection,
                bounds,
                rng,
            }),
            None => tracing::debug!(id = %selection.id, "selection outside the image, skipped"),
        }
    }

    let luma = Luminance::from_bitmap(base);
    let edges = edge_maps(&luma, &jobs);

    let layers = jobs
        .into_par_iter()
        .map(|job| render_region(base, &luma, &edges, job))
        .collect::<SketchResult<Vec<_>>>()?;

    let mut out: Vec<u8> = match mode {
        NonSelectedAreaMode::Original => base
            .pixels()
            .flat_map(|p| premultiply(p.0))
            .collect(),
        NonSelectedAreaMode::Transparent => vec![0; width as usize * height as usize * 4],
    };

    for mut layer in layers {
        let selection = layer.selection;
        match blend_mask(selection.rect, selection.blend, layer.bounds)? {
            None => overwrite(&mut out, width, &layer),
            Some(mask) => {
                mask_in_place(&mut layer.pixels, &mask)?;
                merge_over(&mut out, width, &layer)?;
            }
        }
    }

    let mut bitmap = Bitmap::new(width, height);
    for (dst, src) in bitmap.pixels_mut().zip(out.chunks_exact(4)) {
        dst.0 = unpremultiply([src[0], src[1], src[2], src[3]]);
    }
    Ok(bitmap)
}

/// Edge maps keyed by the clamped `detail` value, computed once per distinct value.
fn edge_maps(luma: &Luminance, jobs: &[RegionJob<'_>]) -> HashMap<u64, EdgeMap> {
    let mut maps = HashMap::new();
    for job in jobs {
        let common = job.selection.settings.common;
        maps.entry(detail_key(common.clamped().detail))
            .or_insert_with(|| detect_edges_from_luma(luma, common.sensitivity()));
    }
    maps
}

fn detail_key(detail: f64) -> u64 {
    detail.to_bits()
}

fn render_region<'a>(
    base: &Bitmap,
    luma: &Luminance,
    edges: &HashMap<u64, EdgeMap>,
    mut job: RegionJob<'a>,
) -> SketchResult<RegionLayer<'a>> {
    let settings = &job.selection.settings;
    let key = detail_key(settings.common.clamped().detail);
    let edges = edges
        .get(&key)
        .ok_or_else(|| SketchError::render("edge map missing for selection detail"))?;

    let mut surface = Surface::new(base.width(), base.height())?;
    surface.fill(settings.style().background());
    render_style(&mut surface, StyleInput { edges, luma }, settings, &mut job.rng)?;

    Ok(RegionLayer {
        selection: job.selection,
        bounds: job.bounds,
        pixels: surface.crop_premul(job.bounds),
    })
}

/// Replace the layer's rectangle in `out`.
fn overwrite(out: &mut [u8], width: u32, layer: &RegionLayer<'_>) {
    let row_bytes = layer.bounds.width() as usize * 4;
    for (i, y) in (layer.bounds.y0..layer.bounds.y1).enumerate() {
        let start = (y as usize * width as usize + layer.bounds.x0 as usize) * 4;
        out[start..start + row_bytes]
            .copy_from_slice(&layer.pixels[i * row_bytes..(i + 1) * row_bytes]);
    }
}

/// Source-over of the layer onto its rectangle in `out`.
fn merge_over(out: &mut [u8], width: u32, layer: &RegionLayer<'_>) -> SketchResult<()> {
    let row_bytes = layer.bounds.width() as usize * 4;
    for (i, y) in (layer.bounds.y0..layer.bounds.y1).enumerate() {
        let start = (y as usize * width as usize + layer.bounds.x0 as usize) * 4;
        let src = &layer.pixels[i * row_bytes..(i + 1) * row_bytes];
        over_in_place(&mut out[start..start + row_bytes], src)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/region/compositor.rs"]
mod tests;
