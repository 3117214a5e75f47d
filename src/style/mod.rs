//! Style rendering.
//!
//! Each of the nineteen styles is a procedural recipe: threshold the edge map, then scatter
//! stochastic marks (strokes, hatches, dots, curves) whose opacity follows edge intensity and
//! line strength, plus an optional tone pass driven by `shading`. Styles are grouped by medium:
//!
//! - `sketch`: pencil, charcoal, detailed, crosshatch
//! - `paint`: ink, conte, drybrush, gesture
//! - `print`: woodcut, etching, lithograph, stippling
//! - `pattern`: scribble, geometric, zentangle, wireframe
//! - `technical`: topographic, blueprint, architectural

use rand::RngCore;

use crate::edges::{EdgeMap, Luminance};
use crate::foundation::error::SketchResult;
use crate::raster::Surface;

pub(crate) mod marks;
pub(crate) mod paint;
pub(crate) mod pattern;
pub(crate) mod print;
pub(crate) mod settings;
pub(crate) mod sketch;
pub(crate) mod technical;

use marks::Marks;
pub use settings::{
    ArchitecturalParams, BlueprintParams, CharcoalParams, CommonParams, ConteParams,
    CrosshatchParams, DetailedParams, DrybrushParams, EtchingParams, GeometricParams,
    GestureParams, InkParams, LithographParams, PencilParams, ScribbleParams, StipplingParams,
    Style, StyleParams, StyleSettings, TopographicParams, WireframeParams, WoodcutParams,
    ZentangleParams,
};

/// Read-only analysis of the source image that styles draw from.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StyleInput<'a> {
    pub(crate) edges: &'a EdgeMap,
    pub(crate) luma: &'a Luminance,
}

/// Paint the marks of `settings.style()` onto `surface`.
///
/// The surface is expected to already carry the style's background (see [`Style::background`]).
/// Every parameter is clamped before use; randomness comes
/// only from `rng`. Pending marks are committed before returning.
#[tracing::instrument(skip(surface, input, settings, rng), fields(style = %settings.style()))]
pub(crate) fn render_style(
    surface: &mut Surface,
    input: StyleInput<'_>,
    settings: &StyleSettings,
    rng: &mut dyn RngCore,
) -> SketchResult<()> {
    let common = settings.common.clamped();
    let mut m = Marks::new(surface, input.edges, input.luma, common, rng);
    match settings.params {
        StyleParams::Pencil(p) => sketch::pencil(&mut m, p.clamped()),
        StyleParams::Charcoal(p) => sketch::charcoal(&mut m, p.clamped()),
        StyleParams::Detailed(p) => sketch::detailed(&mut m, p.clamped()),
        StyleParams::Crosshatch(p) => sketch::crosshatch(&mut m, p.clamped()),
        StyleParams::Ink(p) => paint::ink_wash(&mut m, p.clamped()),
        StyleParams::Conte(p) => paint::conte(&mut m, p.clamped()),
        StyleParams::Drybrush(p) => paint::drybrush(&mut m, p.clamped()),
        StyleParams::Gesture(p) => paint::gesture(&mut m, p.clamped()),
        StyleParams::Woodcut(p) => print::woodcut(&mut m, p.clamped()),
        StyleParams::Etching(p) => print::etching(&mut m, p.clamped()),
        StyleParams::Lithograph(p) => print::lithograph(&mut m, p.clamped()),
        StyleParams::Stippling(p) => print::stippling(&mut m, p.clamped()),
        StyleParams::Scribble(p) => pattern::scribble(&mut m, p.clamped()),
        StyleParams::Geometric(p) => pattern::geometric(&mut m, p.clamped()),
        StyleParams::Zentangle(p) => pattern::zentangle(&mut m, p.clamped()),
        StyleParams::Wireframe(p) => pattern::wireframe(&mut m, p.clamped()),
        StyleParams::Topographic(p) => technical::topographic(&mut m, p.clamped()),
        StyleParams::Blueprint(p) => technical::blueprint(&mut m, p.clamped()),
        StyleParams::Architectural(p) => technical::architectural(&mut m, p.clamped()),
    }?;
    surface.set_global_alpha(1.0);
    surface.commit();
    Ok(())
}
