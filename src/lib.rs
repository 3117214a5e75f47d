//! Sketchify turns raster images into procedurally drawn sketches.
//!
//! A conversion detects edges on the source luminance, paints a style's paper colour, and
//! scatters stochastic marks whose opacity follows edge strength:
//!
//! - [`apply_style`] renders one of nineteen [`Style`]s over the whole image
//! - [`apply_style_with_selections`] renders each [`Selection`] with its own style and blends the
//!   regions over the source (or over transparency)
//! - [`RegionSelector`] is a headless pointer state machine that builds the selection list
//! - [`FrameSampler`] produces a progressive "being drawn" sequence, exportable with
//!   [`encode_gif`]
//!
//! All randomness flows through an injected [`rand::RngCore`]; a fixed seed gives byte-identical
//! output.
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod codec;
pub mod edges;
pub mod pipeline;
pub(crate) mod raster;
pub mod region;
pub mod style;

pub use crate::foundation::core::{Bitmap, PixelBounds, Rect, Rgba};
pub use crate::foundation::error::{SketchError, SketchResult};
pub use crate::foundation::rng::{ConstantRng, entropy_rng, seeded_rng};

pub use crate::animation::{AnimationFrame, DEFAULT_STEPS, FrameSampler};
pub use crate::codec::{GIF_FRAME_DELAY_MS, decode_image, encode_gif, encode_png};
pub use crate::edges::{EdgeMap, detect_edges};
pub use crate::pipeline::{
    SketchRenderer, Sketcher, apply_style, apply_style_with_selections, sketch_png,
    try_apply_style,
};
pub use crate::region::{
    BlendMode, BlendSpec, NonSelectedAreaMode, PendingSelection, RegionSelector, Selection,
    SelectorState, blend_preview_rect,
};
pub use crate::style::{CommonParams, Style, StyleParams, StyleSettings};
