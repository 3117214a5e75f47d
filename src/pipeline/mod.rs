//! Entry points that run a whole conversion: analysis, background, marks, and encoding.

pub(crate) mod apply;

pub use apply::{
    SketchRenderer, Sketcher, apply_style, apply_style_with_selections, sketch_png,
    try_apply_style,
};
