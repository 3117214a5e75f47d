//! Grayscale conversion and Sobel edge detection.

pub(crate) mod detect;

pub use detect::{EdgeMap, Luminance, detect_edges, detect_edges_from_luma};
