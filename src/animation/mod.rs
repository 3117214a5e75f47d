//! Progressive "sketch being drawn" previews.

pub(crate) mod sampler;

pub use sampler::{AnimationFrame, DEFAULT_STEPS, FrameSampler};
