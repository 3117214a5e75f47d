use rand::RngCore;

use crate::foundation::core::Bitmap;
use crate::pipeline::SketchRenderer;
use crate::style::StyleSettings;

/// Number of frames a progressive preview uses by default.
pub const DEFAULT_STEPS: u32 = 20;

/// One step of a progressive preview.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationFrame {
    /// `i / steps` for the 1-based frame index `i`.
    pub progress: f64,
    pub image: Bitmap,
}

/// Builds a "drawing appears" sequence by re-rendering with ramped common parameters.
#[derive(Clone, Debug, Default)]
pub struct FrameSampler<R> {
    renderer: R,
}

impl<R: SketchRenderer> FrameSampler<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render `steps` frames; frame `i` scales detail, line strength and shading by `i / steps`
    /// (rounded). Frames share `rng` and are rendered in order. `steps == 0` yields no frames.
    #[tracing::instrument(skip(self, image, settings, rng))]
    pub fn sample_frames(
        &self,
        image: &Bitmap,
        settings: &StyleSettings,
        steps: u32,
        rng: &mut dyn RngCore,
    ) -> Vec<AnimationFrame> {
        (1..=steps)
            .map(|i| {
                let progress = f64::from(i) / f64::from(steps);
                let frame_settings = settings.scaled(progress);
                AnimationFrame {
                    progress,
                    image: self.renderer.render(image, &frame_settings, rng),
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sampler.rs"]
mod tests;
