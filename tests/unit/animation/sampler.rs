use std::cell::RefCell;

use super::*;
use crate::foundation::rng::{ConstantRng, seeded_rng};
use crate::pipeline::Sketcher;
use crate::style::{CommonParams, Style};

/// Records the settings it is called with and returns a blank bitmap of the input size.
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<CommonParams>>,
}

impl SketchRenderer for Recorder {
    fn render(&self, image: &Bitmap, settings: &StyleSettings, _rng: &mut dyn RngCore) -> Bitmap {
        self.calls.borrow_mut().push(settings.common);
        Bitmap::new(image.width(), image.height())
    }
}

#[test]
fn frames_ramp_the_common_parameters() {
    let sampler = FrameSampler::new(Recorder::default());
    let settings = StyleSettings::new(Style::Pencil)
        .with_detail(80.0)
        .with_line_strength(50.0)
        .with_shading(30.0);
    let frames = sampler.sample_frames(&Bitmap::new(4, 3), &settings, 4, &mut ConstantRng(0));

    assert_eq!(frames.len(), 4);
    let progress: Vec<f64> = frames.iter().map(|f| f.progress).collect();
    assert_eq!(progress, vec![0.25, 0.5, 0.75, 1.0]);
    assert!(frames.iter().all(|f| f.image.dimensions() == (4, 3)));

    let calls = sampler.renderer().calls.borrow();
    assert_eq!(calls[0].detail, 20.0);
    assert_eq!(calls[0].line_strength, 13.0);
    assert_eq!(calls[0].shading, 8.0);
    assert_eq!(calls[3], settings.common);
}

#[test]
fn zero_steps_yield_no_frames() {
    let sampler = FrameSampler::new(Recorder::default());
    let frames = sampler.sample_frames(
        &Bitmap::new(2, 2),
        &StyleSettings::default(),
        0,
        &mut ConstantRng(0),
    );
    assert!(frames.is_empty());
    assert!(sampler.renderer().calls.borrow().is_empty());
}

#[test]
fn default_sampler_renders_real_frames() {
    let image = Bitmap::from_fn(16, 16, |x, _| {
        let v = if x < 8 { 0 } else { 255 };
        image::Rgba([v, v, v, 255])
    });
    let sampler = FrameSampler::new(Sketcher);
    let frames = sampler.sample_frames(
        &image,
        &StyleSettings::new(Style::Pencil),
        DEFAULT_STEPS,
        &mut seeded_rng(3),
    );
    assert_eq!(frames.len(), DEFAULT_STEPS as usize);
    assert_eq!(frames[DEFAULT_STEPS as usize - 1].progress, 1.0);
    assert!(frames.iter().all(|f| f.image.dimensions() == (16, 16)));
}
