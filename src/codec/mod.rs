//! Byte-level boundary: decode uploads into bitmaps, encode results as PNG or animated GIF.

use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::png::PngEncoder;
use image::{Delay, ExtendedColorType, Frame, ImageEncoder};

use crate::foundation::core::Bitmap;
use crate::foundation::error::{SketchError, SketchResult};

/// Frame delay used for exported animations, in milliseconds.
pub const GIF_FRAME_DELAY_MS: u32 = 60;

/// Decode any format `image` understands into a straight-alpha RGBA bitmap.
pub fn decode_image(bytes: &[u8]) -> SketchResult<Bitmap> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| SketchError::decode(format!("decode image from memory: {e}")))?;
    Ok(decoded.to_rgba8())
}

pub fn encode_png(bitmap: &Bitmap) -> SketchResult<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            bitmap.as_raw(),
            bitmap.width(),
            bitmap.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| SketchError::encode(format!("encode png: {e}")))?;
    Ok(buf)
}

/// Encode `frames` as a looping GIF with a fixed per-frame delay.
///
/// Every frame must share the first frame's dimensions.
pub fn encode_gif(frames: &[Bitmap], delay_ms: u32) -> SketchResult<Vec<u8>> {
    let Some(first) = frames.first() else {
        return Err(SketchError::encode("gif needs at least one frame"));
    };
    let dims = first.dimensions();
    if let Some(bad) = frames.iter().find(|f| f.dimensions() != dims) {
        return Err(SketchError::encode(format!(
            "gif frame size {:?} does not match {:?}",
            bad.dimensions(),
            dims
        )));
    }

    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| SketchError::encode(format!("gif repeat: {e}")))?;
        let delay = Delay::from_numer_denom_ms(delay_ms, 1);
        for frame in frames {
            encoder
                .encode_frame(Frame::from_parts(frame.clone(), 0, 0, delay))
                .map_err(|e| SketchError::encode(format!("encode gif frame: {e}")))?;
        }
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/mod.rs"]
mod tests;
