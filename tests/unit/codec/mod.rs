use std::io::Cursor;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use super::*;

fn checker(size: u32) -> Bitmap {
    Bitmap::from_fn(size, size, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([0, 0, 0, 255])
        } else {
            image::Rgba([255, 255, 255, 255])
        }
    })
}

#[test]
fn png_encode_decodes_back_to_the_same_pixels() {
    let mut bitmap = checker(6);
    bitmap.put_pixel(2, 3, image::Rgba([10, 200, 30, 128]));
    let bytes = encode_png(&bitmap).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    assert_eq!(decode_image(&bytes).unwrap(), bitmap);
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, SketchError::Decode(_)));
}

#[test]
fn gif_holds_every_frame_with_the_requested_delay() {
    let frames = vec![checker(8), checker(8), checker(8)];
    let bytes = encode_gif(&frames, GIF_FRAME_DELAY_MS).unwrap();
    assert_eq!(&bytes[..3], b"GIF");

    let decoder = GifDecoder::new(Cursor::new(bytes)).unwrap();
    let decoded = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(decoded.len(), 3);
    let (numer, denom) = decoded[0].delay().numer_denom_ms();
    assert_eq!(numer / denom, GIF_FRAME_DELAY_MS);
    assert_eq!(decoded[0].buffer().dimensions(), (8, 8));
}

#[test]
fn gif_rejects_empty_and_mismatched_frames() {
    assert!(matches!(encode_gif(&[], 60), Err(SketchError::Encode(_))));
    let frames = vec![checker(8), checker(4)];
    assert!(matches!(encode_gif(&frames, 60), Err(SketchError::Encode(_))));
}
