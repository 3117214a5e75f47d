use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = u16::from(255 - sa);
            let mut out = src;
            for (o, d) in out.iter_mut().zip(dst) {
                *o = o.saturating_add(mul_div255_u8(u16::from(d), inv));
            }
            out
        }
    }
}

/// [`over`] applied pixel by pixel to two equal-length rgba8 rows.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> SketchResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SketchError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Destination-in: scale every premultiplied pixel of `dst` by the matching mask coverage.
pub(crate) fn mask_in_place(dst: &mut [u8], mask: &[u8]) -> SketchResult<()> {
    if dst.len() != mask.len() * 4 {
        return Err(SketchError::render(
            "mask_in_place expects one mask byte per rgba8 pixel",
        ));
    }
    for (px, &m) in dst.chunks_exact_mut(4).zip(mask) {
        match m {
            255 => {}
            0 => px.copy_from_slice(&[0, 0, 0, 0]),
            m => {
                for c in px.iter_mut() {
                    *c = mul_div255_u8(u16::from(*c), u16::from(m));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
