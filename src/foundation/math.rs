use crate::foundation::error::{DoofioError, DoofioResult};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `src` over `dst`, both tightly packed premultiplied RGBA8 of equal size.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> DoofioResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(DoofioError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite a single premultiplied color over every pixel of `dst`.
pub fn fill_over_in_place(dst: &mut [u8], color: PremulRgba8) {
    if color[3] == 0 {
        return;
    }
    for d in dst.chunks_exact_mut(4) {
        let out = over([d[0], d[1], d[2], d[3]], color);
        d.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
