use crate::foundation::error::{BrandframeError, BrandframeResult};

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Premultiplied source-over for a single pixel.
pub(crate) fn premul_over_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = src[3].saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        out[c] = src[c].saturating_add(mul_div255_u8(u16::from(dst[c]), inv));
    }
    out
}

/// Scale a premultiplied pixel by an 8-bit opacity.
pub(crate) fn scale_px(px: [u8; 4], op: u16) -> [u8; 4] {
    [
        mul_div255_u8(u16::from(px[0]), op),
        mul_div255_u8(u16::from(px[1]), op),
        mul_div255_u8(u16::from(px[2]), op),
        mul_div255_u8(u16::from(px[3]), op),
    ]
}

/// `dst = src over dst`, with `src` attenuated by `opacity`.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> BrandframeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BrandframeError::resource(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return Ok(());
    }
    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let s = if op == 255 {
            [s[0], s[1], s[2], s[3]]
        } else {
            scale_px([s[0], s[1], s[2], s[3]], op)
        };
        let out = premul_over_px([d[0], d[1], d[2], d[3]], s);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// `dst = dst over src`: paints `src` only where `dst` is not already opaque.
pub(crate) fn premul_under_in_place(dst: &mut [u8], src: &[u8]) -> BrandframeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BrandframeError::resource(
            "premul_under_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if d[3] == 255 {
            continue;
        }
        let out = premul_over_px([s[0], s[1], s[2], s[3]], [d[0], d[1], d[2], d[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[0..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
