//! Separable Gaussian blur over premultiplied RGBA8 buffers, fixed-point Q16 weights.

use crate::foundation::error::{BrandframeError, BrandframeResult};

/// Normalized Gaussian kernel of `2 * radius + 1` taps whose weights sum to exactly `1 << 16`.
pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BrandframeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BrandframeError::configuration(
            "blur sigma must be finite and > 0",
        ));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as i64;
        weights.push(q as u32);
        acc += q;
    }
    // Rounding drift goes to the center tap.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

/// Blur `buf` (width×height premultiplied RGBA8) in place.
pub(crate) fn blur_rgba8_premul_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    kernel_q16: &[u32],
) -> BrandframeResult<()> {
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if buf.len() != expected {
        return Err(BrandframeError::resource("blur buffer size mismatch"));
    }
    if kernel_q16.len() <= 1 || width == 0 || height == 0 {
        return Ok(());
    }
    let mut tmp = vec![0u8; buf.len()];
    horizontal_blur_q16(buf, &mut tmp, width, height, kernel_q16);
    vertical_blur_q16(&tmp, buf, width, height, kernel_q16);
    Ok(())
}

fn horizontal_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
