use super::*;

#[test]
fn kernel_sums_to_one_in_q16() {
    for (radius, sigma) in [(1, 0.5), (5, 2.0), (30, 10.0)] {
        let k = gaussian_kernel_q16(radius, sigma).unwrap();
        assert_eq!(k.len(), (2 * radius + 1) as usize);
        assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
        assert_eq!(k[0], k[k.len() - 1]);
        assert!(k[k.len() / 2] >= k[0]);
    }
}

#[test]
fn zero_radius_is_identity_kernel() {
    assert_eq!(gaussian_kernel_q16(0, 0.0).unwrap(), vec![65536]);
}

#[test]
fn bad_sigma_is_rejected() {
    assert!(gaussian_kernel_q16(3, 0.0).is_err());
    assert!(gaussian_kernel_q16(3, f32::NAN).is_err());
}

#[test]
fn uniform_buffer_is_unchanged() {
    let mut buf = [10u8, 20, 30, 40].repeat(8 * 6);
    let before = buf.clone();
    let k = gaussian_kernel_q16(3, 1.5).unwrap();
    blur_rgba8_premul_in_place(&mut buf, 8, 6, &k).unwrap();
    assert_eq!(buf, before);
}

#[test]
fn single_pixel_spreads_and_dims() {
    let (w, h) = (9u32, 9u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    buf[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    let k = gaussian_kernel_q16(2, 1.0).unwrap();
    blur_rgba8_premul_in_place(&mut buf, w, h, &k).unwrap();
    assert!(buf[center + 3] < 255);
    let neighbor = ((4 * w + 5) * 4) as usize;
    assert!(buf[neighbor + 3] > 0);
    assert_eq!(buf[3], 0);
}

#[test]
fn size_mismatch_is_resource_error() {
    let mut buf = vec![0u8; 10];
    let k = gaussian_kernel_q16(1, 1.0).unwrap();
    assert!(matches!(
        blur_rgba8_premul_in_place(&mut buf, 2, 2, &k),
        Err(BrandframeError::Resource(_))
    ));
}
