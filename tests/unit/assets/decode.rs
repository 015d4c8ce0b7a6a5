use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let decoded = ImageDecoder.decode(&png_bytes(3, 2, [100, 50, 200, 128])).unwrap();
    assert_eq!((decoded.width, decoded.height), (3, 2));
    assert_eq!(decoded.aspect(), 1.5);
    assert_eq!(
        &decoded.rgba8_premul[0..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_are_asset_decode_errors() {
    let err = ImageDecoder.decode(b"definitely not an image").unwrap_err();
    assert!(matches!(err, BrandframeError::AssetDecode(_)));
    assert!(err.is_recoverable());
}

#[test]
fn svg_is_rasterized_at_a_usable_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="32">
        <rect width="64" height="32" fill="#ff0000"/>
    </svg>"##;
    let decoded = ImageDecoder.decode(svg).unwrap();
    assert_eq!((decoded.width, decoded.height), (512, 256));
    let mid = ((128 * 512 + 256) * 4) as usize;
    assert_eq!(&decoded.rgba8_premul[mid..mid + 4], &[255, 0, 0, 255]);
}

#[test]
fn svg_with_xml_prolog_is_detected() {
    let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="600" height="600"></svg>"#;
    let decoded = ImageDecoder.decode(svg).unwrap();
    assert_eq!((decoded.width, decoded.height), (600, 600));
}

#[test]
fn broken_svg_is_asset_decode_error() {
    assert!(matches!(
        ImageDecoder.decode(b"<svg"),
        Err(BrandframeError::AssetDecode(_))
    ));
}

#[test]
fn from_premul_checks_length() {
    assert!(DecodedImage::from_premul(2, 2, vec![0; 16]).is_ok());
    assert!(DecodedImage::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(DecodedImage::from_premul(0, 2, Vec::new()).is_err());
}
