use super::*;

fn bw() -> Vec<ColorStop> {
    vec![
        ColorStop::new(0.0, Rgb8::BLACK, 1.0),
        ColorStop::new(1.0, Rgb8::WHITE, 1.0),
    ]
}

#[test]
fn linear_gradient_interpolates_and_pads() {
    let g = Gradient::linear(Point::new(0.0, 0.0), Point::new(100.0, 0.0), bw());
    assert_eq!(g.sample(Point::new(-50.0, 3.0)), [0, 0, 0, 255]);
    assert_eq!(g.sample(Point::new(50.0, 99.0)), [128, 128, 128, 255]);
    assert_eq!(g.sample(Point::new(500.0, 0.0)), [255, 255, 255, 255]);
}

#[test]
fn radial_gradient_fades_alpha_with_distance() {
    let g = Gradient::radial(
        Point::new(10.0, 10.0),
        10.0,
        vec![
            ColorStop::new(0.0, Rgb8::WHITE, 1.0),
            ColorStop::new(1.0, Rgb8::WHITE, 0.0),
        ],
    );
    assert_eq!(g.sample(Point::new(10.0, 10.0))[3], 255);
    let mid = g.sample(Point::new(15.0, 10.0));
    assert!((127..=128).contains(&mid[3]));
    assert!(mid[0] <= mid[3]);
    assert_eq!(g.sample(Point::new(30.0, 10.0)), [0, 0, 0, 0]);
}

#[test]
fn multi_stop_gradient_hits_inner_stop() {
    let red = Rgb8::new(255, 0, 0);
    let g = Gradient::linear(
        Point::new(0.0, 0.0),
        Point::new(0.0, 10.0),
        vec![
            ColorStop::new(0.0, Rgb8::BLACK, 1.0),
            ColorStop::new(0.5, red, 1.0),
            ColorStop::new(1.0, Rgb8::WHITE, 1.0),
        ],
    );
    assert_eq!(g.sample(Point::new(0.0, 5.0)), [255, 0, 0, 255]);
}

#[test]
fn empty_stops_sample_transparent() {
    let g = Gradient::linear(Point::ZERO, Point::new(1.0, 1.0), Vec::new());
    assert_eq!(g.sample(Point::new(0.5, 0.5)), [0, 0, 0, 0]);
}

#[test]
fn rasterize_covers_pixel_aligned_hull() {
    let g = Gradient::linear(Point::ZERO, Point::new(10.0, 0.0), bw());
    let (_img, covered) = g.rasterize(Rect::new(-2.5, 0.2, 7.1, 3.9)).unwrap();
    assert_eq!(covered, Rect::new(-3.0, 0.0, 8.0, 4.0));
}

#[test]
fn pixmap_conversion_checks_sizes() {
    assert!(pixmap_from_premul_bytes(&[0u8; 16], 2, 2).is_ok());
    assert!(pixmap_from_premul_bytes(&[0u8; 12], 2, 2).is_err());
    assert!(pixmap_from_premul_bytes(&[], 70_000, 0).is_err());
}

#[test]
fn line_is_a_quad_of_requested_width() {
    let p = line(Point::new(0.0, 10.0), Point::new(100.0, 10.0), 8.0);
    let bb = p.bounding_box();
    assert_eq!(bb, Rect::new(0.0, 6.0, 100.0, 14.0));
    assert!(line(Point::ZERO, Point::ZERO, 4.0).elements().is_empty());
}

#[test]
fn polygon_closes_path() {
    let p = polygon(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 3.0)]);
    assert!(matches!(p.elements().last(), Some(kurbo::PathEl::ClosePath)));
    assert!(polygon(&[]).elements().is_empty());
}
