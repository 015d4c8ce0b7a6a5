use super::*;

fn settings(position: LogoPosition, treatment: VisibilityTreatment) -> LogoSettings {
    LogoSettings {
        position,
        scale: 1.0,
        padding: 60,
        visibility_treatment: treatment,
    }
}

fn red_logo(w: u32, h: u32) -> DecodedImage {
    DecodedImage::from_premul(w, h, [255u8, 0, 0, 255].repeat((w * h) as usize)).unwrap()
}

fn px(s: &Surface, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * s.width() + x) * 4) as usize;
    let d = s.data();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

fn gray(w: u32, h: u32) -> Surface {
    let mut s = Surface::new(w, h).unwrap();
    s.clear(Rgb8::new(100, 100, 100));
    s
}

#[test]
fn placement_anchors() {
    let s = |p| settings(p, VisibilityTreatment::Plain);
    // 2:1 logo -> 120x60
    assert_eq!(
        placement(1080, 1350, 2.0, &s(LogoPosition::TopLeft)),
        Rect::new(60.0, 60.0, 180.0, 120.0)
    );
    assert_eq!(
        placement(1080, 1350, 2.0, &s(LogoPosition::TopRight)),
        Rect::new(900.0, 60.0, 1020.0, 120.0)
    );
    assert_eq!(
        placement(1080, 1350, 2.0, &s(LogoPosition::BottomLeft)),
        Rect::new(60.0, 1230.0, 180.0, 1290.0)
    );
    assert_eq!(
        placement(1080, 1350, 2.0, &s(LogoPosition::BottomRight)),
        Rect::new(900.0, 1230.0, 1020.0, 1290.0)
    );
    assert_eq!(
        placement(1080, 1080, 2.0, &s(LogoPosition::Center)),
        Rect::new(480.0, 510.0, 600.0, 570.0)
    );
}

#[test]
fn placement_scales_and_preserves_aspect() {
    let mut st = settings(LogoPosition::TopLeft, VisibilityTreatment::Plain);
    st.scale = 2.0;
    st.padding = 20;
    let r = placement(1080, 1080, 0.5, &st);
    assert_eq!(r, Rect::new(20.0, 20.0, 260.0, 500.0));
}

#[test]
fn plain_draws_the_logo_as_is() {
    let mut s = gray(400, 400);
    render(&mut s, &red_logo(10, 10), &settings(LogoPosition::TopLeft, VisibilityTreatment::Plain)).unwrap();
    assert_eq!(px(&s, 120, 120), [255, 0, 0, 255]);
    assert_eq!(px(&s, 120, 185), [100, 100, 100, 255]);
}

#[test]
fn badge_puts_a_light_plate_around_the_logo() {
    let mut s = gray(400, 400);
    render(&mut s, &red_logo(10, 10), &settings(LogoPosition::TopLeft, VisibilityTreatment::Badge)).unwrap();
    assert_eq!(px(&s, 120, 120), [255, 0, 0, 255]);
    // Inside the 20px plate margin.
    let plate = px(&s, 120, 190);
    assert!(plate[0] > 230 && plate[0] == plate[1], "{plate:?}");
    assert_eq!(px(&s, 120, 215), [100, 100, 100, 255]);
}

#[test]
fn outline_adds_a_white_halo() {
    let mut s = gray(400, 400);
    render(&mut s, &red_logo(10, 10), &settings(LogoPosition::TopLeft, VisibilityTreatment::Outline)).unwrap();
    assert_eq!(px(&s, 120, 120), [255, 0, 0, 255]);
    assert_eq!(px(&s, 182, 120), [255, 255, 255, 255]);
    assert_eq!(px(&s, 120, 190), [100, 100, 100, 255]);
}

#[test]
fn shadow_darkens_below_the_logo() {
    let mut s = gray(400, 400);
    render(&mut s, &red_logo(10, 10), &settings(LogoPosition::TopLeft, VisibilityTreatment::Shadow)).unwrap();
    assert_eq!(px(&s, 120, 120), [255, 0, 0, 255]);
    let below = px(&s, 120, 182);
    assert!(below[0] < 100, "{below:?}");
    assert_eq!(px(&s, 350, 350), [100, 100, 100, 255]);
}

#[test]
fn silhouette_is_white_coverage() {
    let logo = DecodedImage::from_premul(2, 1, vec![10, 20, 30, 200, 0, 0, 0, 0]).unwrap();
    let s = silhouette(&logo);
    assert!(s.is_ok());
}
