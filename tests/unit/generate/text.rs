use super::*;
use crate::assets::fonts::{FontSet, FontSource};

fn by_chars(s: &str) -> BrandframeResult<f64> {
    Ok(s.chars().count() as f64 * 10.0)
}

#[test]
fn contrast_pins_both_sides_of_the_threshold() {
    assert_eq!(contrast_color(Rgb8::WHITE), Rgb8::BLACK);
    assert_eq!(contrast_color(Rgb8::BLACK), Rgb8::WHITE);
    // 128/255 is just above one half, 127/255 just below.
    assert_eq!(contrast_color(Rgb8::new(0x80, 0x80, 0x80)), Rgb8::BLACK);
    assert_eq!(contrast_color(Rgb8::new(0x7F, 0x7F, 0x7F)), Rgb8::WHITE);
    // 587*204 + 114*68 = 127_500: exactly one half resolves to white.
    let midpoint = Rgb8::new(0, 204, 68);
    assert_eq!(midpoint.luminance_scaled(), 127_500);
    assert_eq!(contrast_color(midpoint), Rgb8::WHITE);
    assert_eq!(contrast_color(Rgb8::new(1, 204, 68)), Rgb8::BLACK);
    // Saturated yellow is bright, saturated blue is dark.
    assert_eq!(contrast_color(Rgb8::new(255, 255, 0)), Rgb8::BLACK);
    assert_eq!(contrast_color(Rgb8::new(0, 0, 255)), Rgb8::WHITE);
}

#[test]
fn wrap_fills_lines_greedily() {
    let lines = wrap_words("aa bb cc dd ee", 60.0, by_chars).unwrap();
    assert_eq!(lines, vec!["aa bb", "cc dd", "ee"]);
}

#[test]
fn wrap_counts_the_trailing_space() {
    // "aaaa b" is 60 wide and would fit; "aaaa b " is 70 and does not.
    let lines = wrap_words("aaaa b", 60.0, by_chars).unwrap();
    assert_eq!(lines, vec!["aaaa", "b"]);
}

#[test]
fn wrap_keeps_overlong_first_word_on_its_own_line() {
    let lines = wrap_words("supercalifragilistic is long", 100.0, by_chars).unwrap();
    assert_eq!(lines, vec!["supercalifragilistic", "is long"]);
}

#[test]
fn wrap_fits_everything_on_one_line_when_wide_enough() {
    assert_eq!(wrap_words("Hello  world", 1000.0, by_chars).unwrap(), vec!["Hello world"]);
}

#[test]
fn wrap_of_empty_text_is_one_empty_line() {
    assert_eq!(wrap_words("", 10.0, by_chars).unwrap(), vec![String::new()]);
}

#[test]
fn wrap_propagates_measure_errors() {
    let err = wrap_words("a b", 10.0, |_| {
        Err(crate::foundation::error::BrandframeError::configuration("boom"))
    });
    assert!(err.is_err());
}

#[test]
fn copy_colors_fallbacks() {
    let navy = Rgb8::new(0x11, 0x22, 0x33);
    let gold = Rgb8::new(0xFF, 0xCC, 0x00);
    let pink = Rgb8::new(0xEC, 0x48, 0x99);
    assert_eq!(copy_colors(&[]), (Rgb8::BLACK, Rgb8::BLACK));
    assert_eq!(copy_colors(&[navy]), (Rgb8::WHITE, Rgb8::WHITE));
    assert_eq!(copy_colors(&[navy, gold]), (Rgb8::WHITE, gold));
    assert_eq!(copy_colors(&[navy, gold, pink]), (Rgb8::WHITE, pink));
}

#[test]
fn cta_pill_geometry() {
    assert_eq!(cta_rect(1080, 1080), Rect::new(340.0, 900.0, 740.0, 980.0));
    assert_eq!(cta_rect(1080, 1350), Rect::new(340.0, 1170.0, 740.0, 1250.0));
}

#[test]
fn pill_is_drawn_without_fonts() {
    let mut s = Surface::new(1080, 1080).unwrap();
    s.clear(Rgb8::BLACK);
    let gold = Rgb8::new(0xFF, 0xCC, 0x00);
    let copy = CopyVariant::new("Hello", "World", "Go");
    let drew = render(&mut s, &copy, &[Rgb8::BLACK, gold], None).unwrap();
    assert!(!drew);
    let i = ((940 * 1080 + 400) * 4) as usize;
    assert_eq!(&s.data()[i..i + 4], &[0xFF, 0xCC, 0x00, 0xFF]);
}

#[test]
fn headline_glyphs_land_near_their_baseline() {
    let Some(fonts) = FontSet::resolve(&FontSource::System).ok().flatten() else {
        return;
    };
    let Ok(mut engine) = TextLayoutEngine::new(&fonts) else {
        return;
    };
    let mut s = Surface::new(1080, 1080).unwrap();
    s.clear(Rgb8::BLACK);
    let copy = CopyVariant::new("HELLO", "", "");
    assert!(render(&mut s, &copy, &[Rgb8::BLACK], Some(&mut engine)).unwrap());

    // White glyphs appear in the band just above the 0.45h baseline, centered.
    let baseline = (1080.0 * 0.45) as u32;
    let lit = (baseline - 40..baseline)
        .flat_map(|y| (400..680).map(move |x| (x, y)))
        .any(|(x, y)| s.data()[((y * 1080 + x) * 4) as usize] > 200);
    assert!(lit);
    // Nothing drawn far above.
    let top_row = (0..1080).all(|x| s.data()[(x * 4) as usize] == 0);
    assert!(top_row);
}
