use super::*;

struct Scripted {
    values: Vec<f64>,
    at: usize,
}

impl RandomSource for Scripted {
    fn next(&mut self) -> f64 {
        let v = self.values[self.at % self.values.len()];
        self.at += 1;
        v
    }
}

fn enabled(amount: u32) -> FlashOverlaySettings {
    FlashOverlaySettings {
        enabled: true,
        amount,
        ..FlashOverlaySettings::default()
    }
}

fn gray_surface() -> Surface {
    let mut s = Surface::new(400, 300).unwrap();
    s.clear(Rgb8::new(40, 40, 40));
    s
}

#[test]
fn generates_exactly_amount_instances() {
    for k in [1, 3, 10] {
        let mut rng = SeededRandom::new(5);
        assert_eq!(generate_instances(1080, 1080, &enabled(k), &mut rng).len(), k as usize);
    }
}

#[test]
fn types_follow_next_int_in_generation_order() {
    // Six draws per instance; the first one picks the type.
    let mut values = Vec::new();
    for type_draw in [0.0, 0.3, 0.55, 0.99, 0.26] {
        values.extend([type_draw, 0.5, 0.5, 0.5, 0.5, 0.5]);
    }
    let mut rng = Scripted { values, at: 0 };
    let kinds: Vec<FlashType> = generate_instances(1000, 1000, &enabled(5), &mut rng)
        .into_iter()
        .map(|f| f.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            FlashType::Burst,
            FlashType::Glare,
            FlashType::Flare,
            FlashType::Streak,
            FlashType::Glare
        ]
    );
    assert_eq!(rng.at, 30);
}

#[test]
fn instance_fields_scale_with_settings() {
    let settings = FlashOverlaySettings {
        enabled: true,
        amount: 1,
        intensity: 1.0,
        size: 2.0,
        position_x: 0.25,
        position_y: -0.5,
        animation_speed: 0.5,
        ..FlashOverlaySettings::default()
    };
    let mut rng = Scripted {
        values: vec![0.0, 0.5, 0.0, 1.0, 0.5, 0.0],
        at: 0,
    };
    let f = generate_instances(1000, 800, &settings, &mut rng)[0];
    let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
    assert!(close(f.x, 0.5 * 1000.0 + 250.0), "{}", f.x);
    assert!(close(f.y, 0.1 * 800.0 - 400.0), "{}", f.y);
    assert!(close(f.size, 300.0 * 1.0 * 2.0), "{}", f.size);
    assert!(close(f.rotation, TAU * 0.5 * 0.5), "{}", f.rotation);
    assert!(close(f.opacity, 0.3), "{}", f.opacity);
}

#[test]
fn disabled_or_zero_amount_is_a_no_op() {
    let base = gray_surface();

    let mut s = gray_surface();
    render(&mut s, &FlashOverlaySettings::default(), 42).unwrap();
    assert_eq!(s.data(), base.data());

    let mut s = gray_surface();
    render(&mut s, &enabled(0), 42).unwrap();
    assert_eq!(s.data(), base.data());
}

#[test]
fn enabled_flashes_brighten_the_frame_deterministically() {
    let settings = FlashOverlaySettings {
        intensity: 1.0,
        ..enabled(6)
    };
    let base = gray_surface();
    let mut a = gray_surface();
    let mut b = gray_surface();
    render(&mut a, &settings, 7).unwrap();
    render(&mut b, &settings, 7).unwrap();
    assert_eq!(a.data(), b.data());
    assert_ne!(a.data(), base.data());
    let sum = |s: &Surface| s.data().iter().map(|&v| u64::from(v)).sum::<u64>();
    assert!(sum(&a) > sum(&base));
}

#[test]
fn placement_is_salted_away_from_the_seed() {
    let settings = enabled(4);
    let mut salted = SeededRandom::new(42u32.wrapping_add(FLASH_SEED_SALT));
    let mut plain = SeededRandom::new(42);
    assert_ne!(
        generate_instances(1080, 1080, &settings, &mut salted),
        generate_instances(1080, 1080, &settings, &mut plain)
    );
    // Wraps instead of overflowing.
    assert_eq!(u32::MAX.wrapping_add(FLASH_SEED_SALT), 998);
}

#[test]
fn tinted_stops_average_color_and_square_alpha() {
    let stop = tinted(0.3, Rgb8::new(255, 255, 200), 0.6, Rgb8::new(0, 0, 0));
    assert_eq!(stop.offset, 0.3);
    assert_eq!(stop.color, Rgb8::new(128, 128, 100));
    assert!((stop.alpha - 0.36).abs() < 1e-12);
}

#[test]
fn every_flash_type_draws_something() {
    for kind in FlashType::ALL {
        let mut s = Surface::new(200, 200).unwrap();
        let flash = FlashInstance {
            x: 100.0,
            y: 100.0,
            size: 80.0,
            rotation: 0.3,
            kind,
            opacity: 0.8,
        };
        render_instances(&mut s, &[flash], Rgb8::WHITE).unwrap();
        let center = ((100 * 200 + 100) * 4 + 3) as usize;
        assert!(s.data()[center] > 0, "{kind:?}");
        assert_eq!(s.data()[3], 0, "{kind:?}");
    }
}
