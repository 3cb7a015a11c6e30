use super::Disc;
use crate::config::ConfigError;
use ultraviolet::Vec2;

#[test]
fn mass_scales_with_disc_area() {
    let small = Disc::new(Vec2::zero(), Vec2::zero(), 1.0, "a").unwrap();
    let large = Disc::new(Vec2::zero(), Vec2::zero(), 2.0, "b").unwrap();
    assert!(small.mass > 0.0);
    assert!((large.mass / small.mass - 4.0).abs() < 1e-6);
}

#[test]
fn non_positive_radius_is_rejected() {
    for radius in [0.0, -1.0, f32::NAN] {
        let result = Disc::new(Vec2::zero(), Vec2::zero(), radius, "bad");
        assert!(matches!(result, Err(ConfigError::BadRadius(_))));
    }
}

#[test]
fn ids_are_unique() {
    let a = Disc::new(Vec2::zero(), Vec2::zero(), 1.0, "a").unwrap();
    let b = Disc::new(Vec2::zero(), Vec2::zero(), 1.0, "b").unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn wake_clears_rest_state() {
    let mut disc = Disc::new(Vec2::zero(), Vec2::zero(), 1.0, "a").unwrap();
    disc.resting = true;
    disc.still_ticks = 5;
    disc.wake();
    assert!(!disc.resting);
    assert_eq!(disc.still_ticks, 0);
}
