use crate::{interpolate_time, interpolate_weight};

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-5,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

#[test]
fn full_weight_flip_snaps_at_midpoint() {
    assert_eq!(interpolate_weight(0.0, 1.0, 0.49), 0.0);
    assert_eq!(interpolate_weight(0.0, 1.0, 0.5), 0.0);
    assert_eq!(interpolate_weight(0.0, 1.0, 0.51), 1.0);

    assert_eq!(interpolate_weight(1.0, 0.0, 0.4), 1.0);
    assert_eq!(interpolate_weight(1.0, 0.0, 0.6), 0.0);
}

#[test]
fn partial_weight_change_is_linear() {
    assert_approx(interpolate_weight(0.2, 0.6, 0.5), 0.4);
    assert_approx(interpolate_weight(0.5, 1.0, 0.25), 0.625);
    assert_approx(interpolate_weight(0.3, 0.3, 0.9), 0.3);
}

#[test]
fn time_without_wrap_is_linear() {
    assert_approx(interpolate_time(0.2, 0.6, 1.0, 0.25), 0.3);
    assert_approx(interpolate_time(0.2, 0.6, 1.0, 1.0), 0.6);
}

#[test]
fn time_interpolates_through_the_wrap_point() {
    assert_approx(interpolate_time(0.9, 0.1, 1.0, 0.5), 0.0);
    assert_approx(interpolate_time(0.9, 0.1, 1.0, 0.25), 0.95);
    assert_approx(interpolate_time(0.9, 0.1, 1.0, 0.75), 0.05);
}

#[test]
fn time_wrap_uses_given_length() {
    assert_approx(interpolate_time(1.8, 0.2, 2.0, 0.25), 1.9);
    assert_approx(interpolate_time(1.8, 0.2, 2.0, 0.75), 0.1);
}
