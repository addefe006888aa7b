/// Interpolates a blend weight between two ticks.
///
/// A full on/off flip (`|to - from| == 1`) is not blended: the result snaps to `from` up to
/// the midpoint and to `to` after it.
pub fn interpolate_weight(from: f32, to: f32, alpha: f32) -> f32 {
    if (to - from).abs() == 1.0 {
        return if alpha > 0.5 { to } else { from };
    }
    from + (to - from) * alpha
}

/// Interpolates a playback time that may have wrapped past `length` between two ticks.
pub fn interpolate_time(from: f32, to: f32, length: f32, alpha: f32) -> f32 {
    if to >= from {
        return from + (to - from) * alpha;
    }
    let time = from + (to + length - from) * alpha;
    if time >= length { time - length } else { time }
}

/// Render alpha clamped to `[0, 1]`; non-finite values present the latest tick.
pub(crate) fn presentation_alpha(alpha: f32) -> f32 {
    if alpha.is_finite() {
        alpha.clamp(0.0, 1.0)
    } else {
        1.0
    }
}
