//! Angle arithmetic for needle and bug rotations.
//!
//! Every rotating element on the rose (compass card, track diamond,
//! selected-heading bug, course pointers) turns through the shortest arc
//! between its previous and commanded position. Taking the naive numeric
//! difference makes a needle spin the long way around the dial when either
//! angle wraps past north, so all rotations are derived through
//! [`diff_angle`].

/// Normalize an angle in degrees to the range `[0, 360)`.
#[inline]
pub fn normalize_360(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Shortest signed rotation from `from` to `to`, in degrees.
///
/// The result is in `(-180, 180]`, positive when the shortest rotation from
/// `from` to `to` is clockwise. Wraparound at 0/360 is exact:
/// `diff_angle(359.0, 1.0) == 2.0`, not 358.
#[inline]
pub fn diff_angle(from: f64, to: f64) -> f64 {
    let diff = normalize_360(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Round a value to a fixed number of decimal places.
///
/// Used to commit noisy signal reads at a fixed precision before they feed
/// rotations or recompute triggers.
#[inline]
pub fn round_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
