//! Range remapping for slider values.
//!
//! Develop sliders arrive in their native domains (EV, percent, degrees)
//! and leave as filter parameters in the target filter's range. The
//! functions here are the shared mechanics; each adjustment supplies its
//! own domain and target constants.

/// Threshold below which a slider value is treated as a no-op.
///
/// A stage whose mapped adjustment magnitude stays under this value emits
/// no filter at all, keeping untouched sliders out of the output document.
pub const NOOP_THRESHOLD: f64 = 0.01;

/// Threshold below which a resampled curve ordinate snaps to exactly 0.0.
///
/// Spline refitting leaves values like `3.2e-15` at anchored endpoints;
/// snapping avoids serializing them.
pub const SNAP_THRESHOLD: f64 = 0.001;

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
///
/// # Example
///
/// ```rust
/// use rawlook_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// ```
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse linear interpolation.
///
/// Given a value between `a` and `b`, returns the corresponding `t` value.
/// Returns 0.0 for a degenerate range.
///
/// # Example
///
/// ```rust
/// use rawlook_math::inverse_lerp;
///
/// assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
/// ```
#[inline]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if (b - a).abs() < 1e-12 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Remaps a value from one range to another.
///
/// # Example
///
/// ```rust
/// use rawlook_math::remap;
///
/// // Map a [0, 100] slider to [0, 2]
/// assert_eq!(remap(50.0, 0.0, 100.0, 0.0, 2.0), 1.0);
/// ```
#[inline]
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let t = inverse_lerp(in_min, in_max, value);
    lerp(out_min, out_max, t)
}

/// Returns `true` if the value is below the no-op threshold in magnitude.
///
/// # Example
///
/// ```rust
/// use rawlook_math::is_noop;
///
/// assert!(is_noop(0.0));
/// assert!(is_noop(-0.009));
/// assert!(!is_noop(0.011));
/// ```
#[inline]
pub fn is_noop(value: f64) -> bool {
    value.abs() < NOOP_THRESHOLD
}

/// Snaps near-zero values to exactly 0.0.
///
/// # Example
///
/// ```rust
/// use rawlook_math::snap_small;
///
/// assert_eq!(snap_small(3.2e-15), 0.0);
/// assert_eq!(snap_small(0.002), 0.002);
/// ```
#[inline]
pub fn snap_small(value: f64) -> f64 {
    if value.abs() < SNAP_THRESHOLD {
        0.0
    } else {
        value
    }
}
