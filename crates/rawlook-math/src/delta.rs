//! Bounded asymmetric percentage deltas.
//!
//! Shadow/highlight/black/white-style sliders do not add a fixed offset;
//! they move a value a *percentage of the remaining room* toward a bound.
//! A +20 change from 50 with 100 of headroom lands on 60; a -20 change
//! from 50 lands on 40 only because the room below happens to match. The
//! asymmetry is intentional and the result is always clamped to the
//! window, so repeated application converges on the bound instead of
//! overshooting it.

/// Moves `current` by `change` percent of the room toward 0 or `scale`.
///
/// Positive `change` moves toward `scale` by `change`% of
/// `scale - current`; negative `change` moves toward 0 by `change`% of
/// `current`. The result is clamped to `[0, scale]`. A non-positive
/// `scale` leaves the value unchanged.
///
/// # Example
///
/// ```rust
/// use rawlook_math::apply;
///
/// assert_eq!(apply(50.0, 20.0, 100.0), 60.0);
/// assert_eq!(apply(50.0, -20.0, 100.0), 40.0);
/// assert_eq!(apply(80.0, 100.0, 100.0), 100.0);
/// ```
#[inline]
pub fn apply(current: f64, change: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return current;
    }
    let moved = if change >= 0.0 {
        current + (scale - current) * change / 100.0
    } else {
        current + current * change / 100.0
    };
    moved.clamp(0.0, scale)
}

/// Moves `current` by `change` percent of the room toward `lower` or
/// `upper`.
///
/// Positive `change` moves toward `upper` by `change`% of
/// `upper - current`; negative `change` moves toward `lower` by `change`%
/// of `current - lower`. The result is clamped to `[lower, upper]`.
///
/// A collapsed or inverted window (`upper <= lower`) leaves the value
/// unchanged: earlier adjustments can squeeze neighboring curve points
/// until no room remains.
///
/// # Example
///
/// ```rust
/// use rawlook_math::apply_constrained;
///
/// assert_eq!(apply_constrained(25.0, 0.0, 40.0, 10.0), 25.0);
/// assert_eq!(apply_constrained(25.0, 100.0, 40.0, 10.0), 40.0);
/// assert_eq!(apply_constrained(25.0, -100.0, 40.0, 10.0), 10.0);
/// ```
#[inline]
pub fn apply_constrained(current: f64, change: f64, upper: f64, lower: f64) -> f64 {
    if upper <= lower {
        return current;
    }
    let moved = if change >= 0.0 {
        current + (upper - current) * change / 100.0
    } else {
        current + (current - lower) * change / 100.0
    };
    moved.clamp(lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_asymmetry() {
        // +50% of the headroom above 20 is 40; -50% of 80 is 40.
        assert_eq!(apply(20.0, 50.0, 100.0), 60.0);
        assert_eq!(apply(80.0, -50.0, 100.0), 40.0);
    }

    #[test]
    fn test_apply_extremes() {
        assert_eq!(apply(35.0, 100.0, 100.0), 100.0);
        assert_eq!(apply(35.0, -100.0, 100.0), 0.0);
        assert_eq!(apply(35.0, 0.0, 100.0), 35.0);
    }

    #[test]
    fn test_apply_degenerate_scale() {
        assert_eq!(apply(5.0, 50.0, 0.0), 5.0);
    }

    #[test]
    fn test_constrained_identities() {
        assert_eq!(apply_constrained(25.0, 0.0, 40.0, 10.0), 25.0);
        assert_eq!(apply_constrained(25.0, 100.0, 40.0, 10.0), 40.0);
        assert_eq!(apply_constrained(25.0, -100.0, 40.0, 10.0), 10.0);
    }

    #[test]
    fn test_constrained_partial_moves() {
        // 20% of the 15 between 25 and 40.
        assert_eq!(apply_constrained(25.0, 20.0, 40.0, 10.0), 28.0);
        // 20% of the 15 between 25 and 10.
        assert_eq!(apply_constrained(25.0, -20.0, 40.0, 10.0), 22.0);
    }

    #[test]
    fn test_constrained_clamps_outside_start() {
        // A starting value outside the window is pulled back in.
        assert_eq!(apply_constrained(45.0, 100.0, 40.0, 10.0), 40.0);
    }

    #[test]
    fn test_constrained_collapsed_window() {
        assert_eq!(apply_constrained(5.0, 50.0, 0.0, 0.0), 5.0);
        assert_eq!(apply_constrained(5.0, 50.0, -5.0, 0.0), 5.0);
    }

    #[test]
    fn test_constrained_monotone_in_change() {
        let mut prev = apply_constrained(25.0, -100.0, 40.0, 10.0);
        for step in -99..=100 {
            let v = apply_constrained(25.0, step as f64, 40.0, 10.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
