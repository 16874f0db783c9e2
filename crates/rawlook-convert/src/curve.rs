//! The 5-point master tone curve and curve fitting.
//!
//! Everything tonal in a preset funnels into one curve of five control
//! points on a `[0, 100]` square: blacks, shadows, midtone, highlights,
//! whites. Several stages nudge individual coordinates; an explicit curve
//! property replaces the whole thing. Point arrays of arbitrary length are
//! refit onto the fixed grid with an exact interpolating spline.

use rawlook_math::{snap_small, BSpline};
use tracing::debug;

use crate::error::{ConvertError, ConvertResult};

/// The five fixed resample abscissas, as fractions of the x-domain.
pub const ABSCISSAS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Maximum spline degree for curve refits.
const MAX_DEGREE: usize = 5;

/// A 5-point tone curve on a `[0, 100]` square.
///
/// Points are ordered blacks → shadows → midtone → highlights → whites and
/// keep strictly increasing x. The identity curve is the diagonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    points: [(f64, f64); 5],
}

/// Point index of the blacks control point.
pub const BLACKS: usize = 0;
/// Point index of the shadows control point.
pub const SHADOWS: usize = 1;
/// Point index of the midtone control point.
pub const MIDTONE: usize = 2;
/// Point index of the highlights control point.
pub const HIGHLIGHTS: usize = 3;
/// Point index of the whites control point.
pub const WHITES: usize = 4;

impl ToneCurve {
    /// The identity diagonal.
    pub const IDENTITY: Self = Self {
        points: [
            (0.0, 0.0),
            (25.0, 25.0),
            (50.0, 50.0),
            (75.0, 75.0),
            (100.0, 100.0),
        ],
    };

    /// The "Medium Contrast" named preset.
    pub const MEDIUM_CONTRAST: Self = Self {
        points: [
            (0.0, 0.0),
            (25.0, 22.0),
            (50.0, 50.0),
            (75.0, 77.0),
            (100.0, 100.0),
        ],
    };

    /// The "Strong Contrast" named preset.
    pub const STRONG_CONTRAST: Self = Self {
        points: [
            (0.0, 0.0),
            (25.0, 19.0),
            (50.0, 50.0),
            (75.0, 79.0),
            (100.0, 100.0),
        ],
    };

    /// x-coordinate of point `i`.
    #[inline]
    pub fn x(&self, i: usize) -> f64 {
        self.points[i].0
    }

    /// y-coordinate of point `i`.
    #[inline]
    pub fn y(&self, i: usize) -> f64 {
        self.points[i].1
    }

    /// Sets the x-coordinate of point `i`.
    #[inline]
    pub fn set_x(&mut self, i: usize, x: f64) {
        self.points[i].0 = x;
    }

    /// Sets the y-coordinate of point `i`.
    #[inline]
    pub fn set_y(&mut self, i: usize, y: f64) {
        self.points[i].1 = y;
    }

    /// The five points, blacks → whites.
    #[inline]
    pub fn points(&self) -> &[(f64, f64); 5] {
        &self.points
    }

    /// The five points rescaled onto the unit square, near-zero
    /// coordinates snapped to exactly 0.0.
    pub fn unit_points(&self) -> [(f64, f64); 5] {
        self.points
            .map(|(x, y)| (snap_small(x / 100.0), snap_small(y / 100.0)))
    }

    /// Fits an arbitrary point list onto the 5-point grid.
    ///
    /// `points` are raw `(x, y)` samples with x strictly increasing in
    /// `[0, x_max]` (sidecars use 0-255). Exactly five points pass through
    /// unchanged apart from axis rescaling; any other count of two or more
    /// is run through an interpolating spline of degree
    /// `min(5, count - 1)` and resampled at x = {0, 25, 50, 75, 100}.
    /// Fewer than two points is [`ConvertError::TooFewCurvePoints`].
    pub fn fit(key: &str, points: &[(f64, f64)], x_max: f64) -> ConvertResult<Self> {
        let scaled = rescale(points, x_max, 100.0);
        if scaled.len() == 5 {
            let mut points = [(0.0, 0.0); 5];
            points.copy_from_slice(&scaled);
            return Ok(Self { points });
        }
        let ys = resample_five(key, &scaled, 100.0)?;
        let mut points = [(0.0, 0.0); 5];
        for (i, p) in points.iter_mut().enumerate() {
            *p = (ABSCISSAS[i] * 100.0, ys[i]);
        }
        Ok(Self { points })
    }
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Master tone-curve accumulator: one curve plus a dirty flag.
///
/// Stages mutate the curve in pipeline order and mark it dirty; the
/// assembler emits one curve filter at the end iff anything changed.
#[derive(Debug, Clone, Default)]
pub struct CurveState {
    /// The accumulated curve.
    pub curve: ToneCurve,
    dirty: bool,
}

impl CurveState {
    /// A fresh identity curve, not dirty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the curve as changed.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the curve wholesale. Always dirties: an explicit curve
    /// property is an adjustment even when it happens to be the identity.
    pub fn replace(&mut self, curve: ToneCurve) {
        self.curve = curve;
        self.dirty = true;
    }

    /// Whether any stage changed the curve.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Fits a channel curve: ordinates at the five fixed abscissas on `[0, 1]`.
///
/// Used for the independent red/green/blue curves, which always serialize
/// against the fixed x grid. A 5-point input whose x-values already sit on
/// the grid passes through; everything else (two or more points) is
/// spline-resampled.
pub fn fit_channel_ordinates(key: &str, points: &[(f64, f64)], x_max: f64) -> ConvertResult<[f64; 5]> {
    let scaled = rescale(points, x_max, 1.0);
    if scaled.len() == 5 && scaled
        .iter()
        .zip(ABSCISSAS)
        .all(|(&(x, _), a)| (x - a).abs() < 1e-9)
    {
        let mut ys = [0.0; 5];
        for (y, &(_, sy)) in ys.iter_mut().zip(&scaled) {
            *y = snap_small(sy);
        }
        return Ok(ys);
    }
    resample_five(key, &scaled, 1.0)
}

/// Parses a sidecar curve point array into `(x, y)` pairs.
///
/// Each item is a comma-separated pair like `"128, 140"`. A bad item fails
/// the whole array with [`ConvertError::MalformedPoint`] so the enclosing
/// stage can skip itself instead of fitting half a curve.
pub fn parse_points(key: &str, items: &[String]) -> ConvertResult<Vec<(f64, f64)>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let malformed = || ConvertError::MalformedPoint {
                key: key.to_string(),
                index,
                text: item.clone(),
            };
            let (x, y) = item.split_once(',').ok_or_else(malformed)?;
            let x: f64 = x.trim().parse().map_err(|_| malformed())?;
            let y: f64 = y.trim().parse().map_err(|_| malformed())?;
            Ok((x, y))
        })
        .collect()
}

/// Rescales both axes from `[0, x_max]` to `[0, out_max]`.
///
/// Divides before multiplying so the domain endpoints map exactly.
fn rescale(points: &[(f64, f64)], x_max: f64, out_max: f64) -> Vec<(f64, f64)> {
    if x_max <= 0.0 {
        return points.to_vec();
    }
    points
        .iter()
        .map(|&(x, y)| (x / x_max * out_max, y / x_max * out_max))
        .collect()
}

/// Spline-resamples already-rescaled points at the five fixed abscissas.
fn resample_five(key: &str, scaled: &[(f64, f64)], out_max: f64) -> ConvertResult<[f64; 5]> {
    if scaled.len() < 2 {
        return Err(ConvertError::TooFewCurvePoints {
            key: key.to_string(),
            got: scaled.len(),
        });
    }
    let degree = MAX_DEGREE.min(scaled.len() - 1);
    let spline = BSpline::interpolate(scaled, degree).map_err(|source| ConvertError::Fit {
        key: key.to_string(),
        source,
    })?;
    debug!(key, points = scaled.len(), degree, "refit curve");
    let mut ys = [0.0; 5];
    for (y, a) in ys.iter_mut().zip(ABSCISSAS) {
        *y = snap_small(spline.eval(a * out_max).clamp(0.0, out_max));
    }
    Ok(ys)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_five_points_pass_through() {
        // 0-255 sidecar points scale onto the [0, 100] square unchanged.
        let pts = [
            (0.0, 10.0),
            (63.75, 51.0),
            (127.5, 127.5),
            (191.25, 204.0),
            (255.0, 242.25),
        ];
        let c = ToneCurve::fit("ToneCurve", &pts, 255.0).unwrap();
        assert!((c.x(1) - 25.0).abs() < EPSILON);
        assert!((c.y(1) - 20.0).abs() < EPSILON);
        assert!((c.y(4) - 95.0).abs() < EPSILON);
    }

    #[test]
    fn test_two_points_degrade_to_linear() {
        let pts = [(0.0, 0.0), (255.0, 255.0)];
        let c = ToneCurve::fit("ToneCurve", &pts, 255.0).unwrap();
        assert_eq!(*c.points(), *ToneCurve::IDENTITY.points());
    }

    #[test]
    fn test_refit_is_deterministic() {
        let pts = [
            (0.0, 0.0),
            (64.0, 50.0),
            (128.0, 140.0),
            (255.0, 255.0),
        ];
        let a = ToneCurve::fit("ToneCurve", &pts, 255.0).unwrap();
        let b = ToneCurve::fit("ToneCurve", &pts, 255.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_refit_interpolates_sites() {
        // A site that lands on a resample abscissa must be reproduced.
        let pts = [
            (0.0, 0.0),
            (127.5, 160.0),
            (200.0, 220.0),
            (255.0, 255.0),
        ];
        let c = ToneCurve::fit("ToneCurve", &pts, 255.0).unwrap();
        assert!((c.y(MIDTONE) - 160.0 / 255.0 * 100.0).abs() < 1e-6);
        assert!((c.y(BLACKS)).abs() < EPSILON);
        assert!((c.y(WHITES) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            ToneCurve::fit("ToneCurve", &[(0.0, 0.0)], 255.0),
            Err(ConvertError::TooFewCurvePoints { got: 1, .. })
        ));
        assert!(matches!(
            ToneCurve::fit("ToneCurve", &[], 255.0),
            Err(ConvertError::TooFewCurvePoints { got: 0, .. })
        ));
    }

    #[test]
    fn test_unit_points_snap_endpoints() {
        let c = ToneCurve::IDENTITY;
        let unit = c.unit_points();
        assert_eq!(unit[0], (0.0, 0.0));
        assert_eq!(unit[4], (1.0, 1.0));
        assert_eq!(unit[2], (0.5, 0.5));
    }

    #[test]
    fn test_channel_fit_on_grid_passes_through() {
        let pts = [
            (0.0, 0.0),
            (63.75, 70.0),
            (127.5, 127.5),
            (191.25, 180.0),
            (255.0, 255.0),
        ];
        let ys = fit_channel_ordinates("ToneCurveRed", &pts, 255.0).unwrap();
        assert!((ys[1] - 70.0 / 255.0).abs() < EPSILON);
        assert!((ys[2] - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_channel_fit_resamples_off_grid() {
        let pts = [(0.0, 0.0), (100.0, 120.0), (255.0, 255.0)];
        let ys = fit_channel_ordinates("ToneCurveRed", &pts, 255.0).unwrap();
        assert!(ys[0].abs() < EPSILON);
        assert!((ys[4] - 1.0).abs() < 1e-6);
        // The fit passes through (100, 120), so the quarter point sits
        // above the diagonal.
        assert!(ys[1] > 0.25);
    }

    #[test]
    fn test_parse_points() {
        let items: Vec<String> = vec!["0, 0".into(), "128, 140".into(), "255, 255".into()];
        let pts = parse_points("ToneCurve", &items).unwrap();
        assert_eq!(pts, vec![(0.0, 0.0), (128.0, 140.0), (255.0, 255.0)]);
    }

    #[test]
    fn test_parse_points_malformed() {
        let items: Vec<String> = vec!["0, 0".into(), "oops".into()];
        assert!(matches!(
            parse_points("ToneCurve", &items),
            Err(ConvertError::MalformedPoint { index: 1, .. })
        ));
        let items: Vec<String> = vec!["1, x".into()];
        assert!(matches!(
            parse_points("ToneCurve", &items),
            Err(ConvertError::MalformedPoint { index: 0, .. })
        ));
    }

    #[test]
    fn test_curve_state_dirty_tracking() {
        let mut state = CurveState::new();
        assert!(!state.is_dirty());
        state.curve.set_y(SHADOWS, 20.0);
        state.mark_dirty();
        assert!(state.is_dirty());

        let mut replaced = CurveState::new();
        replaced.replace(ToneCurve::IDENTITY);
        assert!(replaced.is_dirty());
    }
}
