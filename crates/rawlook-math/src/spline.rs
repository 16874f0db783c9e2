//! Exact interpolating B-splines.
//!
//! Tone-curve point lists come in with anywhere from 2 to a few dozen
//! points; the conversion engine needs them refit onto a fixed 5-point
//! grid. The fit is a zero-smoothing interpolation: build a B-spline basis
//! whose knots are averaged from the sample sites, solve the collocation
//! system so the spline passes through every input point, then resample.
//!
//! Knots use de Boor's averaging rule, which keeps the collocation matrix
//! nonsingular for strictly increasing sites (Schoenberg-Whitney). The
//! basis is evaluated with the standard triangular recurrence and the
//! dense system is solved by Gaussian elimination with partial pivoting;
//! point counts are small enough that a banded solver buys nothing.

use thiserror::Error;

/// Result type alias using [`SplineError`] as the error type.
pub type SplineResult<T> = std::result::Result<T, SplineError>;

/// Errors that can occur while fitting a spline.
#[derive(Debug, Error)]
pub enum SplineError {
    /// Interpolation needs at least two sample points.
    #[error("need at least 2 curve points, got {got}")]
    TooFewPoints {
        /// Number of points supplied.
        got: usize,
    },

    /// Sample x-values must be strictly increasing.
    #[error("curve x-values must be strictly increasing (x[{index}] = {x})")]
    NotIncreasing {
        /// Index of the offending sample.
        index: usize,
        /// Its x-value.
        x: f64,
    },

    /// Degree must be in `1..=points-1`.
    #[error("degree {degree} is invalid for {points} points")]
    InvalidDegree {
        /// Requested degree.
        degree: usize,
        /// Number of sample points.
        points: usize,
    },

    /// The collocation system could not be solved.
    #[error("collocation system is singular")]
    Singular,
}

/// An interpolating B-spline through a strictly increasing point list.
///
/// The spline passes exactly through every input point and is evaluated
/// anywhere inside the input x-range; evaluation outside the range clamps
/// to the nearest endpoint.
///
/// # Example
///
/// ```rust
/// use rawlook_math::BSpline;
///
/// let pts = [(0.0, 0.0), (64.0, 80.0), (255.0, 255.0)];
/// let s = BSpline::interpolate(&pts, 2).unwrap();
/// assert!((s.eval(64.0) - 80.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BSpline {
    degree: usize,
    knots: Vec<f64>,
    coefs: Vec<f64>,
}

impl BSpline {
    /// Fits a spline of the given degree through `points`.
    ///
    /// `degree` must be in `1..=points.len() - 1`; callers fitting raw
    /// curve data usually pass `min(5, points.len() - 1)`.
    pub fn interpolate(points: &[(f64, f64)], degree: usize) -> SplineResult<Self> {
        let n = points.len();
        if n < 2 {
            return Err(SplineError::TooFewPoints { got: n });
        }
        if degree == 0 || degree > n - 1 {
            return Err(SplineError::InvalidDegree { degree, points: n });
        }
        for i in 1..n {
            if points[i].0 <= points[i - 1].0 {
                return Err(SplineError::NotIncreasing {
                    index: i,
                    x: points[i].0,
                });
            }
        }

        let knots = averaged_knots(points, degree);

        // Collocation: one basis row per sample site.
        let mut matrix = vec![vec![0.0; n]; n];
        let mut rhs = vec![0.0; n];
        for (i, &(x, y)) in points.iter().enumerate() {
            let span = find_span(&knots, n, degree, x);
            let basis = basis_funs(&knots, span, degree, x);
            for (j, b) in basis.iter().enumerate() {
                matrix[i][span - degree + j] = *b;
            }
            rhs[i] = y;
        }
        let coefs = solve_dense(matrix, rhs)?;

        Ok(Self {
            degree,
            knots,
            coefs,
        })
    }

    /// The spline degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The x-range the spline is defined on.
    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (
            self.knots[self.degree],
            self.knots[self.coefs.len()],
        )
    }

    /// Evaluates the spline, clamping `x` into the domain.
    pub fn eval(&self, x: f64) -> f64 {
        let (lo, hi) = self.domain();
        let u = x.clamp(lo, hi);
        let span = find_span(&self.knots, self.coefs.len(), self.degree, u);
        let basis = basis_funs(&self.knots, span, self.degree, u);
        let mut y = 0.0;
        for (j, b) in basis.iter().enumerate() {
            y += b * self.coefs[span - self.degree + j];
        }
        y
    }
}

/// Clamped knot vector with de Boor averaged interior knots.
///
/// `degree + 1` copies of each endpoint, and interior knot `degree + j`
/// is the mean of `degree` consecutive sites starting at `j`.
fn averaged_knots(points: &[(f64, f64)], degree: usize) -> Vec<f64> {
    let n = points.len();
    let mut knots = Vec::with_capacity(n + degree + 1);
    for _ in 0..=degree {
        knots.push(points[0].0);
    }
    for j in 1..n - degree {
        let sum: f64 = points[j..j + degree].iter().map(|p| p.0).sum();
        knots.push(sum / degree as f64);
    }
    for _ in 0..=degree {
        knots.push(points[n - 1].0);
    }
    knots
}

/// Index of the knot span containing `u`, in `degree..=n-1`.
fn find_span(knots: &[f64], n: usize, degree: usize, u: f64) -> usize {
    if u >= knots[n] {
        return n - 1;
    }
    if u <= knots[degree] {
        return degree;
    }
    let (mut lo, mut hi) = (degree, n);
    let mut mid = (lo + hi) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
        mid = (lo + hi) / 2;
    }
    mid
}

/// The `degree + 1` nonzero basis values at `u` for the given span.
///
/// Triangular recurrence over knot differences; entry `j` of the result
/// is the value of basis function `span - degree + j`.
fn basis_funs(knots: &[f64], span: usize, degree: usize, u: f64) -> Vec<f64> {
    let mut values = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    values[0] = 1.0;
    for j in 1..=degree {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = values[r] / (right[r + 1] + left[j - r]);
            values[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        values[j] = saved;
    }
    values
}

/// Gaussian elimination with partial pivoting.
fn solve_dense(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> SplineResult<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < 1e-12 {
            return Err(SplineError::Singular);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in row + 1..n {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }
    Ok(x)
}
