//! Error types for the conversion engine.
//!
//! Errors here are deliberately narrow: a missing develop property is not
//! an error (stages skip themselves via `Option`), and out-of-range values
//! are clamped rather than rejected. What remains is malformed curve data,
//! and even that stays local to one stage — the pipeline logs it and moves
//! on, so no error ever escapes a conversion.

use thiserror::Error;

/// Result type alias using [`ConvertError`] as the error type.
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Errors local to a single conversion stage.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A curve fit needs at least two control points.
    #[error("tone curve '{key}' has {got} points, need at least 2")]
    TooFewCurvePoints {
        /// Property key holding the point array.
        key: String,
        /// Number of points found.
        got: usize,
    },

    /// A curve point string did not parse as a numeric `x, y` pair.
    #[error("malformed point '{text}' at index {index} of '{key}'")]
    MalformedPoint {
        /// Property key holding the point array.
        key: String,
        /// Zero-based item index.
        index: usize,
        /// The offending item text.
        text: String,
    },

    /// The spline fit over parsed points failed.
    #[error("curve fit for '{key}' failed: {source}")]
    Fit {
        /// Property key holding the point array.
        key: String,
        /// Underlying spline error.
        source: rawlook_math::SplineError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_property() {
        let e = ConvertError::TooFewCurvePoints {
            key: "ToneCurvePV2012".into(),
            got: 1,
        };
        assert!(e.to_string().contains("ToneCurvePV2012"));

        let e = ConvertError::MalformedPoint {
            key: "ToneCurveRed".into(),
            index: 2,
            text: "x, y".into(),
        };
        assert!(e.to_string().contains("index 2"));
    }
}
