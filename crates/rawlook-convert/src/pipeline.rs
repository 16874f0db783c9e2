//! The conversion pipeline.
//!
//! One conversion walks a fixed sequence of stages over a property source.
//! Each stage reads the develop parameters it cares about, maps them into
//! filter space, and either appends filter descriptors to the document or
//! mutates one of the two shared accumulators (master tone curve, color
//! bands). Stages never look at each other's output; the only cross-stage
//! coupling is through the accumulators, which are emitted once near the
//! end. Grayscale and vignette always come last.
//!
//! Stage failures are local: a malformed curve point or a fit with too few
//! points logs a warning, leaves the accumulator untouched, and the
//! pipeline keeps going. A conversion therefore always yields a document,
//! possibly with fewer filters than the sidecar implied.

use rawlook_core::{FilterDescriptor, FilterParameter, PresetDocument, PropertySource};
use rawlook_math::{apply_constrained, is_noop, NOOP_THRESHOLD};
use tracing::{debug, warn};

use crate::bands::{Band, ColorBandState};
use crate::curve::{self, CurveState, ToneCurve};
use crate::error::ConvertResult;
use crate::{filters, keys};

/// Named white-balance presets: `(name, temperature, tint)`.
///
/// "As Shot", "Auto" and "Custom" are handled before this table is
/// consulted.
const WHITE_BALANCE_PRESETS: &[(&str, f64, f64)] = &[
    ("Daylight", 5500.0, 10.0),
    ("Cloudy", 6500.0, 10.0),
    ("Shade", 7500.0, 10.0),
    ("Tungsten", 2850.0, 0.0),
    ("Fluorescent", 3800.0, 21.0),
    ("Flash", 5500.0, 0.0),
];

/// Properties that mark an automatically adjusted develop.
const AUTO_KEYS: [&str; 4] = [
    "AutoExposure",
    "AutoBrightness",
    "AutoContrast",
    "AutoShadows",
];

/// Ceiling for custom white-balance temperature, kelvin.
const MAX_TEMPERATURE: f64 = 10000.0;
/// Temperature used when "Custom" gives none.
const DEFAULT_TEMPERATURE: f64 = 6500.0;
/// Grain size when the sidecar only sets the amount.
const DEFAULT_GRAIN_SIZE: f64 = 0.5;
/// Minimum spacing kept between neighboring tone-curve points.
const MIN_POINT_GAP: f64 = 10.0;
/// x-domain of sidecar curve point arrays.
const CURVE_X_MAX: f64 = 255.0;

/// Converts one property source into a preset document.
///
/// `key` becomes the document's preset key, typically the sidecar file
/// stem. The conversion is a pure, deterministic, single pass; all
/// accumulator state lives in this call.
///
/// # Example
///
/// ```
/// use rawlook_core::PropertyMap;
/// use rawlook_convert::convert;
///
/// let props = PropertyMap::new().with("Exposure2012", "+0.50");
/// let doc = convert(&props, "half_stop");
/// assert_eq!(doc.filters[0].key, "CIExposureAdjust");
/// ```
pub fn convert(props: &dyn PropertySource, key: &str) -> PresetDocument {
    let mut p = Pipeline {
        props,
        doc: PresetDocument::new(key),
        curve: CurveState::new(),
        bands: ColorBandState::new(),
    };

    p.stage_info();
    p.stage_auto_adjust();
    p.stage_white_balance();
    p.stage_exposure();
    p.stage_contrast();
    p.stage_tone_endpoints();
    p.stage_clarity();
    p.stage_vibrance();
    p.stage_saturation();
    p.stage_parametric_curve();
    p.stage_tone_curve();
    p.stage_hsv_bands();
    p.stage_split_toning();
    p.stage_sharpening();
    p.stage_calibration_bands();
    p.stage_channel_curves();
    p.stage_grain();
    p.emit_color_bands();
    p.emit_tone_curve();
    p.stage_grayscale();
    p.stage_vignette();

    debug!(key, filters = p.doc.len(), "conversion complete");
    p.doc
}

/// One in-flight conversion: the property source, the growing document,
/// and the two accumulators the stages share.
struct Pipeline<'a> {
    props: &'a dyn PropertySource,
    doc: PresetDocument,
    curve: CurveState,
    bands: ColorBandState,
}

impl Pipeline<'_> {
    // ------------------------------------------------------------------
    // Metadata and global switches
    // ------------------------------------------------------------------

    fn stage_info(&mut self) {
        self.doc.info.name = self.props.localized_text("Name", "", "x-default");
        self.doc.info.group = self
            .props
            .localized_text("Group", "", "x-default")
            .or_else(|| self.props.string("Cluster"))
            .filter(|s| !s.is_empty());
    }

    fn stage_auto_adjust(&mut self) {
        if AUTO_KEYS
            .iter()
            .any(|k| self.props.boolean(k) == Some(true))
        {
            debug!("auto-adjust flag set");
            self.doc.push(FilterDescriptor::new(filters::AUTO_ADJUST));
        }
    }

    fn stage_white_balance(&mut self) {
        let Some(mode) = self.props.string("WhiteBalance") else {
            return;
        };
        match mode.as_str() {
            // The camera's own white balance needs no correction.
            "As Shot" => {}
            "Auto" => self.doc.push(FilterDescriptor::new(filters::AUTO_ADJUST)),
            "Custom" => {
                let temperature = self
                    .props
                    .float("Temperature")
                    .unwrap_or(DEFAULT_TEMPERATURE)
                    .min(MAX_TEMPERATURE);
                let tint = self.props.float("Tint").unwrap_or(0.0).clamp(-100.0, 100.0);
                self.push_white_balance(temperature, tint);
            }
            name => match WHITE_BALANCE_PRESETS.iter().find(|(n, ..)| *n == name) {
                Some(&(_, temperature, tint)) => self.push_white_balance(temperature, tint),
                None => warn!(preset = name, "unknown white balance preset"),
            },
        }
    }

    fn push_white_balance(&mut self, temperature: f64, tint: f64) {
        self.doc.push(
            FilterDescriptor::new(filters::WHITE_BALANCE)
                .with(FilterParameter::scalar(filters::INPUT_TEMPERATURE, temperature))
                .with(FilterParameter::scalar(filters::INPUT_TINT, tint)),
        );
    }

    // ------------------------------------------------------------------
    // Global tonal adjustments
    // ------------------------------------------------------------------

    fn stage_exposure(&mut self) {
        let Some(ev) = keys::float(self.props, keys::EXPOSURE) else {
            return;
        };
        if is_noop(ev) {
            return;
        }
        self.doc.push(
            FilterDescriptor::new(filters::EXPOSURE)
                .with(FilterParameter::scalar(filters::INPUT_EV, ev.clamp(-5.0, 5.0))),
        );
    }

    fn stage_contrast(&mut self) {
        let Some(v) = keys::float(self.props, keys::CONTRAST) else {
            return;
        };
        if is_noop(v) {
            return;
        }
        let v = v.clamp(-50.0, 100.0);
        let scale = if v < 0.0 {
            1.0 + v * 0.75 / 50.0
        } else {
            1.0 + v * 3.0 / 100.0
        };
        let scale = scale.clamp(0.25, 4.0);
        if scale < 1.0 {
            // The builtin filter cannot reduce contrast below 1.0; lift the
            // shadow point instead.
            warn!(contrast = v, "negative contrast folded into tone curve");
            let y = self.curve.curve.y(curve::SHADOWS);
            self.curve
                .curve
                .set_y(curve::SHADOWS, (y * (1.0 + v / 100.0)).clamp(1.0, 99.0));
            self.curve.mark_dirty();
        } else if scale > 1.0 + NOOP_THRESHOLD {
            self.doc.push(
                FilterDescriptor::new(filters::CONTRAST)
                    .with(FilterParameter::scalar(filters::INPUT_CONTRAST, scale)),
            );
        }
    }

    /// Shadows/highlights/blacks/whites move their curve point's
    /// x-coordinate. A positive slider value brightens, which means the
    /// endpoint moves toward the dark side of the axis, hence `-v`. Bounds
    /// come from the neighboring points with a fixed gap so the curve's
    /// x-ordering invariant survives any slider combination.
    fn stage_tone_endpoints(&mut self) {
        let endpoints: [(&[&str], usize); 4] = [
            (keys::BLACKS, curve::BLACKS),
            (keys::SHADOWS, curve::SHADOWS),
            (keys::HIGHLIGHTS, curve::HIGHLIGHTS),
            (keys::WHITES, curve::WHITES),
        ];
        for (prop, i) in endpoints {
            let Some(v) = keys::float(self.props, prop) else {
                continue;
            };
            if is_noop(v) {
                continue;
            }
            let c = &self.curve.curve;
            let (lower, upper) = match i {
                curve::BLACKS => (0.0, c.x(curve::SHADOWS) - MIN_POINT_GAP),
                curve::SHADOWS => (
                    c.x(curve::BLACKS) + MIN_POINT_GAP,
                    c.x(curve::MIDTONE) - MIN_POINT_GAP,
                ),
                curve::HIGHLIGHTS => (
                    c.x(curve::MIDTONE) + MIN_POINT_GAP,
                    c.x(curve::WHITES) - MIN_POINT_GAP,
                ),
                _ => (c.x(curve::HIGHLIGHTS) + MIN_POINT_GAP, 100.0),
            };
            let current = c.x(i);
            let moved = apply_constrained(current, -v, upper, lower);
            if (moved - current).abs() > NOOP_THRESHOLD {
                self.curve.curve.set_x(i, moved);
                self.curve.mark_dirty();
            }
        }
    }

    fn stage_clarity(&mut self) {
        let Some(v) = keys::float(self.props, keys::CLARITY) else {
            return;
        };
        if is_noop(v) {
            return;
        }
        self.doc.push(
            FilterDescriptor::new(filters::CLARITY)
                .with(FilterParameter::scalar(filters::INPUT_CLARITY, v / 100.0)),
        );
    }

    fn stage_vibrance(&mut self) {
        let Some(v) = self.props.float("Vibrance") else {
            return;
        };
        if is_noop(v) {
            return;
        }
        self.doc.push(
            FilterDescriptor::new(filters::VIBRANCE)
                .with(FilterParameter::scalar(filters::INPUT_AMOUNT, v / 100.0)),
        );
    }

    fn stage_saturation(&mut self) {
        let Some(v) = self.props.float("Saturation") else {
            return;
        };
        if is_noop(v) {
            return;
        }
        self.doc.push(
            FilterDescriptor::new(filters::SATURATION).with(FilterParameter::scalar(
                filters::INPUT_SATURATION,
                (v / 100.0 + 1.0).clamp(0.0, 2.0),
            )),
        );
    }

    // ------------------------------------------------------------------
    // Curve stages
    // ------------------------------------------------------------------

    /// Parametric adjustments: split properties place the interior points'
    /// x-coordinates directly; zone properties move y-coordinates with
    /// bounded deltas. All changes are staged on a copy and only land if
    /// they add up to something measurable.
    fn stage_parametric_curve(&mut self) {
        if self.props.exists("ParametricDarks") {
            warn!("ParametricDarks is not supported, ignoring");
        }

        let mut staged = self.curve.curve;
        let mut total = 0.0;

        let splits = [
            ("ParametricShadowSplit", curve::SHADOWS),
            ("ParametricMidtoneSplit", curve::MIDTONE),
            ("ParametricHighlightSplit", curve::HIGHLIGHTS),
        ];
        for (key, i) in splits {
            if let Some(v) = self.props.float(key) {
                let v = v.clamp(0.0, 100.0);
                total += (v - staged.x(i)).abs();
                staged.set_x(i, v);
            }
        }

        let zones = [
            ("ParametricShadows", curve::SHADOWS),
            ("ParametricLights", curve::HIGHLIGHTS),
            ("ParametricHighlights", curve::WHITES),
        ];
        for (key, i) in zones {
            let Some(v) = self.props.float(key) else {
                continue;
            };
            let (lower, upper) = match i {
                curve::SHADOWS => (
                    staged.y(curve::BLACKS) + MIN_POINT_GAP,
                    staged.y(curve::MIDTONE) - MIN_POINT_GAP,
                ),
                curve::HIGHLIGHTS => (
                    staged.y(curve::MIDTONE) + MIN_POINT_GAP,
                    staged.y(curve::WHITES) - MIN_POINT_GAP,
                ),
                _ => (staged.y(curve::HIGHLIGHTS) + MIN_POINT_GAP, 100.0),
            };
            let current = staged.y(i);
            let moved = apply_constrained(current, v, upper, lower);
            total += (moved - current).abs();
            staged.set_y(i, moved);
        }

        if total > NOOP_THRESHOLD {
            self.curve.curve = staged;
            self.curve.mark_dirty();
        }
    }

    /// An explicit tone curve replaces the accumulated one wholesale: a
    /// named preset first, then a raw point array, which wins when both
    /// are present.
    fn stage_tone_curve(&mut self) {
        if let Some(name) = keys::string(self.props, keys::TONE_CURVE_NAME) {
            match name.as_str() {
                "Medium Contrast" => self.curve.replace(ToneCurve::MEDIUM_CONTRAST),
                "Strong Contrast" => self.curve.replace(ToneCurve::STRONG_CONTRAST),
                "Linear" => {}
                other => debug!(preset = other, "unknown tone curve preset name"),
            }
        }

        let Some(key) = keys::resolve(self.props, keys::TONE_CURVE) else {
            return;
        };
        match self
            .read_points(key)
            .and_then(|pts| ToneCurve::fit(key, &pts, CURVE_X_MAX))
        {
            Ok(curve) => self.curve.replace(curve),
            Err(e) => warn!(error = %e, "tone curve left unchanged"),
        }
    }

    fn stage_channel_curves(&mut self) {
        let channels: [(&str, &[&str]); 3] = [
            ("Red", keys::TONE_CURVE_RED),
            ("Green", keys::TONE_CURVE_GREEN),
            ("Blue", keys::TONE_CURVE_BLUE),
        ];
        let mut ordinates = [curve::ABSCISSAS; 3];
        let mut usable = [0usize; 3];

        for (i, (_, prop)) in channels.iter().enumerate() {
            let Some(key) = keys::resolve(self.props, prop) else {
                continue;
            };
            let pts = match self.read_points(key) {
                Ok(pts) => pts,
                Err(e) => {
                    warn!(error = %e, "channel curve left at identity");
                    continue;
                }
            };
            if pts.len() < 2 {
                continue;
            }
            match curve::fit_channel_ordinates(key, &pts, CURVE_X_MAX) {
                Ok(ys) => {
                    ordinates[i] = ys;
                    usable[i] = pts.len();
                }
                Err(e) => warn!(error = %e, "channel curve left at identity"),
            }
        }

        if usable.iter().all(|&n| n < 3) {
            debug!("channel curves suppressed, no channel has 3 or more points");
            return;
        }

        let mut filter = FilterDescriptor::new(filters::RGB_CHANNEL_CURVE);
        for (i, (channel, _)) in channels.iter().enumerate() {
            filter = filter
                .with(FilterParameter::vector(
                    filters::channel_xvalues(channel),
                    curve::ABSCISSAS.to_vec(),
                ))
                .with(FilterParameter::vector(
                    filters::channel_yvalues(channel),
                    ordinates[i].to_vec(),
                ));
        }
        self.doc.push(filter);
    }

    fn read_points(&self, key: &str) -> ConvertResult<Vec<(f64, f64)>> {
        let len = self.props.array_len(key).unwrap_or(0);
        let items: Vec<String> = (0..len)
            .filter_map(|i| self.props.array_item(key, i))
            .collect();
        curve::parse_points(key, &items)
    }

    // ------------------------------------------------------------------
    // Color band stages
    // ------------------------------------------------------------------

    fn stage_hsv_bands(&mut self) {
        for band in Band::ALL {
            let name = band.name();
            if let Some(v) = self.props.float(&format!("HueAdjustment{name}")) {
                self.bands.add_hue(band, v);
            }
            if let Some(v) = self.props.float(&format!("SaturationAdjustment{name}")) {
                self.bands.add_saturation(band, v);
            }
            if let Some(v) = self.props.float(&format!("LuminanceAdjustment{name}")) {
                self.bands.add_luminance(band, v);
            }
        }
    }

    /// Legacy camera-calibration sliders only exist for the primaries.
    fn stage_calibration_bands(&mut self) {
        for band in [Band::Red, Band::Green, Band::Blue] {
            let name = band.name();
            if let Some(v) = self.props.float(&format!("{name}Hue")) {
                self.bands.add_hue(band, v);
            }
            if let Some(v) = self.props.float(&format!("{name}Saturation")) {
                self.bands.add_saturation(band, v);
            }
        }
    }

    // ------------------------------------------------------------------
    // Remaining effect stages
    // ------------------------------------------------------------------

    fn stage_split_toning(&mut self) {
        let shadow_hue = self.props.float("SplitToningShadowHue").unwrap_or(0.0);
        let shadow_sat = self
            .props
            .float("SplitToningShadowSaturation")
            .unwrap_or(0.0);
        let highlight_hue = self.props.float("SplitToningHighlightHue").unwrap_or(0.0);
        let highlight_sat = self
            .props
            .float("SplitToningHighlightSaturation")
            .unwrap_or(0.0);
        if [shadow_hue, shadow_sat, highlight_hue, highlight_sat]
            .iter()
            .all(|&v| is_noop(v))
        {
            return;
        }
        self.doc.push(
            FilterDescriptor::new(filters::SPLIT_TONING)
                .with(FilterParameter::scalar(
                    filters::INPUT_SHADOW_HUE,
                    shadow_hue / 360.0,
                ))
                .with(FilterParameter::scalar(
                    filters::INPUT_SHADOW_SATURATION,
                    shadow_sat / 100.0,
                ))
                .with(FilterParameter::scalar(
                    filters::INPUT_HIGHLIGHT_HUE,
                    highlight_hue / 360.0,
                ))
                .with(FilterParameter::scalar(
                    filters::INPUT_HIGHLIGHT_SATURATION,
                    highlight_sat / 100.0,
                )),
        );
    }

    fn stage_sharpening(&mut self) {
        let Some(v) = self.props.float("Sharpness") else {
            return;
        };
        if is_noop(v) {
            return;
        }
        self.doc.push(
            FilterDescriptor::new(filters::SHARPEN).with(FilterParameter::scalar(
                filters::INPUT_SHARPNESS,
                (v / 50.0).clamp(0.0, 2.0),
            )),
        );
    }

    fn stage_grain(&mut self) {
        let Some(amount) = self.props.float("GrainAmount") else {
            return;
        };
        if is_noop(amount) {
            return;
        }
        let size = self
            .props
            .float("GrainSize")
            .map(|v| v / 100.0)
            .unwrap_or(DEFAULT_GRAIN_SIZE);
        self.doc.push(
            FilterDescriptor::new(filters::GRAIN)
                .with(FilterParameter::scalar(filters::INPUT_AMOUNT, amount / 100.0))
                .with(FilterParameter::scalar(filters::INPUT_SIZE, size)),
        );
    }

    fn stage_grayscale(&mut self) {
        if self.props.boolean("ConvertToGrayscale") == Some(true) {
            self.doc.push(FilterDescriptor::new(filters::GRAYSCALE));
        }
    }

    fn stage_vignette(&mut self) {
        let Some(amount) = self.props.float("PostCropVignetteAmount") else {
            return;
        };
        if is_noop(amount) {
            return;
        }
        let radius = self
            .props
            .float("PostCropVignetteMidpoint")
            .map(|v| v / 100.0)
            .unwrap_or(0.5);
        self.doc.push(
            FilterDescriptor::new(filters::VIGNETTE)
                // Replayer rescales the center into image space.
                .with(FilterParameter::position2(filters::INPUT_CENTER, 0.5, 0.5))
                .with(FilterParameter::distance(filters::INPUT_RADIUS, radius))
                .with(FilterParameter::scalar(
                    filters::INPUT_INTENSITY,
                    -amount / 100.0,
                )),
        );
    }

    // ------------------------------------------------------------------
    // Accumulator emission
    // ------------------------------------------------------------------

    fn emit_color_bands(&mut self) {
        let Some(bands) = self.bands.settle() else {
            return;
        };
        let mut filter = FilterDescriptor::new(filters::MULTI_BAND_HSV);
        for (band, adjust) in Band::ALL.iter().zip(bands) {
            filter = filter.with(FilterParameter::position3(
                filters::band_shift(band.name()),
                [adjust.hue, adjust.sat, adjust.lum],
            ));
        }
        self.doc.push(filter);
    }

    fn emit_tone_curve(&mut self) {
        if !self.curve.is_dirty() {
            return;
        }
        let mut filter = FilterDescriptor::new(filters::TONE_CURVE);
        for (i, (x, y)) in self.curve.curve.unit_points().into_iter().enumerate() {
            filter = filter.with(FilterParameter::offset2(filters::curve_point(i), x, y));
        }
        self.doc.push(filter);
    }
}
