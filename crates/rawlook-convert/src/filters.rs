//! Downstream filter vocabulary.
//!
//! Registry keys and parameter names of the filters the replayer
//! understands. These strings are wire format: the replayer looks filters
//! up by key and binds parameters by name, so they must not drift.

/// Exposure adjustment filter.
pub const EXPOSURE: &str = "CIExposureAdjust";
/// Exposure EV parameter.
pub const INPUT_EV: &str = "inputEV";

/// White balance filter.
pub const WHITE_BALANCE: &str = "WhiteBalanceFilter";
/// Color temperature in kelvin.
pub const INPUT_TEMPERATURE: &str = "inputTemperature";
/// Green-magenta tint.
pub const INPUT_TINT: &str = "inputTint";

/// Parameterless automatic adjustment filter.
pub const AUTO_ADJUST: &str = "AutoAdjustFilter";

/// Contrast filter.
pub const CONTRAST: &str = "ContrastFilter";
/// Contrast scale parameter.
pub const INPUT_CONTRAST: &str = "inputContrast";

/// Clarity (local contrast) filter.
pub const CLARITY: &str = "ClarityFilter";
/// Clarity amount parameter.
pub const INPUT_CLARITY: &str = "inputClarity";

/// Vibrance filter.
pub const VIBRANCE: &str = "CIVibrance";
/// Vibrance amount parameter.
pub const INPUT_AMOUNT: &str = "inputAmount";

/// Saturation filter.
pub const SATURATION: &str = "SaturationFilter";
/// Saturation multiplier parameter.
pub const INPUT_SATURATION: &str = "inputSaturation";

/// Master tone-curve filter.
pub const TONE_CURVE: &str = "CIToneCurve";

/// Per-band HSV filter.
pub const MULTI_BAND_HSV: &str = "MultiBandHSV";

/// Split-toning filter.
pub const SPLIT_TONING: &str = "SplitToningFilter";
/// Shadow tint hue, `[0, 1]`.
pub const INPUT_SHADOW_HUE: &str = "inputShadowHue";
/// Shadow tint saturation, `[0, 1]`.
pub const INPUT_SHADOW_SATURATION: &str = "inputShadowSaturation";
/// Highlight tint hue, `[0, 1]`.
pub const INPUT_HIGHLIGHT_HUE: &str = "inputHighlightHue";
/// Highlight tint saturation, `[0, 1]`.
pub const INPUT_HIGHLIGHT_SATURATION: &str = "inputHighlightSaturation";

/// Luminance sharpening filter.
pub const SHARPEN: &str = "CISharpenLuminance";
/// Sharpening amount parameter.
pub const INPUT_SHARPNESS: &str = "inputSharpness";

/// Independent per-channel tone-curve filter.
pub const RGB_CHANNEL_CURVE: &str = "RGBChannelToneCurve";

/// Film grain filter.
pub const GRAIN: &str = "GrainFilter";
/// Grain particle size parameter.
pub const INPUT_SIZE: &str = "inputSize";

/// Monochrome conversion filter.
pub const GRAYSCALE: &str = "CIPhotoEffectMono";

/// Post-crop vignette filter.
pub const VIGNETTE: &str = "CIVignetteEffect";
/// Vignette center, image-relative.
pub const INPUT_CENTER: &str = "inputCenter";
/// Vignette radius, image-relative distance.
pub const INPUT_RADIUS: &str = "inputRadius";
/// Vignette darkening/lightening intensity.
pub const INPUT_INTENSITY: &str = "inputIntensity";

/// Tone-curve point parameter name for position `i` (`inputPoint0`..`4`).
pub fn curve_point(i: usize) -> String {
    format!("inputPoint{i}")
}

/// Per-band shift parameter name (`inputRedShift`..`inputMagentaShift`).
pub fn band_shift(band: &str) -> String {
    format!("input{band}Shift")
}

/// Channel-curve x-grid parameter name (`inputRedXvalues`, ...).
pub fn channel_xvalues(channel: &str) -> String {
    format!("input{channel}Xvalues")
}

/// Channel-curve ordinate parameter name (`inputRedYvalues`, ...).
pub fn channel_yvalues(channel: &str) -> String {
    format!("input{channel}Yvalues")
}
