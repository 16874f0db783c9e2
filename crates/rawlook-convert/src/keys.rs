//! Develop-property keys and legacy/current fallback.
//!
//! Many semantic parameters exist under two property keys: a legacy name
//! (`"Contrast"`) and a process-version-2012 name (`"Contrast2012"`).
//! Precedence is fixed: if the legacy key exists it is used and the 2012
//! variant is never consulted for that parameter — even when the legacy
//! value turns out to be a no-op or unparseable. The fallback tables here
//! encode that once, instead of per-stage branching.

use rawlook_core::PropertySource;

/// Exposure in EV, `[-5, 5]`.
pub const EXPOSURE: &[&str] = &["Exposure", "Exposure2012"];
/// Contrast slider, `[-50, 100]`.
pub const CONTRAST: &[&str] = &["Contrast", "Contrast2012"];
/// Blacks endpoint slider, `[-100, 100]`.
pub const BLACKS: &[&str] = &["Blacks", "Blacks2012"];
/// Shadows endpoint slider, `[-100, 100]`.
pub const SHADOWS: &[&str] = &["Shadows", "Shadows2012"];
/// Highlights endpoint slider, `[-100, 100]`.
pub const HIGHLIGHTS: &[&str] = &["Highlights", "Highlights2012"];
/// Whites endpoint slider, `[-100, 100]`.
pub const WHITES: &[&str] = &["Whites", "Whites2012"];
/// Clarity slider, `[-100, 100]`.
pub const CLARITY: &[&str] = &["Clarity", "Clarity2012"];
/// Named tone-curve preset ("Medium Contrast", "Strong Contrast").
pub const TONE_CURVE_NAME: &[&str] = &["ToneCurveName", "ToneCurveName2012"];
/// Master tone-curve point array.
pub const TONE_CURVE: &[&str] = &["ToneCurve", "ToneCurvePV2012"];
/// Red-channel curve point array.
pub const TONE_CURVE_RED: &[&str] = &["ToneCurveRed", "ToneCurvePV2012Red"];
/// Green-channel curve point array.
pub const TONE_CURVE_GREEN: &[&str] = &["ToneCurveGreen", "ToneCurvePV2012Green"];
/// Blue-channel curve point array.
pub const TONE_CURVE_BLUE: &[&str] = &["ToneCurveBlue", "ToneCurvePV2012Blue"];

/// Resolves an ordered fallback list to the first key that exists.
///
/// Existence alone decides: the chosen key's value may still fail to parse,
/// in which case the parameter is treated as absent rather than falling
/// through to a later key.
pub fn resolve<'k>(props: &dyn PropertySource, keys: &[&'k str]) -> Option<&'k str> {
    keys.iter().copied().find(|k| props.exists(k))
}

/// Reads a numeric parameter through its fallback list.
pub fn float(props: &dyn PropertySource, keys: &[&str]) -> Option<f64> {
    props.float(resolve(props, keys)?)
}

/// Reads a text parameter through its fallback list.
pub fn string(props: &dyn PropertySource, keys: &[&str]) -> Option<String> {
    props.string(resolve(props, keys)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rawlook_core::PropertyMap;

    #[test]
    fn test_legacy_key_wins() {
        let props = PropertyMap::new()
            .with("Contrast", "25")
            .with("Contrast2012", "80");
        assert_eq!(resolve(&props, CONTRAST), Some("Contrast"));
        assert_eq!(float(&props, CONTRAST), Some(25.0));
    }

    #[test]
    fn test_falls_back_to_2012_key() {
        let props = PropertyMap::new().with("Contrast2012", "80");
        assert_eq!(float(&props, CONTRAST), Some(80.0));
    }

    #[test]
    fn test_legacy_noop_still_shadows_2012() {
        // Legacy exists with a useless value; the 2012 key is not consulted.
        let props = PropertyMap::new()
            .with("Exposure", "0")
            .with("Exposure2012", "1.5");
        assert_eq!(float(&props, EXPOSURE), Some(0.0));

        let unparseable = PropertyMap::new()
            .with("Exposure", "n/a")
            .with("Exposure2012", "1.5");
        assert_eq!(float(&unparseable, EXPOSURE), None);
    }

    #[test]
    fn test_absent_everywhere() {
        let props = PropertyMap::new();
        assert_eq!(resolve(&props, EXPOSURE), None);
        assert_eq!(float(&props, EXPOSURE), None);
        assert_eq!(string(&props, TONE_CURVE_NAME), None);
    }
}
