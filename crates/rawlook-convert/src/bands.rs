//! Per-color-band HSV accumulation.
//!
//! Eight fixed hue sectors, red through magenta, each carrying a
//! hue-shift / saturation-multiplier / luminance-multiplier triple. Two
//! independent stages feed the same accumulator: the modern per-band HSV
//! sliders cover all eight bands, the legacy camera-calibration sliders
//! only red, green and blue. Bands whose accumulated raw input stays under
//! the dead-band reset to the no-op triple so slider noise never reaches
//! the output.

use rawlook_math::NOOP_THRESHOLD;

/// One of the eight fixed color bands, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Reds.
    Red,
    /// Oranges.
    Orange,
    /// Yellows.
    Yellow,
    /// Greens.
    Green,
    /// Aquas / cyans.
    Aqua,
    /// Blues.
    Blue,
    /// Purples.
    Purple,
    /// Magentas.
    Magenta,
}

impl Band {
    /// All eight bands in the fixed red → magenta emission order.
    pub const ALL: [Band; 8] = [
        Band::Red,
        Band::Orange,
        Band::Yellow,
        Band::Green,
        Band::Aqua,
        Band::Blue,
        Band::Purple,
        Band::Magenta,
    ];

    /// The band name as spelled in property keys and parameter names.
    pub fn name(&self) -> &'static str {
        match self {
            Band::Red => "Red",
            Band::Orange => "Orange",
            Band::Yellow => "Yellow",
            Band::Green => "Green",
            Band::Aqua => "Aqua",
            Band::Blue => "Blue",
            Band::Purple => "Purple",
            Band::Magenta => "Magenta",
        }
    }

    #[inline]
    fn index(&self) -> usize {
        *self as usize
    }
}

/// One band's adjustment triple.
///
/// `hue` is a shift in hue-wheel fractions, `sat` and `lum` are
/// multipliers; the no-op triple is `(0, 1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandAdjust {
    /// Hue shift as a fraction of the wheel.
    pub hue: f64,
    /// Saturation multiplier.
    pub sat: f64,
    /// Luminance multiplier.
    pub lum: f64,
}

impl BandAdjust {
    /// The no-op triple.
    pub const IDENTITY: Self = Self {
        hue: 0.0,
        sat: 1.0,
        lum: 1.0,
    };
}

impl Default for BandAdjust {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Accumulator for all eight bands plus the raw-input bookkeeping that
/// drives the dead-band and emission rules.
#[derive(Debug, Clone)]
pub struct ColorBandState {
    bands: [BandAdjust; 8],
    // Sum of absolute raw slider magnitudes per band, for the dead-band.
    raw: [f64; 8],
    changed: bool,
}

impl ColorBandState {
    /// All bands at the no-op triple.
    pub fn new() -> Self {
        Self {
            bands: [BandAdjust::IDENTITY; 8],
            raw: [0.0; 8],
            changed: false,
        }
    }

    /// Adds a raw hue slider value in `[-100, 100]`.
    ///
    /// The slider spans one band's width of the wheel, an eighth of a full
    /// turn, so the shift is `(raw / 100) / 8`.
    pub fn add_hue(&mut self, band: Band, raw: f64) {
        let i = band.index();
        self.bands[i].hue += raw / 100.0 / 8.0;
        self.raw[i] += raw.abs();
        self.changed = true;
    }

    /// Adds a raw saturation slider value in `[-100, 100]`.
    pub fn add_saturation(&mut self, band: Band, raw: f64) {
        let i = band.index();
        self.bands[i].sat += raw / 100.0;
        self.raw[i] += raw.abs();
        self.changed = true;
    }

    /// Adds a raw luminance slider value in `[-100, 100]`.
    pub fn add_luminance(&mut self, band: Band, raw: f64) {
        let i = band.index();
        self.bands[i].lum += raw / 100.0;
        self.raw[i] += raw.abs();
        self.changed = true;
    }

    /// Whether any slider touched any band.
    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// One band's current triple, before dead-band settlement.
    pub fn band(&self, band: Band) -> BandAdjust {
        self.bands[band.index()]
    }

    /// Settles the accumulator for emission.
    ///
    /// Bands whose summed raw input is under the dead-band reset to the
    /// no-op triple. Returns the eight triples in emission order if the
    /// aggregate raw change across all bands clears the threshold, `None`
    /// if nothing worth emitting remains.
    pub fn settle(&mut self) -> Option<[BandAdjust; 8]> {
        for (adjust, &raw) in self.bands.iter_mut().zip(&self.raw) {
            if raw < NOOP_THRESHOLD {
                *adjust = BandAdjust::IDENTITY;
            }
        }
        let aggregate: f64 = self.raw.iter().sum();
        if self.changed && aggregate > NOOP_THRESHOLD {
            Some(self.bands)
        } else {
            None
        }
    }
}

impl Default for ColorBandState {
    fn default() -> Self {
        Self::new()
    }
}
