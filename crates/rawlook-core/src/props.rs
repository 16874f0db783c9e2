//! Property access for develop settings.
//!
//! Develop parameters arrive as a flat set of named properties in a single
//! fixed namespace. [`PropertySource`] is the capability trait the engine
//! queries them through; the sidecar parser implements it over parsed XMP,
//! and [`PropertyMap`] implements it over plain maps for programmatic
//! presets and tests.
//!
//! Absence is not an error: every accessor returns `Option`, and a stage
//! that finds `None` simply skips itself.

use std::collections::BTreeMap;

/// Capability-style accessor over a flat develop-property set.
///
/// `float` and `boolean` have default implementations on top of
/// [`string`](PropertySource::string): values are stored as text in the
/// sidecar (`"+0.50"`, `"True"`), so parsing lives here once.
pub trait PropertySource {
    /// Returns `true` if the property exists, regardless of its shape.
    fn exists(&self, key: &str) -> bool;

    /// Reads a simple text property.
    fn string(&self, key: &str) -> Option<String>;

    /// Reads a localized-text property.
    ///
    /// Selection order: item matching `specific` exactly, then `generic`
    /// exactly, then `x-default`, then the first item.
    fn localized_text(&self, key: &str, generic: &str, specific: &str) -> Option<String>;

    /// Number of items in an array property, if the property is an array.
    fn array_len(&self, key: &str) -> Option<usize>;

    /// Reads one item of an array property (zero-based).
    fn array_item(&self, key: &str, index: usize) -> Option<String>;

    /// Reads a numeric property.
    ///
    /// Returns `None` when the property is absent or its text does not
    /// parse as a number (sidecars write signed values like `"+0.50"`,
    /// which parse directly).
    fn float(&self, key: &str) -> Option<f64> {
        self.string(key).and_then(|s| s.trim().parse().ok())
    }

    /// Reads a boolean property (`"True"` / `"False"`, case-insensitive).
    fn boolean(&self, key: &str) -> Option<bool> {
        let s = self.string(key)?;
        let s = s.trim();
        if s.eq_ignore_ascii_case("true") {
            Some(true)
        } else if s.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

/// Selects one item from a localized-text alternative list.
///
/// Items are `(language, text)` pairs in document order. Shared by every
/// [`PropertySource`] implementation in the workspace.
pub fn select_localized<'a>(
    items: &'a [(String, String)],
    generic: &str,
    specific: &str,
) -> Option<&'a str> {
    let by_lang = |lang: &str| {
        items
            .iter()
            .find(|(l, _)| l == lang)
            .map(|(_, t)| t.as_str())
    };
    if !specific.is_empty() {
        if let Some(t) = by_lang(specific) {
            return Some(t);
        }
    }
    if !generic.is_empty() {
        if let Some(t) = by_lang(generic) {
            return Some(t);
        }
    }
    by_lang("x-default").or_else(|| items.first().map(|(_, t)| t.as_str()))
}

/// An in-memory [`PropertySource`].
///
/// Useful for building presets programmatically and as a test double. Keys
/// are stored without any namespace prefix, exactly as the engine queries
/// them.
///
/// # Example
///
/// ```
/// use rawlook_core::{PropertyMap, PropertySource};
///
/// let props = PropertyMap::new()
///     .with("Exposure2012", "+0.50")
///     .with("ConvertToGrayscale", "True");
/// assert_eq!(props.float("Exposure2012"), Some(0.5));
/// assert_eq!(props.boolean("ConvertToGrayscale"), Some(true));
/// assert_eq!(props.float("Contrast2012"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    values: BTreeMap<String, String>,
    arrays: BTreeMap<String, Vec<String>>,
    localized: BTreeMap<String, Vec<(String, String)>>,
}

impl PropertyMap {
    /// Creates an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a text property, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Inserts an array property, replacing any previous value.
    pub fn insert_array(&mut self, key: impl Into<String>, items: Vec<String>) {
        self.arrays.insert(key.into(), items);
    }

    /// Appends one language alternative to a localized-text property.
    pub fn insert_localized(
        &mut self,
        key: impl Into<String>,
        lang: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.localized
            .entry(key.into())
            .or_default()
            .push((lang.into(), text.into()));
    }

    /// All property keys in sorted order, across every shape.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .values
            .keys()
            .chain(self.arrays.keys())
            .chain(self.localized.keys())
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Number of distinct properties.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// Returns `true` if no properties are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.arrays.is_empty() && self.localized.is_empty()
    }

    /// Adds a text property.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Adds an array property.
    #[must_use]
    pub fn with_array<I, S>(mut self, key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arrays
            .insert(key.into(), items.into_iter().map(Into::into).collect());
        self
    }

    /// Adds one language alternative of a localized-text property.
    #[must_use]
    pub fn with_localized(
        mut self,
        key: impl Into<String>,
        lang: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.localized
            .entry(key.into())
            .or_default()
            .push((lang.into(), text.into()));
        self
    }
}

impl PropertySource for PropertyMap {
    fn exists(&self, key: &str) -> bool {
        self.values.contains_key(key)
            || self.arrays.contains_key(key)
            || self.localized.contains_key(key)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn localized_text(&self, key: &str, generic: &str, specific: &str) -> Option<String> {
        let items = self.localized.get(key)?;
        select_localized(items, generic, specific).map(str::to_string)
    }

    fn array_len(&self, key: &str) -> Option<usize> {
        self.arrays.get(key).map(Vec::len)
    }

    fn array_item(&self, key: &str, index: usize) -> Option<String> {
        self.arrays.get(key)?.get(index).cloned()
    }
}
