//! Per-element counter options and site-wide reveal settings.

/// Default counter animation length in milliseconds.
pub const DEFAULT_COUNT_DURATION_MS: f64 = 1200.0;

/// Default intersection ratio at which an element counts as visible.
pub const DEFAULT_THRESHOLD: f64 = 0.14;

/// Default observer root margin (trims the bottom 10% of the viewport).
pub const DEFAULT_ROOT_MARGIN: &str = "0px 0px -10% 0px";

/// Site-wide settings, typically loaded from a `reveal.toml`.
///
/// All fields are optional; missing values fall back to the built-in
/// defaults.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealSettings {
    /// Counter duration used when an element has no `data-count-duration`
    pub count_duration_ms: Option<f64>,
    /// Force the reduced-motion path regardless of the platform preference
    pub reduced_motion: Option<bool>,
    /// Visibility threshold handed to the intersection observer
    pub threshold: Option<f64>,
    /// Root margin handed to the intersection observer
    pub root_margin: Option<String>,
}

impl RevealSettings {
    /// Parse a `reveal.toml` string into `RevealSettings`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Counter duration, falling back to [`DEFAULT_COUNT_DURATION_MS`].
    pub fn count_duration_ms(&self) -> f64 {
        self.count_duration_ms
            .filter(|ms| ms.is_finite() && *ms >= 0.0)
            .unwrap_or(DEFAULT_COUNT_DURATION_MS)
    }

    /// Whether counters should skip straight to their final value.
    ///
    /// `platform` is the host's "prefers reduced motion" signal; the setting
    /// can only force reduced motion on, never off.
    pub fn reduced_motion(&self, platform: bool) -> bool {
        platform || self.reduced_motion.unwrap_or(false)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
            .filter(|t| (0.0..=1.0).contains(t))
            .unwrap_or(DEFAULT_THRESHOLD)
    }

    pub fn root_margin(&self) -> &str {
        self.root_margin.as_deref().unwrap_or(DEFAULT_ROOT_MARGIN)
    }
}

/// Counter configuration read from an element's data attributes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterOptions {
    /// Value the count starts from
    pub from: f64,
    /// Animation length in milliseconds
    pub duration_ms: f64,
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            from: 0.0,
            duration_ms: DEFAULT_COUNT_DURATION_MS,
        }
    }
}

impl CounterOptions {
    /// Read options from a dataset-style lookup (camelCase keys).
    ///
    /// Returns `None` when the element did not opt in with either a `from`
    /// or a `count` attribute.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use ccreveal_core::CounterOptions;
    ///
    /// let dataset = HashMap::from([("from", "10"), ("countDuration", "800")]);
    /// let options = CounterOptions::from_dataset(|key| dataset.get(key).map(|v| v.to_string()))
    ///     .unwrap();
    /// assert_eq!(options.from, 10.0);
    /// assert_eq!(options.duration_ms, 800.0);
    ///
    /// assert!(CounterOptions::from_dataset(|_| None).is_none());
    /// ```
    pub fn from_dataset<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_dataset_with(lookup, &RevealSettings::default())
    }

    /// Like [`CounterOptions::from_dataset`], with site-wide fallbacks.
    pub fn from_dataset_with<F>(lookup: F, settings: &RevealSettings) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_raw = lookup("from");
        if from_raw.is_none() && lookup("count").is_none() {
            return None;
        }

        let from = match from_raw.as_deref().map(str::trim) {
            None | Some("") => 0.0,
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    tracing::warn!("Ignoring invalid data-from value {:?}", raw);
                    0.0
                }
            },
        };

        let default_duration = settings.count_duration_ms();
        let duration_ms = match lookup("countDuration").as_deref().map(str::trim) {
            None | Some("") => default_duration,
            Some(raw) => match raw.parse::<f64>() {
                Ok(ms) if ms.is_finite() && ms >= 0.0 => ms,
                _ => {
                    tracing::warn!("Ignoring invalid data-count-duration value {:?}", raw);
                    default_duration
                }
            },
        };

        Some(Self { from, duration_ms })
    }
}
