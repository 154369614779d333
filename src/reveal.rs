//! Reveal-on-scroll styling: class names and per-element transition overrides.

/// Elements handled by the reveal widget.
pub const REVEAL_SELECTOR: &str = ".reveal";

/// Class added to an element once it has entered the viewport.
pub const VISIBLE_CLASS: &str = "is-visible";

/// Class added to the document root once the widget is initialised.
pub const READY_CLASS: &str = "ccreveal-ready";

/// Transition overrides taken from `data-duration`, `data-delay`,
/// `data-distance` and `data-ease`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealStyle {
    /// Transition duration in milliseconds
    pub duration: Option<String>,
    /// Transition delay in milliseconds
    pub delay: Option<String>,
    /// Slide distance in pixels
    pub distance: Option<String>,
    /// CSS easing function, passed through verbatim
    pub ease: Option<String>,
}

impl RevealStyle {
    /// Read overrides from a dataset-style lookup. Empty values are ignored.
    pub fn from_dataset<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            duration: get("duration"),
            delay: get("delay"),
            distance: get("distance"),
            ease: get("ease"),
        }
    }

    /// CSS custom properties to set on the element, as `(name, value)` pairs.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use ccreveal_core::RevealStyle;
    ///
    /// let style = RevealStyle {
    ///     duration: Some("900".into()),
    ///     distance: Some("24".into()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     style.css_properties(),
    ///     vec![
    ///         ("--reveal-duration", "900ms".to_string()),
    ///         ("--reveal-distance", "24px".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn css_properties(&self) -> Vec<(&'static str, String)> {
        let mut props = Vec::with_capacity(4);
        if let Some(duration) = &self.duration {
            props.push(("--reveal-duration", format!("{duration}ms")));
        }
        if let Some(delay) = &self.delay {
            props.push(("--reveal-delay", format!("{delay}ms")));
        }
        if let Some(distance) = &self.distance {
            props.push(("--reveal-distance", format!("{distance}px")));
        }
        if let Some(ease) = &self.ease {
            props.push(("--reveal-ease", ease.clone()));
        }
        props
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.duration.is_none() && self.delay.is_none() && self.distance.is_none() && self.ease.is_none()
    }
}

/// Whether every element should be revealed at once instead of on scroll.
///
/// This is the case under reduced motion, or when the platform has no
/// intersection observer to report visibility.
#[inline]
pub fn reveal_immediately(reduced_motion: bool, observer_supported: bool) -> bool {
    reduced_motion || !observer_supported
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn style_from_dataset() {
        let data = HashMap::from([
            ("duration", "900"),
            ("delay", ""),
            ("ease", "cubic-bezier(.2,.8,.2,1)"),
        ]);
        let style = RevealStyle::from_dataset(|k| data.get(k).map(|v| v.to_string()));
        assert_eq!(style.duration.as_deref(), Some("900"));
        assert_eq!(style.delay, None);
        assert_eq!(style.distance, None);
        assert_eq!(
            style.css_properties(),
            vec![
                ("--reveal-duration", "900ms".to_string()),
                ("--reveal-ease", "cubic-bezier(.2,.8,.2,1)".to_string()),
            ]
        );
    }

    #[test]
    fn empty_style() {
        let style = RevealStyle::from_dataset(|_| None);
        assert!(style.is_empty());
        assert!(style.css_properties().is_empty());
    }

    #[test]
    fn all_properties() {
        let style = RevealStyle {
            duration: Some("600".into()),
            delay: Some("120".into()),
            distance: Some("32".into()),
            ease: Some("ease-out".into()),
        };
        let names: Vec<_> = style.css_properties().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            ["--reveal-duration", "--reveal-delay", "--reveal-distance", "--reveal-ease"]
        );
    }

    #[test]
    fn immediate_reveal_fallback() {
        assert!(!reveal_immediately(false, true));
        assert!(reveal_immediately(true, true));
        assert!(reveal_immediately(false, false));
    }
}
