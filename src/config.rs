//! Motion tunables, overridable through `data-*` attributes on the mount element.

use crate::counter::DEFAULT_COUNTER_DURATION_MS;
use crate::cursor::{DEFAULT_CURSOR_EASING, DEFAULT_TILT_MAX_DEGREES};
use crate::motion::HeroTweens;
use crate::reveal::RevealOptions;

const DEFAULT_NAV_SCROLLED_OFFSET: f64 = 50.0;

const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const REVEAL_MARGIN_BOUNDS: (f64, f64) = (0.0, 400.0);
const CURSOR_EASING_BOUNDS: (f64, f64) = (0.01, 1.0);
const COUNTER_DURATION_MS_BOUNDS: (f64, f64) = (0.0, 20_000.0);
const TILT_MAX_DEGREES_BOUNDS: (f64, f64) = (0.0, 45.0);
const NAV_SCROLLED_OFFSET_BOUNDS: (f64, f64) = (0.0, 2_000.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    pub reveal: RevealOptions,
    pub cursor_easing: f64,
    pub counter_duration_ms: f64,
    pub tilt_max_degrees: f64,
    pub nav_scrolled_offset: f64,
    pub hero: HeroTweens,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reveal: RevealOptions::default(),
            cursor_easing: DEFAULT_CURSOR_EASING,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            tilt_max_degrees: DEFAULT_TILT_MAX_DEGREES,
            nav_scrolled_offset: DEFAULT_NAV_SCROLLED_OFFSET,
            hero: HeroTweens::default(),
        }
    }
}

impl MotionConfig {
    /// `attribute` looks up a raw attribute value by its full name, e.g. `data-cursor-easing`.
    pub fn from_attributes(attribute: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |name: &str, default: f64, bounds: (f64, f64)| {
            parse_f64_with_bounds(attribute(name).as_deref(), default, bounds)
        };

        Self {
            reveal: RevealOptions {
                threshold: read(
                    "data-reveal-threshold",
                    defaults.reveal.threshold,
                    REVEAL_THRESHOLD_BOUNDS,
                ),
                bottom_margin: read(
                    "data-reveal-margin",
                    defaults.reveal.bottom_margin,
                    REVEAL_MARGIN_BOUNDS,
                ),
            },
            cursor_easing: read(
                "data-cursor-easing",
                defaults.cursor_easing,
                CURSOR_EASING_BOUNDS,
            ),
            counter_duration_ms: read(
                "data-counter-duration",
                defaults.counter_duration_ms,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            tilt_max_degrees: read(
                "data-tilt-max",
                defaults.tilt_max_degrees,
                TILT_MAX_DEGREES_BOUNDS,
            ),
            nav_scrolled_offset: read(
                "data-nav-offset",
                defaults.nav_scrolled_offset,
                NAV_SCROLLED_OFFSET_BOUNDS,
            ),
            hero: defaults.hero,
        }
    }
}

fn parse_f64_with_bounds(raw: Option<&str>, default: f64, bounds: (f64, f64)) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> MotionConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        MotionConfig::from_attributes(|name| attributes.get(name).cloned())
    }

    #[test]
    fn no_attributes_yields_defaults() {
        assert_eq!(config_from(&[]), MotionConfig::default());
    }

    #[test]
    fn valid_overrides_are_applied() {
        let config = config_from(&[
            ("data-reveal-threshold", "0.3"),
            ("data-reveal-margin", "80"),
            ("data-cursor-easing", " 0.2 "),
            ("data-counter-duration", "1500"),
            ("data-tilt-max", "12"),
            ("data-nav-offset", "0"),
        ]);

        assert_eq!(config.reveal.threshold, 0.3);
        assert_eq!(config.reveal.bottom_margin, 80.0);
        assert_eq!(config.cursor_easing, 0.2);
        assert_eq!(config.counter_duration_ms, 1_500.0);
        assert_eq!(config.tilt_max_degrees, 12.0);
        assert_eq!(config.nav_scrolled_offset, 0.0);
    }

    #[test]
    fn out_of_bounds_or_garbage_falls_back() {
        let config = config_from(&[
            ("data-reveal-threshold", "1.5"),
            ("data-cursor-easing", "0"),
            ("data-counter-duration", "slow"),
            ("data-tilt-max", "NaN"),
        ]);
        let defaults = MotionConfig::default();

        assert_eq!(config.reveal.threshold, defaults.reveal.threshold);
        assert_eq!(config.cursor_easing, defaults.cursor_easing);
        assert_eq!(config.counter_duration_ms, defaults.counter_duration_ms);
        assert_eq!(config.tilt_max_degrees, defaults.tilt_max_degrees);
    }
}
