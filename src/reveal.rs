//! One-shot visibility tracking.
//!
//! Each key is reported the first time its visible fraction reaches the
//! threshold and never again, however often it scrolls out and back.

use std::collections::HashSet;
use std::hash::Hash;

pub const DEFAULT_REVEAL_CLASS: &str = "animate-in";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport before testing.
    pub bottom_margin: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
        }
    }
}

impl RevealOptions {
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin.max(0.0))
    }

    pub fn crosses(&self, ratio: f64, intersecting: bool) -> bool {
        if !intersecting {
            return false;
        }
        self.threshold <= 0.0 || ratio >= self.threshold
    }
}

/// Visible fraction of `[top, bottom)` inside `[0, viewport_height - bottom_margin)`.
pub fn intersection_ratio(top: f64, bottom: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
    let height = bottom - top;
    let visible_bottom = (viewport_height - bottom_margin).max(0.0);
    let overlap = bottom.min(visible_bottom) - top.max(0.0);

    if overlap <= 0.0 {
        return 0.0;
    }
    if height <= 0.0 {
        return 1.0;
    }
    (overlap / height).clamp(0.0, 1.0)
}

pub fn marker_class(data_reveal: Option<&str>) -> &str {
    data_reveal
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_REVEAL_CLASS)
}

pub struct RevealTracker<K> {
    options: RevealOptions,
    revealed: HashSet<K>,
}

impl<K: Eq + Hash> RevealTracker<K> {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            revealed: HashSet::new(),
        }
    }

    pub fn options(&self) -> RevealOptions {
        self.options
    }

    /// Returns `true` exactly once per key: on the first qualifying observation.
    pub fn observe(&mut self, key: K, ratio: f64, intersecting: bool) -> bool {
        if self.revealed.contains(&key) || !self.options.crosses(ratio, intersecting) {
            return false;
        }
        self.revealed.insert(key)
    }

    /// Entry delivered by an intersection observer configured with this
    /// threshold. The host has already decided the crossing, so its reported
    /// ratio is not re-checked.
    pub fn observe_entry(&mut self, key: K, intersecting: bool) -> bool {
        if !intersecting || self.revealed.contains(&key) {
            return false;
        }
        self.revealed.insert(key)
    }

    /// Geometry-driven variant for hosts without an intersection observer.
    pub fn observe_rect(&mut self, key: K, top: f64, bottom: f64, viewport_height: f64) -> bool {
        let ratio = intersection_ratio(top, bottom, viewport_height, self.options.bottom_margin);
        self.observe(key, ratio, ratio > 0.0)
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }
}
