//! Scroll-derived progress values and the effects computed from them.

pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Where an offset sits relative to a region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Regime {
    Before,
    Within(f64),
    After,
}

impl Regime {
    pub fn progress(self) -> f64 {
        match self {
            Self::Before => 0.0,
            Self::Within(progress) => progress,
            Self::After => 1.0,
        }
    }
}

/// Vertical extent of a page section, in document pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub top: f64,
    pub height: f64,
}

impl Region {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn regime(self, offset: f64) -> Regime {
        if offset < self.top {
            return Regime::Before;
        }
        if self.height <= 0.0 || offset >= self.top + self.height {
            return Regime::After;
        }
        Regime::Within(clamp_unit((offset - self.top) / self.height))
    }

    pub fn progress(self, offset: f64) -> f64 {
        self.regime(offset).progress()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub start: f64,
    pub end: f64,
}

impl Tween {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn at(self, regime: Regime) -> f64 {
        match regime {
            Regime::Before => self.start,
            Regime::Within(progress) => lerp(self.start, self.end, progress),
            Regime::After => self.end,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroFrame {
    pub scale: f64,
    pub opacity: f64,
    pub translate_y: f64,
}

impl HeroFrame {
    pub fn transform(&self) -> String {
        format!(
            "translate3d(0, {:.2}px, 0) scale({:.4})",
            self.translate_y, self.scale
        )
    }

    pub fn opacity(&self) -> String {
        format!("{:.3}", self.opacity)
    }
}

/// Hero zoom-out: content grows, fades and drifts down as the hero scrolls away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroTweens {
    pub scale: Tween,
    pub opacity: Tween,
    pub translate_y: Tween,
}

impl Default for HeroTweens {
    fn default() -> Self {
        Self {
            scale: Tween::new(1.0, 1.15),
            opacity: Tween::new(1.0, 0.0),
            translate_y: Tween::new(0.0, 120.0),
        }
    }
}

impl HeroTweens {
    pub fn frame(&self, regime: Regime) -> HeroFrame {
        HeroFrame {
            scale: self.scale.at(regime),
            opacity: self.opacity.at(regime),
            translate_y: self.translate_y.at(regime),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    pub fn page_progress(&self) -> f64 {
        let scrollable = self.document_height - self.viewport_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        clamp_unit(self.offset / scrollable)
    }

    pub fn is_scrolled(&self, threshold: f64) -> bool {
        self.offset > threshold
    }
}

pub fn parallax_offset(scroll_offset: f64, speed: f64) -> f64 {
    scroll_offset * speed
}

pub fn parse_speed(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|speed| speed.is_finite())
}

/// Fill fraction of a timeline whose viewport-relative top is `rect_top`.
pub fn timeline_fill(rect_top: f64, rect_height: f64, viewport_height: f64) -> f64 {
    Region::new(rect_top, rect_height).progress(viewport_height * 0.5)
}

pub fn is_highlighted(item_rect_top: f64, viewport_height: f64) -> bool {
    item_rect_top <= viewport_height * 0.5
}

pub fn percent(progress: f64) -> String {
    format!("{:.2}%", clamp_unit(progress) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: Region = Region {
        top: 100.0,
        height: 400.0,
    };

    #[test]
    fn offsets_before_region_hold_start_values() {
        let tweens = HeroTweens::default();

        for offset in [-50.0, 0.0, 99.9] {
            assert_eq!(HERO.regime(offset), Regime::Before);
            assert_eq!(HERO.progress(offset), 0.0);
            let frame = tweens.frame(HERO.regime(offset));
            assert_eq!(frame.scale, 1.0);
            assert_eq!(frame.opacity, 1.0);
            assert_eq!(frame.translate_y, 0.0);
        }
    }

    #[test]
    fn offsets_at_or_after_region_end_hold_end_values() {
        let tweens = HeroTweens::default();

        for offset in [500.0, 501.0, 10_000.0] {
            assert_eq!(HERO.regime(offset), Regime::After);
            assert_eq!(HERO.progress(offset), 1.0);
            let frame = tweens.frame(HERO.regime(offset));
            assert_eq!(frame.scale, 1.15);
            assert_eq!(frame.opacity, 0.0);
            assert_eq!(frame.translate_y, 120.0);
        }
    }

    #[test]
    fn region_midpoint_interpolates_halfway() {
        let regime = HERO.regime(300.0);
        assert_eq!(regime, Regime::Within(0.5));

        let frame = HeroTweens::default().frame(regime);
        assert!((frame.scale - 1.075).abs() < 1e-9);
        assert!((frame.opacity - 0.5).abs() < 1e-9);
        assert!((frame.translate_y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn region_start_is_within_at_zero() {
        assert_eq!(HERO.regime(100.0), Regime::Within(0.0));
    }

    #[test]
    fn empty_region_jumps_straight_to_end() {
        let flat = Region::new(200.0, 0.0);
        assert_eq!(flat.regime(199.0), Regime::Before);
        assert_eq!(flat.regime(200.0), Regime::After);
    }

    #[test]
    fn clamp_unit_handles_out_of_range_and_nan() {
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
    }

    #[test]
    fn page_progress_is_zero_when_page_cannot_scroll() {
        let short = ScrollState {
            offset: 40.0,
            document_height: 600.0,
            viewport_height: 800.0,
        };
        assert_eq!(short.page_progress(), 0.0);

        let long = ScrollState {
            offset: 600.0,
            document_height: 2_000.0,
            viewport_height: 800.0,
        };
        assert!((long.page_progress() - 0.5).abs() < 1e-9);
        assert_eq!(percent(long.page_progress()), "50.00%");
    }

    #[test]
    fn nav_switches_to_scrolled_past_threshold() {
        let mut state = ScrollState {
            offset: 50.0,
            document_height: 3_000.0,
            viewport_height: 800.0,
        };
        assert!(!state.is_scrolled(50.0));
        state.offset = 51.0;
        assert!(state.is_scrolled(50.0));
    }

    #[test]
    fn timeline_fills_as_viewport_centre_passes_through() {
        assert_eq!(timeline_fill(500.0, 1_000.0, 800.0), 0.0);
        assert!((timeline_fill(-100.0, 1_000.0, 800.0) - 0.5).abs() < 1e-9);
        assert_eq!(timeline_fill(-2_000.0, 1_000.0, 800.0), 1.0);

        assert!(is_highlighted(400.0, 800.0));
        assert!(!is_highlighted(401.0, 800.0));
    }

    #[test]
    fn parallax_speed_parsing_rejects_garbage() {
        assert_eq!(parse_speed(Some(" 0.3 ")), Some(0.3));
        assert_eq!(parse_speed(Some("fast")), None);
        assert_eq!(parse_speed(Some("NaN")), None);
        assert_eq!(parse_speed(None), None);
        assert_eq!(parallax_offset(200.0, -0.5), -100.0);
    }
}
