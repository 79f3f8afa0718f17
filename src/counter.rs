pub const DEFAULT_COUNTER_DURATION_MS: f64 = 2_000.0;

pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

pub fn parse_target(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u64,
    pub done: bool,
}

/// Numeric reveal from zero up to `target`, eased out.
#[derive(Clone, Debug)]
pub struct Counter {
    target: u64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl Counter {
    pub fn new(target: u64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
        }
    }

    pub fn value_at(&self, t: f64) -> u64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t >= 1.0 {
            return self.target;
        }
        (ease_out_quart(t) * self.target as f64).floor() as u64
    }

    /// Samples the counter at frame timestamp `now_ms`; the first call anchors the start.
    pub fn sample(&mut self, now_ms: f64) -> CounterFrame {
        if self.duration_ms <= 0.0 {
            return CounterFrame {
                value: self.target,
                done: true,
            };
        }

        let started_at = *self.started_at.get_or_insert(now_ms);
        let t = (now_ms - started_at) / self.duration_ms;

        CounterFrame {
            value: self.value_at(t),
            done: t >= 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_snaps_exactly_to_target() {
        for target in [0, 1, 7, 99, 150, 12_345] {
            let counter = Counter::new(target, 1_000.0);
            assert_eq!(counter.value_at(1.0), target);
            assert_eq!(counter.value_at(3.0), target);
        }
    }

    #[test]
    fn curve_is_monotonic_and_eased() {
        let counter = Counter::new(1_000, 1_000.0);
        assert_eq!(counter.value_at(0.0), 0);
        assert_eq!(counter.value_at(0.5), 937);

        let mut previous = 0;
        for step in 0..=100 {
            let value = counter.value_at(f64::from(step) / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn sample_anchors_on_first_frame() {
        let mut counter = Counter::new(100, 2_000.0);

        assert_eq!(counter.sample(5_000.0), CounterFrame { value: 0, done: false });
        assert!(!counter.sample(6_000.0).done);
        assert_eq!(
            counter.sample(7_000.0),
            CounterFrame {
                value: 100,
                done: true
            }
        );
    }

    #[test]
    fn non_positive_duration_finishes_immediately() {
        let mut counter = Counter::new(42, 0.0);
        assert_eq!(counter.sample(10.0), CounterFrame { value: 42, done: true });
    }

    #[test]
    fn target_parsing() {
        assert_eq!(parse_target(Some("250")), Some(250));
        assert_eq!(parse_target(Some(" 12 ")), Some(12));
        assert_eq!(parse_target(Some("-3")), None);
        assert_eq!(parse_target(Some("lots")), None);
        assert_eq!(parse_target(None), None);
    }
}
