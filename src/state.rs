//! Mutable bar state and the public [`BarState`] snapshot.
//!
//! [`ProgressState`] is plain data plus the transition rules for an advance. It
//! is owned by the [`ProgressBar`](crate::ProgressBar) behind its lock, so
//! nothing in here synchronizes on its own.

use std::time::Duration;

use web_time::Instant;

use crate::{config::Config, rate::RateEstimator};

/// Counters and timestamps describing the bar position.
#[derive(Clone, Debug)]
pub struct ProgressState {
    /// Units completed so far.
    pub count: i64,
    /// Integer percent computed by the last advance.
    pub percent: i64,
    /// When the last line was drawn.
    pub last_shown: Instant,
    /// When tracking started (or was last reset).
    pub start: Instant,
    /// Rolling throughput window.
    pub rate: RateEstimator,
    /// Progress expressed in bytes.
    pub current_bytes: f64,
    /// Visible width of the last line written, for erasing it.
    pub line_width: usize,
    /// Set once, when the count first reaches the maximum.
    pub finished: bool,
}

impl ProgressState {
    /// A blank state starting at `now`.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            count: 0,
            percent: 0,
            last_shown: now,
            start: now,
            rate: RateEstimator::new(now),
            current_bytes: 0.0,
            line_width: 0,
            finished: false,
        }
    }

    /// Time since [`start`](Self::start).
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }

    /// Adds `delta` and refreshes every derived field.
    ///
    /// Returns `true` if the integer percent changed. Validation against the
    /// maximum is the caller's job.
    pub fn apply(&mut self, delta: i64, config: &Config, now: Instant) -> bool {
        self.count = self.count.saturating_add(delta);
        self.rate.record(delta, now);

        let previous = self.percent;
        self.percent = percent(self.count, config.max);
        self.current_bytes = byte_progress(self.count, config);
        self.percent != previous
    }

    /// Builds the public snapshot.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn snapshot(&self, config: &Config, now: Instant) -> BarState {
        let elapsed = self.elapsed(now);
        let seconds_since = elapsed.as_secs_f64();

        let fraction = if config.max > 0 {
            self.count as f64 / config.max as f64
        } else {
            0.0
        };
        let seconds_left = if self.count > 0 && config.max >= 0 {
            seconds_since / self.count as f64 * (config.max - self.count) as f64
        } else {
            0.0
        };
        let kbs_per_second = if seconds_since > 0.0 {
            self.current_bytes / 1000.0 / seconds_since
        } else {
            0.0
        };

        BarState {
            current_percent: fraction,
            current_bytes: self.current_bytes,
            max_bytes: config.max_bytes,
            seconds_since,
            seconds_left,
            rate: self.rate.smoothed(self.count, elapsed, self.finished),
            kbs_per_second,
        }
    }
}

/// `floor(count / max * 100)`, or 0 when the maximum is not positive.
#[must_use]
pub fn percent(count: i64, max: i64) -> i64 {
    if max <= 0 {
        return 0;
    }
    let value = i128::from(count) * 100 / i128::from(max);
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Bytes represented by one unit: `max_bytes / max` with a byte hint, else 1.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn bytes_per_unit(config: &Config) -> f64 {
    if config.max > 0 && config.max_bytes > 0 {
        config.max_bytes as f64 / config.max as f64
    } else {
        1.0
    }
}

/// Progress in bytes: the count scaled by the byte hint, if any.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn byte_progress(count: i64, config: &Config) -> f64 {
    if config.max > 0 && config.max_bytes > 0 {
        count as f64 / config.max as f64 * config.max_bytes as f64
    } else {
        count as f64
    }
}

/// A read-only view of a bar at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarState {
    /// Fraction complete, `0.0..=1.0`.
    pub current_percent: f64,
    /// Progress in bytes.
    pub current_bytes: f64,
    /// The configured byte hint.
    pub max_bytes: i64,
    /// Seconds since start.
    pub seconds_since: f64,
    /// Estimated seconds until completion.
    pub seconds_left: f64,
    /// Smoothed throughput in units per second.
    pub rate: f64,
    /// Average byte throughput since start, in kB/s.
    pub kbs_per_second: f64,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use web_time::Instant;

    use super::{ProgressState, byte_progress, percent};
    use crate::config::Config;

    fn config(max: i64) -> Config {
        Config {
            max,
            ..Config::default()
        }
    }

    #[test]
    fn test_percent_floors() {
        assert_eq!(percent(0, 100), 0);
        assert_eq!(percent(101, 10_000), 1);
        assert_eq!(percent(199, 10_000), 1);
        assert_eq!(percent(2, 3), 66);
        assert_eq!(percent(10, 10), 100);
        assert_eq!(percent(5, 0), 0);
        assert_eq!(percent(5, -1), 0);
        assert_eq!(percent(i64::MAX, i64::MAX), 100);
    }

    #[test]
    fn test_apply_reports_percent_change() {
        let t0 = Instant::now();
        let cfg = config(10_000);
        let mut state = ProgressState::new(t0);

        assert!(state.apply(100, &cfg, t0));
        assert!(!state.apply(1, &cfg, t0), "1% -> 1% is not a change");
        assert_eq!(state.count, 101);
        assert_eq!(state.percent, 1);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_byte_progress() {
        let mut cfg = config(100);
        cfg.max_bytes = 10_000;
        assert_eq!(byte_progress(10, &cfg), 1000.0);
        assert_eq!(byte_progress(10, &config(100)), 10.0);
        assert_eq!(byte_progress(4096, &config(-1)), 4096.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_snapshot_estimates() {
        let t0 = Instant::now();
        let cfg = config(100);
        let mut state = ProgressState::new(t0);
        state.apply(25, &cfg, t0);

        let snap = state.snapshot(&cfg, t0 + Duration::from_secs(10));
        assert_eq!(snap.current_percent, 0.25);
        assert_eq!(snap.seconds_since, 10.0);
        assert!((snap.seconds_left - 30.0).abs() < 1e-9);
        assert_eq!(snap.rate, 2.5);

        let blank = ProgressState::new(t0).snapshot(&cfg, t0);
        assert_eq!(blank.seconds_left, 0.0);
        assert_eq!(blank.kbs_per_second, 0.0);
    }
}
