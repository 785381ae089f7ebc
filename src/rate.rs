//! Rolling-average throughput estimation.
//!
//! Deltas are collected into a pending bucket. Once a bucket is older than
//! [`SAMPLE_INTERVAL`], it is turned into a "units per second" sample and pushed
//! onto a window holding at most [`MAX_SAMPLES`] entries (oldest dropped first).
//! The displayed rate is the mean of that window.

use std::{collections::VecDeque, time::Duration};

use web_time::Instant;

/// Minimum wall-clock span covered by one sample.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

/// Number of samples retained in the rolling window.
pub const MAX_SAMPLES: usize = 10;

/// Sliding window of recent throughput samples.
#[derive(Clone, Debug)]
pub struct RateEstimator {
    window_start: Instant,
    pending: i64,
    samples: VecDeque<f64>,
}

impl RateEstimator {
    /// Creates an empty estimator whose first bucket starts at `now`.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            pending: 0,
            samples: VecDeque::with_capacity(MAX_SAMPLES + 1),
        }
    }

    /// Accumulates `delta` and closes the bucket if it spans more than
    /// [`SAMPLE_INTERVAL`].
    #[allow(clippy::cast_precision_loss)]
    pub fn record(&mut self, delta: i64, now: Instant) {
        self.pending = self.pending.saturating_add(delta);

        let span = now.saturating_duration_since(self.window_start);
        if span > SAMPLE_INTERVAL {
            self.samples
                .push_back(self.pending as f64 / span.as_secs_f64());
            if self.samples.len() > MAX_SAMPLES {
                self.samples.pop_front();
            }
            self.window_start = now;
            self.pending = 0;
        }
    }

    /// Mean of the retained samples, or `None` if no bucket has closed yet.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn rolling(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    /// The rate to display.
    ///
    /// Falls back to the all-time average `count / elapsed` when the window is
    /// empty, and always uses it once the bar is finished.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn smoothed(&self, count: i64, elapsed: Duration, finished: bool) -> f64 {
        match self.rolling() {
            Some(rate) if !finished => rate,
            _ => {
                let secs = elapsed.as_secs_f64();
                if secs > 0.0 { count as f64 / secs } else { 0.0 }
            }
        }
    }

    /// Number of samples currently in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no bucket has closed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use web_time::Instant;

    use super::{MAX_SAMPLES, RateEstimator};

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_bucket_closes_after_interval() {
        let t0 = Instant::now();
        let mut rate = RateEstimator::new(t0);

        rate.record(5, t0 + Duration::from_millis(100));
        assert!(rate.is_empty(), "bucket is still open");

        rate.record(5, t0 + Duration::from_secs(1));
        assert_eq!(rate.len(), 1);
        assert_eq!(rate.rolling(), Some(10.0));
    }

    #[test]
    fn test_window_is_bounded_fifo() {
        let t0 = Instant::now();
        let mut rate = RateEstimator::new(t0);

        // First sample is 1000/s, the following ones 1/s.
        rate.record(1000, t0 + Duration::from_secs(1));
        for i in 2..=(MAX_SAMPLES as u64 + 1) {
            rate.record(1, t0 + Duration::from_secs(i));
        }

        assert_eq!(rate.len(), MAX_SAMPLES);
        let mean = rate.rolling().unwrap();
        assert!((mean - 1.0).abs() < 1e-9, "oldest sample evicted, got {mean}");
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_fallback_to_all_time_average() {
        let t0 = Instant::now();
        let mut rate = RateEstimator::new(t0);
        rate.record(1000, t0 + Duration::from_secs(1));

        // Window exists, but a finished bar reports the overall average.
        assert_eq!(rate.smoothed(40, Duration::from_secs(4), true), 10.0);
        assert_eq!(rate.smoothed(40, Duration::from_secs(4), false), 1000.0);

        let fresh = RateEstimator::new(t0);
        assert_eq!(fresh.smoothed(30, Duration::from_secs(3), false), 10.0);
        assert_eq!(fresh.smoothed(30, Duration::ZERO, false), 0.0);
    }

    #[test]
    fn test_huge_deltas_saturate() {
        let t0 = Instant::now();
        let mut rate = RateEstimator::new(t0);

        rate.record(i64::MAX, t0 + Duration::from_millis(10));
        rate.record(i64::MAX, t0 + Duration::from_millis(20));
        assert!(rate.is_empty());

        rate.record(1, t0 + Duration::from_secs(1));
        let sample = rate.rolling().unwrap();
        assert!(sample.is_finite() && sample > 0.0, "got {sample}");
    }
}
