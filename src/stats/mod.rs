//! Timing measurement and summary statistics.
//!
//! - [`measure`]: Time a single closure in fractional milliseconds
//! - [`TimingSamples`]: Per-phase sample set, kept in arrival order
//! - [`TimingSummary`]: min / median / mean of a sample set
//! - [`median_upper`], [`mean`]: The underlying statistical functions
//! - [`throughput_mb_s`]: Convert a duration into MB/s for a byte count

mod timer;

pub use timer::measure;

use serde::{Deserialize, Serialize};

const MIB: f64 = 1024.0 * 1024.0;

/// Duration samples in milliseconds, one per iteration, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct TimingSamples {
    samples: Vec<f64>,
}

impl TimingSamples {
    /// Create an empty sample set with room for `capacity` iterations.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Append one measurement.
    pub fn push(&mut self, millis: f64) {
        self.samples.push(millis);
    }

    /// Number of measurements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True before the first measurement.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Measurements in the order they were taken.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Summarize the sample set. Returns `None` if it is empty.
    #[must_use]
    pub fn summarize(&self) -> Option<TimingSummary> {
        TimingSummary::compute(&self.samples)
    }
}

impl From<Vec<f64>> for TimingSamples {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

/// Order statistics and mean of a set of durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Number of values.
    pub count: usize,
    /// Minimum value.
    pub min: f64,
    /// Upper median (see [`median_upper`]).
    pub median: f64,
    /// Mean value.
    pub mean: f64,
}

impl TimingSummary {
    /// Compute summary statistics for a slice of values.
    ///
    /// Works on a sorted copy; `values` is left untouched.
    /// Returns `None` if the slice is empty.
    #[must_use]
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let sorted = sorted_copy(values);

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            median: upper_middle(&sorted),
            mean: mean(&sorted),
        })
    }

    /// Throughput at the minimum duration.
    #[must_use]
    pub fn min_mb_s(&self, bytes: usize) -> f64 {
        throughput_mb_s(bytes, self.min)
    }

    /// Throughput at the median duration.
    #[must_use]
    pub fn median_mb_s(&self, bytes: usize) -> f64 {
        throughput_mb_s(bytes, self.median)
    }

    /// Throughput at the mean duration.
    #[must_use]
    pub fn mean_mb_s(&self, bytes: usize) -> f64 {
        throughput_mb_s(bytes, self.mean)
    }
}

/// Upper median: the element at index `len / 2` of the sorted values.
///
/// For even-length input this is the upper of the two middle values, not
/// their average.
///
/// # Example
///
/// ```
/// use codec_bench::stats::median_upper;
///
/// assert_eq!(median_upper(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0);
/// assert_eq!(median_upper(&[4.0, 1.0, 3.0, 2.0]), 3.0);
/// ```
#[must_use]
pub fn median_upper(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    upper_middle(&sorted_copy(values))
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

// `sorted` must be non-empty and ascending.
fn upper_middle(sorted: &[f64]) -> f64 {
    sorted[sorted.len() / 2]
}

/// Compute arithmetic mean.
///
/// # Example
///
/// ```
/// use codec_bench::stats::mean;
///
/// assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 3.0).abs() < 0.001);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Throughput in MB/s (MiB, 1024 * 1024 bytes) for `bytes` processed in
/// `millis` milliseconds.
///
/// # Example
///
/// ```
/// use codec_bench::stats::throughput_mb_s;
///
/// assert!((throughput_mb_s(1024 * 1024, 500.0) - 2.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn throughput_mb_s(bytes: usize, millis: f64) -> f64 {
    bytes as f64 / MIB / (millis / 1000.0)
}
