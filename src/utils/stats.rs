//! Statistical summaries of the finished dataset.

use crate::core::{Dataset, Quantity};

/// Single-pass mean and variance accumulator (Welford's algorithm).
///
/// # Example
/// ```
/// use anofox_synth::utils::RunningStats;
///
/// let stats: RunningStats = [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().collect();
/// assert_eq!(stats.mean(), 3.0);
/// assert!((stats.sample_variance() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation.
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Running mean; NaN before the first observation.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.mean
        }
    }

    /// Sample variance (n-1 denominator); NaN with fewer than two observations.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn sample_std(&self) -> f64 {
        self.sample_variance().sqrt()
    }
}

impl Extend<f64> for RunningStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

/// Per-quantity mean and sample standard deviation, in column order
/// (temperature, pressure, power).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    pub means: [f64; 3],
    pub stds: [f64; 3],
}

impl SummaryStatistics {
    pub fn mean_of(&self, quantity: Quantity) -> f64 {
        self.means[quantity.index()]
    }

    pub fn std_of(&self, quantity: Quantity) -> f64 {
        self.stds[quantity.index()]
    }
}

/// Summarize every series of the (anomaly-included) table in one pass each.
pub fn summarize(dataset: &Dataset) -> SummaryStatistics {
    let mut means = [f64::NAN; 3];
    let mut stds = [f64::NAN; 3];
    for quantity in Quantity::ALL {
        let stats: RunningStats = dataset.series(quantity).iter().copied().collect();
        means[quantity.index()] = stats.mean();
        stds[quantity.index()] = stats.sample_std();
    }
    SummaryStatistics { means, stds }
}
