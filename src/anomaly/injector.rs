//! Labeled point-anomaly injection.
//!
//! Each pass independently selects points with probability `frequency`,
//! stamps the quantity's category code into the shared label column, and
//! adds a signed log-normal perturbation to the selected values.

use crate::core::{AnomalyLabel, Dataset, Quantity};
use crate::error::{Result, SynthError};
use rand::distributions::Bernoulli;
use rand::Rng;
use rand_distr::{Distribution, LogNormal};
use tracing::info;

/// Default per-point selection probability.
pub const DEFAULT_FREQUENCY: f64 = 0.0025;

/// Parameters of one injection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyProfile {
    pub quantity: Quantity,
    /// Probability that any given point is selected. Values `<= 0` select
    /// nothing, values `>= 1` select everything.
    pub frequency: f64,
    /// Location (mean of the underlying normal) of the magnitude distribution.
    pub log_mean: f64,
    /// Shape (std of the underlying normal) of the magnitude distribution.
    pub log_sigma: f64,
}

impl AnomalyProfile {
    pub fn new(quantity: Quantity, log_mean: f64, log_sigma: f64) -> Self {
        Self {
            quantity,
            frequency: DEFAULT_FREQUENCY,
            log_mean,
            log_sigma,
        }
    }

    /// Default profile for `quantity`.
    pub fn for_quantity(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Temperature => Self::new(quantity, 0.5, 0.25),
            Quantity::Pressure => Self::new(quantity, -2.0, 0.08),
            Quantity::Power => Self::new(quantity, 1.5, 0.25),
        }
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Median perturbation magnitude, `exp(log_mean)`.
    pub fn median_magnitude(&self) -> f64 {
        self.log_mean.exp()
    }
}

/// What one injection pass did.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectionReport {
    pub quantity: Quantity,
    /// Selected indices in ascending order.
    pub indices: Vec<usize>,
    /// Signed perturbation added at each selected index.
    pub perturbations: Vec<f64>,
}

impl InjectionReport {
    pub fn selected(&self) -> usize {
        self.indices.len()
    }

    /// Fraction of `len` points that were selected.
    pub fn fraction(&self, len: usize) -> f64 {
        if len == 0 {
            0.0
        } else {
            self.indices.len() as f64 / len as f64
        }
    }
}

/// Inject point anomalies into `series`, labelling selected points in
/// `labels` with the profile's category code.
///
/// Draw order from `rng`: one uniform per point for selection, then one
/// sign per selected point, then one magnitude per selected point. A
/// previously written label at a selected index is overwritten.
pub fn inject_point_anomalies<R: Rng + ?Sized>(
    series: &mut [f64],
    labels: &mut [AnomalyLabel],
    profile: &AnomalyProfile,
    rng: &mut R,
) -> Result<InjectionReport> {
    if series.len() != labels.len() {
        return Err(SynthError::DimensionMismatch {
            expected: series.len(),
            got: labels.len(),
        });
    }
    let magnitude = LogNormal::new(profile.log_mean, profile.log_sigma).map_err(|e| {
        SynthError::InvalidParameter(format!("{} anomaly magnitude: {e}", profile.quantity))
    })?;
    let coin = Bernoulli::new(0.5)
        .map_err(|e| SynthError::InvalidParameter(format!("sign distribution: {e}")))?;

    let indices: Vec<usize> = (0..series.len())
        .filter(|_| rng.gen::<f64>() < profile.frequency)
        .collect();

    let code = profile.quantity.code();
    for &i in &indices {
        labels[i] = code;
    }

    let signs: Vec<f64> = indices
        .iter()
        .map(|_| if coin.sample(rng) { -1.0 } else { 1.0 })
        .collect();
    let perturbations: Vec<f64> = signs
        .into_iter()
        .map(|sign| sign * magnitude.sample(rng))
        .collect();

    for (&i, &delta) in indices.iter().zip(perturbations.iter()) {
        series[i] += delta;
    }

    info!(
        quantity = %profile.quantity,
        selected = indices.len(),
        frequency = profile.frequency,
        "injected point anomalies"
    );

    Ok(InjectionReport {
        quantity: profile.quantity,
        indices,
        perturbations,
    })
}

/// Run one injection pass against the matching series of `dataset`.
pub fn inject_into<R: Rng + ?Sized>(
    dataset: &mut Dataset,
    profile: &AnomalyProfile,
    rng: &mut R,
) -> Result<InjectionReport> {
    let (series, labels) = dataset.series_and_labels_mut(profile.quantity);
    inject_point_anomalies(series, labels, profile, rng)
}
