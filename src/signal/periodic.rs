//! Periodic and trend components evaluated over integer time offsets.

use crate::core::MINUTES_PER_DAY;
use std::f64::consts::PI;

/// Sinusoidal seasonal component with zero phase.
///
/// Returns `amplitude * sin(2π * offset / period)` for every offset.
/// `period` must be positive; this is not checked.
///
/// # Example
/// ```
/// use anofox_synth::signal::seasonal;
///
/// let values = seasonal(&[0, 25, 50], 100.0, 2.0);
/// assert!(values[0].abs() < 1e-12);
/// assert!((values[1] - 2.0).abs() < 1e-12);
/// ```
pub fn seasonal(offsets: &[usize], period: f64, amplitude: f64) -> Vec<f64> {
    seasonal_with_phase(offsets, period, amplitude, 0.0)
}

/// Sinusoidal seasonal component with a phase shift given as a fraction of
/// one cycle: `amplitude * sin(2π * (offset / period + phase))`.
pub fn seasonal_with_phase(
    offsets: &[usize],
    period: f64,
    amplitude: f64,
    phase: f64,
) -> Vec<f64> {
    offsets
        .iter()
        .map(|&t| amplitude * (2.0 * PI * (t as f64 / period + phase)).sin())
        .collect()
}

/// Diurnal cycle: `-amplitude * cos(2π * (offset mod 1440) / 1440)`.
///
/// The minimum `-amplitude` falls at midnight (offset 0) and the maximum
/// `amplitude` at noon (offset 720).
pub fn daily_cycle(offsets: &[usize], amplitude: f64) -> Vec<f64> {
    let day = MINUTES_PER_DAY as f64;
    offsets
        .iter()
        .map(|&t| {
            let day_fraction = (t % MINUTES_PER_DAY) as f64 / day;
            amplitude * -(2.0 * PI * day_fraction).cos()
        })
        .collect()
}

/// `n` evenly spaced values from `start` to `end`, both inclusive.
pub fn linear_trend(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the endpoint so accumulated rounding never misses it.
            values[n - 1] = end;
            values
        }
    }
}
