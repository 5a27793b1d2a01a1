//! # anofox-synth
//!
//! Synthetic minute-resolution sensor data for anomaly-detection work.
//!
//! Builds one year of temperature, pressure, and power readings from
//! trend, seasonal, and daily components plus Gaussian noise, injects
//! labeled point anomalies with signed log-normal magnitudes, and exports
//! the table together with per-series summary statistics.

#![allow(clippy::needless_range_loop)]

pub mod anomaly;
pub mod core;
pub mod error;
pub mod export;
pub mod generator;
pub mod signal;
pub mod utils;
pub mod visualize;

pub use error::{Result, SynthError};

pub mod prelude {
    pub use crate::anomaly::{AnomalyProfile, InjectionReport};
    pub use crate::core::{Dataset, Quantity, TimeIndex};
    pub use crate::error::{Result, SynthError};
    pub use crate::generator::{generate, generate_with_rng, GeneratedData, GeneratorConfig};
    pub use crate::signal::SignalRecipe;
    pub use crate::utils::SummaryStatistics;
}
