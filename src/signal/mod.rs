//! Signal synthesis.
//!
//! - [`periodic`]: seasonal sinusoids, the daily cycle, and linear trends
//! - [`synth`]: per-quantity recipes combining components with Gaussian noise

pub mod periodic;
pub mod synth;

pub use periodic::{daily_cycle, linear_trend, seasonal, seasonal_with_phase};
pub use synth::{synthesize, synthesize_all, Component, SignalRecipe};
