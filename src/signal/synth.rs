//! Base signal synthesis: trend, constant, and periodic components plus
//! Gaussian measurement noise.

use super::periodic::{daily_cycle, linear_trend, seasonal_with_phase};
use crate::core::{Quantity, MINUTES_PER_WEEK, MINUTES_PER_YEAR};
use crate::error::{Result, SynthError};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

/// One additive building block of a base signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    /// Constant offset.
    Constant(f64),
    /// Evenly spaced ramp from `start` to `end` over the whole index.
    LinearTrend { start: f64, end: f64 },
    /// Sinusoid with the given period (in offsets), amplitude, and phase
    /// (fraction of a cycle).
    Seasonal {
        period: f64,
        amplitude: f64,
        phase: f64,
    },
    /// 24-hour cosine cycle with its minimum at midnight.
    DailyCycle { amplitude: f64 },
}

impl Component {
    /// Seasonal component with zero phase.
    pub fn seasonal(period: f64, amplitude: f64) -> Self {
        Component::Seasonal {
            period,
            amplitude,
            phase: 0.0,
        }
    }

    fn evaluate(&self, offsets: &[usize]) -> Vec<f64> {
        match *self {
            Component::Constant(c) => vec![c; offsets.len()],
            Component::LinearTrend { start, end } => linear_trend(start, end, offsets.len()),
            Component::Seasonal {
                period,
                amplitude,
                phase,
            } => seasonal_with_phase(offsets, period, amplitude, phase),
            Component::DailyCycle { amplitude } => daily_cycle(offsets, amplitude),
        }
    }
}

/// Fixed recipe for one quantity's base signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRecipe {
    pub quantity: Quantity,
    pub components: Vec<Component>,
    /// Standard deviation of the zero-mean Gaussian noise.
    pub noise_std: f64,
}

impl SignalRecipe {
    /// Create an empty recipe with no noise.
    pub fn new(quantity: Quantity) -> Self {
        Self {
            quantity,
            components: Vec::new(),
            noise_std: 0.0,
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_noise(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Trend 20→22, yearly swing of 10, daily swing of 5, noise 0.1.
    pub fn temperature() -> Self {
        Self::new(Quantity::Temperature)
            .with_component(Component::LinearTrend {
                start: 20.0,
                end: 22.0,
            })
            .with_component(Component::seasonal(MINUTES_PER_YEAR as f64, 10.0))
            .with_component(Component::DailyCycle { amplitude: 5.0 })
            .with_noise(0.1)
    }

    /// Level 100 with a yearly swing of 1, noise 0.01.
    pub fn pressure() -> Self {
        Self::new(Quantity::Pressure)
            .with_component(Component::Constant(100.0))
            .with_component(Component::seasonal(MINUTES_PER_YEAR as f64, 1.0))
            .with_noise(0.01)
    }

    /// Level 100 with yearly (10), weekly (5), and daily (15) cycles, noise 0.2.
    pub fn power() -> Self {
        Self::new(Quantity::Power)
            .with_component(Component::Constant(100.0))
            .with_component(Component::seasonal(MINUTES_PER_YEAR as f64, 10.0))
            .with_component(Component::seasonal(MINUTES_PER_WEEK as f64, 5.0))
            .with_component(Component::DailyCycle { amplitude: 15.0 })
            .with_noise(0.2)
    }

    /// Default recipe for `quantity`.
    pub fn for_quantity(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Temperature => Self::temperature(),
            Quantity::Pressure => Self::pressure(),
            Quantity::Power => Self::power(),
        }
    }

    /// Check periods and noise level.
    pub fn validate(&self) -> Result<()> {
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(SynthError::InvalidParameter(format!(
                "{} noise std must be finite and non-negative, got {}",
                self.quantity, self.noise_std
            )));
        }
        for component in &self.components {
            if let Component::Seasonal { period, .. } = component {
                if !period.is_finite() || *period <= 0.0 {
                    return Err(SynthError::InvalidParameter(format!(
                        "{} seasonal period must be positive, got {}",
                        self.quantity, period
                    )));
                }
            }
        }
        Ok(())
    }

    /// Sum of all components without noise.
    pub fn deterministic(&self, offsets: &[usize]) -> Vec<f64> {
        let mut values = vec![0.0; offsets.len()];
        for component in &self.components {
            for (v, c) in values.iter_mut().zip(component.evaluate(offsets)) {
                *v += c;
            }
        }
        values
    }
}

/// Build one base series: the recipe's components plus one noise draw per
/// offset from `rng`.
pub fn synthesize<R: Rng + ?Sized>(
    recipe: &SignalRecipe,
    offsets: &[usize],
    rng: &mut R,
) -> Result<Vec<f64>> {
    recipe.validate()?;
    let noise = Normal::new(0.0, recipe.noise_std)
        .map_err(|e| SynthError::InvalidParameter(format!("noise distribution: {e}")))?;

    let mut values = recipe.deterministic(offsets);
    for v in values.iter_mut() {
        *v += noise.sample(rng);
    }

    debug!(
        quantity = %recipe.quantity,
        components = recipe.components.len(),
        noise_std = recipe.noise_std,
        "synthesized base signal"
    );
    Ok(values)
}

/// Build all three base series in column order (temperature, pressure,
/// power). Noise is drawn in that order from the shared `rng`.
pub fn synthesize_all<R: Rng + ?Sized>(
    recipes: &[SignalRecipe; 3],
    offsets: &[usize],
    rng: &mut R,
) -> Result<[Vec<f64>; 3]> {
    for (recipe, expected) in recipes.iter().zip(Quantity::ALL) {
        if recipe.quantity != expected {
            return Err(SynthError::InvalidParameter(format!(
                "recipe for {} found in the {} slot",
                recipe.quantity, expected
            )));
        }
    }

    let temperature = synthesize(&recipes[0], offsets, rng)?;
    let pressure = synthesize(&recipes[1], offsets, rng)?;
    let power = synthesize(&recipes[2], offsets, rng)?;
    Ok([temperature, pressure, power])
}
