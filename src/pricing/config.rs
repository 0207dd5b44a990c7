//! Engine configuration.

use serde::{Deserialize, Serialize};

use super::error::PricingError;
use super::types::PriceSource;

/// Effective federal funds rate used when no rate is configured.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.0533;

/// Configuration for the Greeks engine and its implied volatility solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Continuously compounded risk-free rate applied to every contract.
    pub risk_free_rate: f64,
    /// Width of the final bisection interval (default: 1e-6).
    pub tolerance: f64,
    /// Lower end of the volatility bracket (default: 0.0).
    pub lower_bound: f64,
    /// Upper end of the volatility bracket (default: 15.0 = 1500%).
    pub upper_bound: f64,
    /// Iteration guard for the solver.
    pub max_iterations: u32,
    /// Quote field inverted for implied volatility.
    pub price_source: PriceSource,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            tolerance: 1e-6,
            lower_bound: 0.0,
            upper_bound: 15.0,
            max_iterations: 200,
            price_source: PriceSource::LastTrade,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the volatility bracket.
    #[must_use]
    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    /// Sets the maximum number of solver iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the quote field used for implied volatility.
    #[must_use]
    pub fn with_price_source(mut self, price_source: PriceSource) -> Self {
        self.price_source = price_source;
        self
    }

    /// Checks that the configuration can drive the solver.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.risk_free_rate.is_finite() {
            return Err(PricingError::InvalidParams {
                message: format!("risk-free rate must be finite, got {}", self.risk_free_rate),
            });
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PricingError::InvalidParams {
                message: format!("tolerance must be positive, got {}", self.tolerance),
            });
        }

        if !(self.lower_bound.is_finite() && self.upper_bound.is_finite())
            || self.lower_bound < 0.0
            || self.lower_bound >= self.upper_bound
        {
            return Err(PricingError::InvalidParams {
                message: format!(
                    "volatility bracket [{}, {}] is invalid",
                    self.lower_bound, self.upper_bound
                ),
            });
        }

        if self.max_iterations == 0 {
            return Err(PricingError::InvalidParams {
                message: "max_iterations must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
