//! Implied volatility and sensitivity engine.

use tracing::trace;

use super::black_scholes::{BlackScholes, PricingParams};
use super::config::EngineConfig;
use super::error::PricingError;
use super::normal::StandardNormal;
use super::root_finder::bisect;
use super::types::{ContractAnalytics, GreekValue, Greeks, ImpliedVolatility, UnavailableReason};
use crate::chain::Contract;

/// Recovers implied volatility from a quoted price and derives the full Greeks profile.
///
/// The engine holds no mutable state; one instance can be shared across threads and
/// reused for every contract in a chain.
///
/// # Example
/// ```
/// use greeks_rs::pricing::{EngineConfig, GreeksEngine, PricingParams};
///
/// let engine = GreeksEngine::new(EngineConfig::default().with_risk_free_rate(0.05)).unwrap();
/// let params = PricingParams::call(100.0, 100.0, 1.0, 0.05);
/// let iv = engine.implied_volatility(&params, 10.45).value().unwrap();
/// assert!((iv - 0.20).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreeksEngine {
    config: EngineConfig,
}

impl GreeksEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Builds the valuation inputs for `contract` under chain-wide market data.
    #[must_use]
    pub fn params_for(
        &self,
        contract: &Contract,
        spot: f64,
        dividend_yield: f64,
    ) -> PricingParams {
        PricingParams::new(
            spot,
            contract.strike(),
            contract.time_to_expiry(),
            dividend_yield,
            self.config.risk_free_rate,
            contract.option_type(),
        )
    }

    /// Solves for the volatility whose Black-Scholes price equals `observed_price`.
    ///
    /// The solver brackets `[lower_bound, upper_bound]` from the configuration. The lower
    /// end is priced at its zero-volatility limit so that a bracket starting at `0.0` is
    /// well defined.
    ///
    /// # Returns
    /// - `Solved` with the volatility and iteration count
    /// - `Unavailable(Expired)` when no time remains
    /// - `Unavailable(NoPrice)` when the observed price is not a positive finite number
    /// - `Unavailable(NotBracketed)` when no volatility in the bracket reproduces the price
    /// - `Unavailable(SolverFailed)` for invalid inputs or an exhausted iteration guard
    #[must_use]
    pub fn implied_volatility(
        &self,
        params: &PricingParams,
        observed_price: f64,
    ) -> ImpliedVolatility {
        if let Err(err) = params.validate() {
            trace!("implied volatility unavailable: {}", err);
            return ImpliedVolatility::Unavailable(UnavailableReason::SolverFailed);
        }

        if params.time_to_expiry <= 0.0 {
            return ImpliedVolatility::Unavailable(UnavailableReason::Expired);
        }

        if !(observed_price.is_finite() && observed_price > 0.0) {
            return ImpliedVolatility::Unavailable(UnavailableReason::NoPrice);
        }

        let objective = |vol: f64| BlackScholes::price_or_limit(params, vol) - observed_price;

        match bisect(
            objective,
            self.config.lower_bound,
            self.config.upper_bound,
            self.config.tolerance,
            self.config.max_iterations,
        ) {
            Ok(root) => {
                trace!(
                    "implied volatility {:.6} for strike {} after {} iterations",
                    root.value, params.strike, root.iterations
                );
                ImpliedVolatility::Solved {
                    value: root.value,
                    iterations: root.iterations,
                }
            }
            Err(PricingError::NotBracketed { .. }) => {
                trace!(
                    "price {} for strike {} is outside the volatility bracket",
                    observed_price, params.strike
                );
                ImpliedVolatility::Unavailable(UnavailableReason::NotBracketed)
            }
            Err(err) => {
                trace!("implied volatility solver failed: {}", err);
                ImpliedVolatility::Unavailable(UnavailableReason::SolverFailed)
            }
        }
    }

    /// Evaluates every sensitivity at volatility `vol`.
    ///
    /// `observed_price` is only used for elasticity. Each formula is checked for
    /// finiteness on its own, so a degenerate input marks the affected values
    /// `Indeterminate` without touching the others.
    #[must_use]
    pub fn greeks(&self, params: &PricingParams, vol: f64, observed_price: f64) -> Greeks {
        let phi = params.option_type.sign();
        let s = params.spot;
        let k = params.strike;
        let t = params.time_to_expiry;
        let q = params.dividend_yield;
        let r = params.risk_free_rate;

        let sqrt_t = t.sqrt();
        let vol_sqrt_t = vol * sqrt_t;
        let a = params.dividend_discount();
        let b = params.rate_discount();

        let d1 = BlackScholes::d1(params, vol);
        let d2 = BlackScholes::d2(d1, vol, t);
        let n_d1 = StandardNormal::pdf(d1);
        let cdf_d1 = StandardNormal::cdf(phi * d1);
        let cdf_d2 = StandardNormal::cdf(phi * d2);

        // First order
        let delta = phi * a * cdf_d1;
        let elasticity = delta * s / observed_price;
        let vega = s * a * n_d1 * sqrt_t;
        let decay = -a * s * n_d1 * vol / (2.0 * sqrt_t);
        let theta = decay - phi * r * k * b * cdf_d2 + phi * q * s * a * cdf_d1;
        let rho = phi * k * t * b * cdf_d2;
        let epsilon = -phi * s * t * a * cdf_d1;

        // Second order
        let gamma = a * n_d1 / (s * vol_sqrt_t);
        let vanna = (vega / s) * (1.0 - d1 / vol_sqrt_t);
        let drift = 2.0 * (r - q) * t - d2 * vol_sqrt_t;
        let charm = phi * q * a * cdf_d1 - a * n_d1 * drift / (2.0 * t * vol_sqrt_t);
        let vomma = vega * d1 * d2 / vol;
        let veta = vega * (q + (r - q) * d1 / vol_sqrt_t - (1.0 + d1 * d2) / (2.0 * t));

        // Third order
        let speed = -(gamma / s) * (d1 / vol_sqrt_t + 1.0);
        let zomma = gamma * (d1 * d2 - 1.0) / vol;
        let color = gamma / (2.0 * t) * (2.0 * q * t + 1.0 + d1 * drift / vol_sqrt_t);
        let ultima = -(vega / (vol * vol)) * (d1 * d2 * (1.0 - d1 * d2) + d1 * d1 + d2 * d2);

        Greeks {
            delta: GreekValue::from_raw(delta),
            elasticity: GreekValue::from_raw(elasticity),
            vega: GreekValue::from_raw(vega),
            theta: GreekValue::from_raw(theta),
            rho: GreekValue::from_raw(rho),
            epsilon: GreekValue::from_raw(epsilon),
            gamma: GreekValue::from_raw(gamma),
            vanna: GreekValue::from_raw(vanna),
            charm: GreekValue::from_raw(charm),
            vomma: GreekValue::from_raw(vomma),
            veta: GreekValue::from_raw(veta),
            speed: GreekValue::from_raw(speed),
            zomma: GreekValue::from_raw(zomma),
            color: GreekValue::from_raw(color),
            ultima: GreekValue::from_raw(ultima),
        }
    }

    /// Solves implied volatility and the Greeks for one contract.
    ///
    /// The quote field inverted is chosen by [`EngineConfig::price_source`]. When no
    /// volatility can be recovered every Greek is `Indeterminate`.
    #[must_use]
    pub fn evaluate(
        &self,
        contract: &Contract,
        spot: f64,
        dividend_yield: f64,
    ) -> ContractAnalytics {
        let params = self.params_for(contract, spot, dividend_yield);
        let observed_price = contract.quote().price(self.config.price_source);
        let implied_volatility = self.implied_volatility(&params, observed_price);

        let greeks = match implied_volatility.value() {
            Some(vol) => self.greeks(&params, vol, observed_price),
            None => Greeks::indeterminate(),
        };

        ContractAnalytics {
            implied_volatility,
            greeks,
        }
    }
}
