//! Black-Scholes-Merton pricing with a continuous dividend yield.

use serde::{Deserialize, Serialize};

use super::error::PricingError;
use super::normal::StandardNormal;
use super::types::OptionType;

/// Market and contract inputs for a single valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingParams {
    /// Underlying spot price.
    pub spot: f64,
    /// Option strike price.
    pub strike: f64,
    /// Time to expiration in years.
    pub time_to_expiry: f64,
    /// Continuously compounded dividend yield (annualized).
    pub dividend_yield: f64,
    /// Risk-free interest rate (annualized, e.g., 0.05 for 5%).
    pub risk_free_rate: f64,
    /// Option type (Call or Put).
    pub option_type: OptionType,
}

impl PricingParams {
    /// Creates new pricing parameters.
    ///
    /// # Arguments
    /// - `spot`: Underlying spot price
    /// - `strike`: Option strike price
    /// - `time_to_expiry`: Time to expiration in years
    /// - `dividend_yield`: Continuous dividend yield
    /// - `risk_free_rate`: Risk-free interest rate
    /// - `option_type`: Call or Put
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        dividend_yield: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            dividend_yield,
            risk_free_rate,
            option_type,
        }
    }

    /// Creates parameters for a call option on a non-dividend-paying underlying.
    #[must_use]
    pub fn call(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            0.0,
            risk_free_rate,
            OptionType::Call,
        )
    }

    /// Creates parameters for a put option on a non-dividend-paying underlying.
    #[must_use]
    pub fn put(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            0.0,
            risk_free_rate,
            OptionType::Put,
        )
    }

    /// Sets the dividend yield.
    #[must_use]
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Same contract with the opposite option type.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let option_type = match self.option_type {
            OptionType::Call => OptionType::Put,
            OptionType::Put => OptionType::Call,
        };
        Self {
            option_type,
            ..*self
        }
    }

    /// Undiscounted intrinsic value: `max(φ(S - K), 0)`.
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        (self.option_type.sign() * (self.spot - self.strike)).max(0.0)
    }

    /// Forward price of the underlying at expiry: `S·e^((r-q)T)`.
    #[must_use]
    pub fn forward(&self) -> f64 {
        self.spot * ((self.risk_free_rate - self.dividend_yield) * self.time_to_expiry).exp()
    }

    /// Dividend discount factor `e^(-qT)`.
    #[must_use]
    pub fn dividend_discount(&self) -> f64 {
        (-self.dividend_yield * self.time_to_expiry).exp()
    }

    /// Rate discount factor `e^(-rT)`.
    #[must_use]
    pub fn rate_discount(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// Checks that every input is finite and that spot and strike are positive.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(PricingError::InvalidParams {
                message: format!("spot price must be positive, got {}", self.spot),
            });
        }

        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(PricingError::InvalidParams {
                message: format!("strike price must be positive, got {}", self.strike),
            });
        }

        if !self.time_to_expiry.is_finite() {
            return Err(PricingError::InvalidParams {
                message: format!(
                    "time to expiry must be finite, got {}",
                    self.time_to_expiry
                ),
            });
        }

        if !(self.dividend_yield.is_finite() && self.risk_free_rate.is_finite()) {
            return Err(PricingError::InvalidParams {
                message: format!(
                    "rates must be finite, got q = {}, r = {}",
                    self.dividend_yield, self.risk_free_rate
                ),
            });
        }

        Ok(())
    }
}

/// Black-Scholes pricing model implementation.
pub struct BlackScholes;

impl BlackScholes {
    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r - q + σ²/2)T] / (σ√T)
    #[must_use]
    pub fn d1(params: &PricingParams, vol: f64) -> f64 {
        let t = params.time_to_expiry;
        ((params.spot / params.strike).ln()
            + (params.risk_free_rate - params.dividend_yield + 0.5 * vol * vol) * t)
            / (vol * t.sqrt())
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Calculates the theoretical option price.
    ///
    /// For calls: C = S·e^(-qT)·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·e^(-qT)·N(-d1)
    ///
    /// Degenerate inputs are not trapped: with `T = 0` or `vol = 0` the result is
    /// whatever the closed form yields, `NaN` included. Use
    /// [`price_or_limit`](Self::price_or_limit) where the zero-volatility limit is wanted.
    #[must_use]
    pub fn price(params: &PricingParams, vol: f64) -> f64 {
        let phi = params.option_type.sign();
        let d1 = Self::d1(params, vol);
        let d2 = Self::d2(d1, vol, params.time_to_expiry);

        phi * (params.spot * params.dividend_discount() * StandardNormal::cdf(phi * d1)
            - params.strike * params.rate_discount() * StandardNormal::cdf(phi * d2))
    }

    /// Price with the zero-volatility limit filled in.
    ///
    /// When `σ√T` vanishes the option is worth its discounted forward intrinsic value
    /// `max(φ(S·e^(-qT) - K·e^(-rT)), 0)`; otherwise this is [`price`](Self::price).
    #[must_use]
    pub fn price_or_limit(params: &PricingParams, vol: f64) -> f64 {
        if vol <= 0.0 || params.time_to_expiry <= 0.0 {
            let t = params.time_to_expiry.max(0.0);
            let forward_value = params.spot * (-params.dividend_yield * t).exp()
                - params.strike * (-params.risk_free_rate * t).exp();
            return (params.option_type.sign() * forward_value).max(0.0);
        }

        Self::price(params, vol)
    }

    /// Deviation from put-call parity: `C - P - (S·e^(-qT) - K·e^(-rT))`.
    ///
    /// `params` describes the shared strike, expiry and market; its option type is ignored.
    #[must_use]
    pub fn parity_gap(call_price: f64, put_price: f64, params: &PricingParams) -> f64 {
        call_price
            - put_price
            - (params.spot * params.dividend_discount() - params.strike * params.rate_discount())
    }
}
