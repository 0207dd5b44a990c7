//! Types for pricing, implied volatility and sensitivity results.

use serde::{Deserialize, Serialize};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

impl OptionType {
    /// Payoff direction: `+1.0` for calls, `-1.0` for puts.
    ///
    /// Every sensitivity formula is written once in terms of this factor; the put
    /// branch mirrors the call branch by flipping the sign and the CDF tail.
    #[must_use]
    pub fn sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Returns true for calls.
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }
}

/// Which quote field is inverted for implied volatility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// Last traded price.
    #[default]
    LastTrade,
    /// Simple mid price: `(bid + ask) / 2`.
    MidPrice,
}

/// Result of a single sensitivity formula.
///
/// Distinguishes a computed value (which may legitimately be zero) from a formula that
/// produced a non-finite number, e.g. because time to expiry or volatility is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GreekValue {
    /// Finite value.
    Computed(f64),
    /// The formula produced NaN or an infinity.
    Indeterminate,
}

impl GreekValue {
    /// Wraps a raw formula result, mapping non-finite numbers to `Indeterminate`.
    #[must_use]
    pub fn from_raw(value: f64) -> Self {
        if value.is_finite() {
            GreekValue::Computed(value)
        } else {
            GreekValue::Indeterminate
        }
    }

    /// Returns the computed value, if any.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            GreekValue::Computed(value) => Some(*value),
            GreekValue::Indeterminate => None,
        }
    }

    /// Returns the computed value, or `0.0` when indeterminate.
    #[must_use]
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// Returns true when the formula could not be evaluated.
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, GreekValue::Indeterminate)
    }
}

/// Why implied volatility could not be recovered for a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnavailableReason {
    /// No remaining time to expiration.
    Expired,
    /// The selected quote price is missing, zero or not finite.
    NoPrice,
    /// The observed price is not reachable by any volatility inside the solver bracket.
    NotBracketed,
    /// The solver rejected its inputs or ran out of iterations.
    SolverFailed,
}

/// Outcome of solving for implied volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImpliedVolatility {
    /// Volatility reproducing the observed price.
    ///
    /// A value of `0.0` means the quote carries no time value: it equals the
    /// zero-volatility limit of the model price. Most Greeks divide by volatility
    /// and are reported as indeterminate for such a contract.
    Solved {
        /// Implied volatility (annualized, e.g. 0.25 = 25%).
        value: f64,
        /// Bisection steps taken.
        iterations: u32,
    },
    /// No volatility could be recovered.
    Unavailable(UnavailableReason),
}

impl ImpliedVolatility {
    /// Returns the solved volatility, if any.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            ImpliedVolatility::Solved { value, .. } => Some(*value),
            ImpliedVolatility::Unavailable(_) => None,
        }
    }

    /// Returns the solved volatility, or the `0.0` sentinel when unavailable.
    #[must_use]
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// Returns true when a volatility was recovered.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, ImpliedVolatility::Solved { .. })
    }
}

/// First, second and third order sensitivities of a single contract.
///
/// Values are in raw model units: per unit of volatility, per year and per unit of rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: GreekValue,
    /// Delta scaled by spot over option price (lambda).
    pub elasticity: GreekValue,
    /// ∂V/∂σ
    pub vega: GreekValue,
    /// ∂V/∂t
    pub theta: GreekValue,
    /// ∂V/∂r
    pub rho: GreekValue,
    /// ∂V/∂q
    pub epsilon: GreekValue,
    /// ∂²V/∂S²
    pub gamma: GreekValue,
    /// ∂²V/∂S∂σ
    pub vanna: GreekValue,
    /// ∂²V/∂S∂t
    pub charm: GreekValue,
    /// ∂²V/∂σ²
    pub vomma: GreekValue,
    /// ∂²V/∂σ∂t
    ///
    /// Taken with calendar time `t`, i.e. `-∂²V/∂σ∂T` for time to expiry `T`. Tables that
    /// quote veta as `∂²V/∂σ∂T` carry the opposite sign.
    pub veta: GreekValue,
    /// ∂³V/∂S³
    pub speed: GreekValue,
    /// ∂³V/∂S²∂σ
    pub zomma: GreekValue,
    /// ∂³V/∂S²∂t
    ///
    /// Same calendar time convention as veta: `-∂³V/∂S²∂T`, the opposite sign to
    /// tables written in terms of time to expiry.
    pub color: GreekValue,
    /// ∂³V/∂σ³
    pub ultima: GreekValue,
}

impl Greeks {
    /// Column labels in export order.
    pub const NAMES: [&'static str; 15] = [
        "Delta",
        "Elasticity",
        "Vega",
        "Theta",
        "Rho",
        "Epsilon",
        "Gamma",
        "Vanna",
        "Charm",
        "Vomma",
        "Veta",
        "Speed",
        "Zomma",
        "Color",
        "Ultima",
    ];

    /// A profile where every sensitivity is indeterminate.
    #[must_use]
    pub fn indeterminate() -> Self {
        let none = GreekValue::Indeterminate;
        Self {
            delta: none,
            elasticity: none,
            vega: none,
            theta: none,
            rho: none,
            epsilon: none,
            gamma: none,
            vanna: none,
            charm: none,
            vomma: none,
            veta: none,
            speed: none,
            zomma: none,
            color: none,
            ultima: none,
        }
    }

    /// All sensitivities in the order of [`Greeks::NAMES`].
    #[must_use]
    pub fn values(&self) -> [GreekValue; 15] {
        [
            self.delta,
            self.elasticity,
            self.vega,
            self.theta,
            self.rho,
            self.epsilon,
            self.gamma,
            self.vanna,
            self.charm,
            self.vomma,
            self.veta,
            self.speed,
            self.zomma,
            self.color,
            self.ultima,
        ]
    }

    /// Number of sensitivities that could not be evaluated.
    #[must_use]
    pub fn indeterminate_count(&self) -> usize {
        self.values().iter().filter(|g| g.is_indeterminate()).count()
    }
}

/// Derived values attached to a contract by enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractAnalytics {
    /// Implied volatility outcome.
    pub implied_volatility: ImpliedVolatility,
    /// Sensitivities evaluated at the implied volatility.
    pub greeks: Greeks,
}
