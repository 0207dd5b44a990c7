//! Black-Scholes pricing, implied volatility and Greeks.
//!
//! This module is the numerical core of the crate:
//!
//! - [`StandardNormal`]: error-function based normal CDF and the Gaussian density
//! - [`bisect`]: bracketing root finder
//! - [`BlackScholes`]: closed-form European prices with a continuous dividend yield
//! - [`GreeksEngine`]: implied volatility plus first, second and third order sensitivities
//!
//! Per-contract numerical failures are reported as values rather than errors:
//! [`ImpliedVolatility::Unavailable`] when no volatility reproduces the quote, and
//! [`GreekValue::Indeterminate`] when a single formula is not finite.
//!
//! # Example
//!
//! ```
//! use greeks_rs::pricing::{BlackScholes, EngineConfig, GreeksEngine, PricingParams};
//!
//! let engine = GreeksEngine::new(EngineConfig::default()).unwrap();
//! let params = PricingParams::put(100.0, 95.0, 0.5, engine.config().risk_free_rate);
//! let quote = BlackScholes::price(&params, 0.3);
//!
//! let iv = engine.implied_volatility(&params, quote).value().unwrap();
//! let greeks = engine.greeks(&params, iv, quote);
//! assert!(greeks.delta.or_zero() < 0.0);
//! ```

mod black_scholes;
mod config;
mod engine;
mod error;
mod normal;
mod root_finder;
mod types;

pub use black_scholes::{BlackScholes, PricingParams};
pub use config::{DEFAULT_RISK_FREE_RATE, EngineConfig};
pub use engine::GreeksEngine;
pub use error::PricingError;
pub use normal::StandardNormal;
pub use root_finder::{Root, bisect};
pub use types::{
    ContractAnalytics, GreekValue, Greeks, ImpliedVolatility, OptionType, PriceSource,
    UnavailableReason,
};
