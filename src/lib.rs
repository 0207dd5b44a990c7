//! # greeks-rs
//!
//! Implied volatility and the full Black-Scholes Greeks profile for listed option
//! chains.
//!
//! Given an option's quoted price, strike and time to expiration, plus the underlying's
//! spot price and dividend yield, the crate solves for the volatility that reproduces
//! the quote and derives fifteen sensitivities from it:
//!
//! | Order  | Greeks                                               |
//! |--------|------------------------------------------------------|
//! | First  | delta, elasticity, vega, theta, rho, epsilon         |
//! | Second | gamma, vanna, charm, vomma, veta                     |
//! | Third  | speed, zomma, color, ultima                          |
//!
//! ## Layout
//!
//! - [`pricing`]: normal distribution, bisection root finder, Black-Scholes pricer and
//!   the [`GreeksEngine`](pricing::GreeksEngine)
//! - [`chain`]: contracts, expiration ladders and chains, the
//!   [`ChainAggregator`](chain::ChainAggregator) that enriches every contract, and CSV /
//!   JSON persistence
//!
//! ## Failure reporting
//!
//! A single contract never aborts the processing of a chain. When no volatility inside
//! the solver bracket reproduces a quote the contract reports
//! [`ImpliedVolatility::Unavailable`](pricing::ImpliedVolatility::Unavailable) with a
//! reason, and every Greek is
//! [`GreekValue::Indeterminate`](pricing::GreekValue::Indeterminate). Consumers that
//! need the flat `0.0` sentinel can call `or_zero()` on either type.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use greeks_rs::prelude::*;
//!
//! let mut chain = Chain::new("SPY", 100.0, 0.0).unwrap();
//! let expiration = NaiveDate::from_ymd_opt(2025, 12, 19).unwrap();
//! let mut ladder = ExpirationLadder::empty(expiration, 1.0).unwrap();
//! ladder
//!     .push_strike(
//!         100.0,
//!         Quote::new(10.45, 10.40, 10.50, 120.0, 3400.0, 0.15),
//!         Quote::new(5.26, 5.20, 5.30, 80.0, 2100.0, -0.10),
//!     )
//!     .unwrap();
//! chain.push_ladder(ladder);
//!
//! let aggregator = ChainAggregator::with_config(EngineConfig::default()).unwrap();
//! let enriched = aggregator.enrich(&chain);
//!
//! let call = &enriched.ladders()[0].calls()[0];
//! let analytics = call.analytics().unwrap();
//! assert!(analytics.implied_volatility.is_solved());
//! assert!(analytics.greeks.gamma.or_zero() > 0.0);
//! ```
//!
//! ## Features
//!
//! - `parallel`: enables [`ChainAggregator::enrich_par`](chain::ChainAggregator), which
//!   spreads contracts across the rayon thread pool.

pub mod chain;
pub mod pricing;

/// Commonly used types.
pub mod prelude {
    pub use crate::chain::{
        Chain, ChainAggregator, ChainError, ChainSnapshotPackage, Contract, CsvExport, DayCount,
        EnrichmentSummary, ExpirationLadder, Quote,
    };
    pub use crate::pricing::{
        BlackScholes, ContractAnalytics, EngineConfig, GreekValue, Greeks, GreeksEngine,
        ImpliedVolatility, OptionType, PriceSource, PricingError, PricingParams,
        UnavailableReason,
    };
}
