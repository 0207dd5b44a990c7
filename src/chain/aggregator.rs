//! Chain-wide enrichment.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::option_chain::Chain;
use crate::pricing::{EngineConfig, GreeksEngine, ImpliedVolatility, PricingError};

/// Counts gathered after a chain has been enriched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    /// Contracts visited.
    pub contracts: usize,
    /// Contracts with a solved implied volatility.
    pub solved: usize,
    /// Contracts whose implied volatility is unavailable.
    pub unavailable: usize,
    /// Individual Greeks left indeterminate on solved contracts.
    pub indeterminate_greeks: usize,
}

impl EnrichmentSummary {
    /// Tallies the analytics already attached to `chain`.
    ///
    /// Contracts without analytics count as visited but neither solved nor unavailable.
    #[must_use]
    pub fn of(chain: &Chain) -> Self {
        let mut summary = Self::default();
        for ladder in chain.ladders() {
            for contract in ladder.calls().iter().chain(ladder.puts()) {
                summary.contracts += 1;
                let Some(analytics) = contract.analytics() else {
                    continue;
                };
                if analytics.implied_volatility.is_solved() {
                    summary.solved += 1;
                    summary.indeterminate_greeks += analytics.greeks.indeterminate_count();
                } else {
                    summary.unavailable += 1;
                }
            }
        }
        summary
    }
}

/// Applies a [`GreeksEngine`] to every contract of a chain.
///
/// Contracts are independent of one another, so the traversal order has no effect on
/// the result and enriching the same chain twice gives identical output.
#[derive(Debug, Clone, Default)]
pub struct ChainAggregator {
    engine: GreeksEngine,
}

impl ChainAggregator {
    /// Creates an aggregator around an existing engine.
    #[must_use]
    pub fn new(engine: GreeksEngine) -> Self {
        Self { engine }
    }

    /// Creates an aggregator with a fresh engine built from `config`.
    pub fn with_config(config: EngineConfig) -> Result<Self, PricingError> {
        Ok(Self::new(GreeksEngine::new(config)?))
    }

    /// The engine used for each contract.
    #[must_use]
    pub fn engine(&self) -> &GreeksEngine {
        &self.engine
    }

    /// Returns an enriched copy of `chain`, leaving the input untouched.
    #[must_use]
    pub fn enrich(&self, chain: &Chain) -> Chain {
        let mut enriched = chain.clone();
        self.enrich_in_place(&mut enriched);
        enriched
    }

    /// Replaces every contract of `chain` with its enriched counterpart.
    pub fn enrich_in_place(&self, chain: &mut Chain) -> EnrichmentSummary {
        let spot = chain.spot();
        let dividend_yield = chain.dividend_yield();

        for ladder in chain.ladders_mut() {
            debug!(
                "enriching {} strikes expiring {} (T = {:.6})",
                ladder.len(),
                ladder.expiration(),
                ladder.time_to_expiry()
            );
            for contract in ladder.contracts_mut() {
                let analytics = self.engine.evaluate(contract, spot, dividend_yield);
                if let ImpliedVolatility::Unavailable(reason) = analytics.implied_volatility {
                    debug!(
                        "implied volatility unavailable for {:?} {} ({:?})",
                        contract.option_type(),
                        contract.strike(),
                        reason
                    );
                }
                *contract = contract.with_analytics(analytics);
            }
        }

        let summary = EnrichmentSummary::of(chain);
        info!(
            "enriched {}: {} contracts, {} solved, {} unavailable",
            chain.ticker(),
            summary.contracts,
            summary.solved,
            summary.unavailable
        );
        summary
    }

    /// Enriches `chain` across the rayon thread pool.
    ///
    /// Produces the same chain as [`enrich`](Self::enrich).
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn enrich_par(&self, chain: &Chain) -> Chain {
        use rayon::prelude::*;

        let mut enriched = chain.clone();
        let spot = enriched.spot();
        let dividend_yield = enriched.dividend_yield();

        let mut contracts: Vec<_> = enriched
            .ladders_mut()
            .iter_mut()
            .flat_map(|ladder| ladder.contracts_mut())
            .collect();

        contracts.par_iter_mut().for_each(|contract| {
            let analytics = self.engine.evaluate(contract, spot, dividend_yield);
            **contract = contract.with_analytics(analytics);
        });

        let summary = EnrichmentSummary::of(&enriched);
        info!(
            "enriched {} in parallel: {} contracts, {} solved, {} unavailable",
            enriched.ticker(),
            summary.contracts,
            summary.solved,
            summary.unavailable
        );
        enriched
    }
}
