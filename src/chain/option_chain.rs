//! Option chain for one underlying.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::error::ChainError;
use super::ladder::ExpirationLadder;

/// Every expiration quoted for one underlying, with the chain-wide market data used to
/// value them.
///
/// Ladders are kept ordered by increasing time to expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    ticker: String,
    spot: f64,
    dividend_yield: f64,
    ladders: Vec<ExpirationLadder>,
}

impl Chain {
    /// Creates an empty chain.
    ///
    /// # Arguments
    /// - `ticker`: Underlying symbol
    /// - `spot`: Underlying price, must be positive
    /// - `dividend_yield`: Continuously compounded yield, e.g. 0.015 for 1.5%
    pub fn new(ticker: &str, spot: f64, dividend_yield: f64) -> Result<Self, ChainError> {
        let chain = Self {
            ticker: ticker.to_string(),
            spot,
            dividend_yield,
            ladders: Vec::new(),
        };
        chain.validate()?;
        Ok(chain)
    }

    /// Re-checks chain-level values, ladder order and every ladder's rows.
    pub fn validate(&self) -> Result<(), ChainError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(ChainError::InvalidChain {
                message: format!("spot price must be positive, got {}", self.spot),
            });
        }

        if !self.dividend_yield.is_finite() {
            return Err(ChainError::InvalidChain {
                message: format!("dividend yield must be finite, got {}", self.dividend_yield),
            });
        }

        for pair in self.ladders.windows(2) {
            if pair[0].time_to_expiry() > pair[1].time_to_expiry() {
                return Err(ChainError::InvalidChain {
                    message: format!(
                        "ladder {} is listed after the later ladder {}",
                        pair[1].expiration(),
                        pair[0].expiration()
                    ),
                });
            }
        }

        for ladder in &self.ladders {
            ladder.validate()?;
        }

        Ok(())
    }

    /// Adds a ladder, keeping ladders ordered by time to expiry.
    ///
    /// Ladders with equal time to expiry keep their insertion order.
    pub fn push_ladder(&mut self, ladder: ExpirationLadder) {
        let position = self
            .ladders
            .partition_point(|existing| existing.time_to_expiry() <= ladder.time_to_expiry());
        trace!(
            "inserting ladder {} ({} strikes) at position {}",
            ladder.expiration(),
            ladder.len(),
            position
        );
        self.ladders.insert(position, ladder);
    }

    /// Underlying symbol.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Underlying spot price.
    #[must_use]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Continuously compounded dividend yield.
    #[must_use]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Ladders ordered by increasing time to expiry.
    #[must_use]
    pub fn ladders(&self) -> &[ExpirationLadder] {
        &self.ladders
    }

    /// Total number of calls and puts.
    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.ladders.iter().map(|ladder| 2 * ladder.len()).sum()
    }

    pub(crate) fn ladders_mut(&mut self) -> &mut [ExpirationLadder] {
        &mut self.ladders
    }
}
