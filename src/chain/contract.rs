//! Quotes and option contracts.

use serde::{Deserialize, Serialize};

use crate::pricing::{ContractAnalytics, OptionType, PriceSource};

/// One market snapshot for a single option leg.
///
/// Quotes are plain values; a new snapshot is a new `Quote`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Last traded price.
    pub last: f64,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Contracts traded in the session.
    pub volume: f64,
    /// Open interest.
    pub open_interest: f64,
    /// Day-over-day change of the last price.
    pub change: f64,
}

impl Quote {
    /// Creates a quote.
    #[must_use]
    pub fn new(
        last: f64,
        bid: f64,
        ask: f64,
        volume: f64,
        open_interest: f64,
        change: f64,
    ) -> Self {
        Self {
            last,
            bid,
            ask,
            volume,
            open_interest,
            change,
        }
    }

    /// Mid price `(bid + ask) / 2`.
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Spread `ask - bid`.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    /// True when every field is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.last,
            self.bid,
            self.ask,
            self.volume,
            self.open_interest,
            self.change,
        ]
        .iter()
        .all(|value| value.is_finite())
    }

    /// Price used for implied volatility under `source`.
    #[must_use]
    pub fn price(&self, source: PriceSource) -> f64 {
        match source {
            PriceSource::LastTrade => self.last,
            PriceSource::MidPrice => self.mid(),
        }
    }
}

/// A single option leg.
///
/// Strike, time to expiry, option type and quote are fixed at construction.
/// Enrichment returns a new contract carrying [`ContractAnalytics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    option_type: OptionType,
    strike: f64,
    time_to_expiry: f64,
    quote: Quote,
    analytics: Option<ContractAnalytics>,
}

impl Contract {
    /// Creates a contract without analytics.
    #[must_use]
    pub fn new(option_type: OptionType, strike: f64, time_to_expiry: f64, quote: Quote) -> Self {
        Self {
            option_type,
            strike,
            time_to_expiry,
            quote,
            analytics: None,
        }
    }

    /// Creates a call.
    #[must_use]
    pub fn call(strike: f64, time_to_expiry: f64, quote: Quote) -> Self {
        Self::new(OptionType::Call, strike, time_to_expiry, quote)
    }

    /// Creates a put.
    #[must_use]
    pub fn put(strike: f64, time_to_expiry: f64, quote: Quote) -> Self {
        Self::new(OptionType::Put, strike, time_to_expiry, quote)
    }

    /// Call or put.
    #[must_use]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike price.
    #[must_use]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiration in years.
    #[must_use]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Market quote.
    #[must_use]
    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    /// Implied volatility and Greeks, once enriched.
    #[must_use]
    pub fn analytics(&self) -> Option<&ContractAnalytics> {
        self.analytics.as_ref()
    }

    /// Returns a copy of this contract carrying `analytics`.
    #[must_use]
    pub fn with_analytics(&self, analytics: ContractAnalytics) -> Self {
        Self {
            analytics: Some(analytics),
            ..self.clone()
        }
    }
}
