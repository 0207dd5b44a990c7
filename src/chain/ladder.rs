//! Index-aligned call/put rows sharing one expiration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::contract::{Contract, Quote};
use super::error::ChainError;
use crate::pricing::OptionType;

/// All contracts for one expiration date.
///
/// `calls[i]` and `puts[i]` always share a strike, both sequences have the same length,
/// and every contract carries the ladder's time to expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationLadder {
    expiration: NaiveDate,
    time_to_expiry: f64,
    calls: Vec<Contract>,
    puts: Vec<Contract>,
}

impl ExpirationLadder {
    /// Creates an empty ladder.
    pub fn empty(expiration: NaiveDate, time_to_expiry: f64) -> Result<Self, ChainError> {
        Self::new(expiration, time_to_expiry, Vec::new(), Vec::new())
    }

    /// Creates a ladder from already built contracts, checking every row.
    pub fn new(
        expiration: NaiveDate,
        time_to_expiry: f64,
        calls: Vec<Contract>,
        puts: Vec<Contract>,
    ) -> Result<Self, ChainError> {
        let ladder = Self {
            expiration,
            time_to_expiry,
            calls,
            puts,
        };
        ladder.validate()?;
        Ok(ladder)
    }

    /// Re-checks the row invariants.
    pub fn validate(&self) -> Result<(), ChainError> {
        if !(self.time_to_expiry.is_finite() && self.time_to_expiry >= 0.0) {
            return Err(ChainError::InvalidChain {
                message: format!(
                    "time to expiry for {} must be non-negative, got {}",
                    self.expiration, self.time_to_expiry
                ),
            });
        }

        if self.calls.len() != self.puts.len() {
            return Err(ChainError::LadderLengthMismatch {
                calls: self.calls.len(),
                puts: self.puts.len(),
            });
        }

        for (index, (call, put)) in self.calls.iter().zip(&self.puts).enumerate() {
            self.check_contract(index, call, OptionType::Call)?;
            self.check_contract(index, put, OptionType::Put)?;

            if call.strike() != put.strike() {
                return Err(ChainError::LadderMisaligned {
                    index,
                    call_strike: call.strike(),
                    put_strike: put.strike(),
                });
            }
        }

        Ok(())
    }

    fn check_contract(
        &self,
        index: usize,
        contract: &Contract,
        expected: OptionType,
    ) -> Result<(), ChainError> {
        if contract.option_type() != expected {
            return Err(ChainError::ContractMismatch {
                message: format!(
                    "row {index} expects a {expected:?}, found a {:?}",
                    contract.option_type()
                ),
            });
        }

        if contract.time_to_expiry() != self.time_to_expiry {
            return Err(ChainError::ContractMismatch {
                message: format!(
                    "row {index} has time to expiry {}, ladder has {}",
                    contract.time_to_expiry(),
                    self.time_to_expiry
                ),
            });
        }

        if !(contract.strike().is_finite() && contract.strike() > 0.0) {
            return Err(ChainError::ContractMismatch {
                message: format!("row {index} has invalid strike {}", contract.strike()),
            });
        }

        if !contract.quote().is_finite() {
            return Err(ChainError::ContractMismatch {
                message: format!(
                    "row {index} {:?} at strike {} has a non-finite quote",
                    expected,
                    contract.strike()
                ),
            });
        }

        Ok(())
    }

    /// Appends a row for `strike` built from the two quotes.
    pub fn push_strike(
        &mut self,
        strike: f64,
        call_quote: Quote,
        put_quote: Quote,
    ) -> Result<(), ChainError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(ChainError::ContractMismatch {
                message: format!("strike must be positive, got {strike}"),
            });
        }

        if !(call_quote.is_finite() && put_quote.is_finite()) {
            return Err(ChainError::ContractMismatch {
                message: format!("quotes at strike {strike} must be finite"),
            });
        }

        self.calls.push(Contract::call(strike, self.time_to_expiry, call_quote));
        self.puts.push(Contract::put(strike, self.time_to_expiry, put_quote));
        Ok(())
    }

    /// Expiration date.
    #[must_use]
    pub fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    /// Time to expiration in years.
    #[must_use]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Calls in row order.
    #[must_use]
    pub fn calls(&self) -> &[Contract] {
        &self.calls
    }

    /// Puts in row order.
    #[must_use]
    pub fn puts(&self) -> &[Contract] {
        &self.puts
    }

    /// Number of strikes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Returns true when the ladder has no strikes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Strikes in row order.
    #[must_use]
    pub fn strikes(&self) -> Vec<f64> {
        self.calls.iter().map(Contract::strike).collect()
    }

    /// `(call, put)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (&Contract, &Contract)> {
        self.calls.iter().zip(self.puts.iter())
    }

    /// Every contract, calls first. Row alignment cannot be broken through this.
    pub(crate) fn contracts_mut(&mut self) -> impl Iterator<Item = &mut Contract> {
        self.calls.iter_mut().chain(self.puts.iter_mut())
    }
}
