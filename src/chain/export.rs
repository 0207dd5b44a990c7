//! CSV persistence for option chains.
//!
//! One row per strike per expiration. The first sixteen columns carry the raw quotes
//! and never change order; derived columns (implied volatility and Greeks) are
//! optional and always appended after `Strike`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{trace, warn};

use super::contract::{Contract, Quote};
use super::error::ChainError;
use super::ladder::ExpirationLadder;
use super::option_chain::Chain;
use crate::pricing::Greeks;

/// Quote columns, in file order.
pub const QUOTE_HEADERS: [&str; 16] = [
    "Ticker",
    "Expiration Date",
    "Yte",
    "Call Last",
    "Call Change",
    "Call Vol",
    "Call Bid",
    "Call Ask",
    "Call OpenInt",
    "Put Last",
    "Put Change",
    "Put Vol",
    "Put Bid",
    "Put Ask",
    "Put OpenInt",
    "Strike",
];

/// Date layout used in the `Expiration Date` column, e.g. `Jan 17 2025`.
pub const DATE_FORMAT: &str = "%b %-d %Y";

const DATE_PARSE_FORMAT: &str = "%b %d %Y";

/// Writes chains as CSV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvExport {
    include_greeks: bool,
}

impl CsvExport {
    /// Creates an exporter that writes quote columns only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends implied volatility and Greek columns for both legs.
    #[must_use]
    pub fn with_greeks(mut self, include_greeks: bool) -> Self {
        self.include_greeks = include_greeks;
        self
    }

    /// Header row for this exporter.
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = QUOTE_HEADERS.iter().map(|h| h.to_string()).collect();
        if self.include_greeks {
            for side in ["Call", "Put"] {
                headers.push(format!("{side} IV"));
                headers.extend(Greeks::NAMES.iter().map(|name| format!("{side} {name}")));
            }
        }
        headers
    }

    /// Writes `chain` to `writer`, CRLF terminated.
    pub fn write<W: Write>(&self, chain: &Chain, writer: W) -> Result<(), ChainError> {
        let mut csv_writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(writer);

        csv_writer.write_record(self.headers())?;

        let mut rows = 0usize;
        for ladder in chain.ladders() {
            let expiration = ladder.expiration().format(DATE_FORMAT).to_string();
            for (call, put) in ladder.rows() {
                csv_writer.write_record(self.row(chain.ticker(), &expiration, ladder, call, put))?;
                rows += 1;
            }
        }

        csv_writer.flush()?;
        trace!("wrote {} csv rows for {}", rows, chain.ticker());
        Ok(())
    }

    /// Renders `chain` as a CSV string.
    pub fn to_csv_string(&self, chain: &Chain) -> Result<String, ChainError> {
        let mut buffer = Vec::new();
        self.write(chain, &mut buffer)?;
        String::from_utf8(buffer).map_err(|error| ChainError::Csv {
            message: error.to_string(),
        })
    }

    /// Writes `chain` to the file at `path`, replacing any existing file.
    pub fn write_file<P: AsRef<Path>>(&self, chain: &Chain, path: P) -> Result<(), ChainError> {
        let file = File::create(path)?;
        self.write(chain, file)
    }

    fn row(
        &self,
        ticker: &str,
        expiration: &str,
        ladder: &ExpirationLadder,
        call: &Contract,
        put: &Contract,
    ) -> Vec<String> {
        let mut row = Vec::with_capacity(QUOTE_HEADERS.len());
        row.push(ticker.to_string());
        row.push(expiration.to_string());
        row.push(format!("{:.6}", ladder.time_to_expiry()));
        push_quote(&mut row, call.quote());
        push_quote(&mut row, put.quote());
        row.push(format!("{:.2}", call.strike()));

        if self.include_greeks {
            push_analytics(&mut row, call);
            push_analytics(&mut row, put);
        }
        row
    }
}

fn push_quote(row: &mut Vec<String>, quote: &Quote) {
    row.push(format!("{:.2}", quote.last));
    row.push(format!("{:.2}", quote.change));
    row.push(format!("{:.0}", quote.volume));
    row.push(format!("{:.2}", quote.bid));
    row.push(format!("{:.2}", quote.ask));
    row.push(format!("{:.0}", quote.open_interest));
}

fn push_analytics(row: &mut Vec<String>, contract: &Contract) {
    match contract.analytics() {
        Some(analytics) => {
            row.push(
                analytics
                    .implied_volatility
                    .value()
                    .map(|iv| iv.to_string())
                    .unwrap_or_default(),
            );
            row.extend(
                analytics
                    .greeks
                    .values()
                    .iter()
                    .map(|greek| greek.value().map(|v| v.to_string()).unwrap_or_default()),
            );
        }
        None => row.extend(std::iter::repeat_n(String::new(), 1 + Greeks::NAMES.len())),
    }
}

fn parse_number(record: &StringRecord, column: usize, line: u64) -> Result<f64, ChainError> {
    let raw = record.get(column).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let value = raw
        .replace(',', "")
        .parse::<f64>()
        .map_err(|error| ChainError::Csv {
            message: format!(
                "line {line}: invalid {} '{raw}': {error}",
                QUOTE_HEADERS[column]
            ),
        })?;

    if !value.is_finite() {
        return Err(ChainError::Csv {
            message: format!(
                "line {line}: {} must be a finite number, got '{raw}'",
                QUOTE_HEADERS[column]
            ),
        });
    }
    Ok(value)
}

fn parse_quote(record: &StringRecord, first: usize, line: u64) -> Result<Quote, ChainError> {
    Ok(Quote {
        last: parse_number(record, first, line)?,
        change: parse_number(record, first + 1, line)?,
        volume: parse_number(record, first + 2, line)?,
        bid: parse_number(record, first + 3, line)?,
        ask: parse_number(record, first + 4, line)?,
        open_interest: parse_number(record, first + 5, line)?,
    })
}

struct PendingLadder {
    label: String,
    result: Result<ExpirationLadder, ChainError>,
}

impl PendingLadder {
    fn push_strike(&mut self, strike: f64, call_quote: Quote, put_quote: Quote) {
        if let Ok(ladder) = &mut self.result {
            if let Err(error) = ladder.push_strike(strike, call_quote, put_quote) {
                self.result = Err(error);
            }
        }
    }

    fn finish(self, chain: &mut Chain) {
        match self.result {
            Ok(ladder) if !ladder.is_empty() => chain.push_ladder(ladder),
            Ok(_) => {}
            Err(error) => warn!("skipping expiration {}: {}", self.label, error),
        }
    }
}

/// Reads a chain written by [`CsvExport`].
///
/// Rows are grouped into ladders by consecutive `Expiration Date` values; columns past
/// `Strike` are ignored. Spot and dividend yield are not stored in the file and must be
/// supplied. An expiration whose rows cannot form a valid ladder is logged and skipped.
pub fn read_chain<R: Read>(
    reader: R,
    spot: f64,
    dividend_yield: f64,
) -> Result<Chain, ChainError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut chain: Option<Chain> = None;
    let mut pending: Option<PendingLadder> = None;

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < QUOTE_HEADERS.len() {
            return Err(ChainError::Csv {
                message: format!(
                    "line {line}: found {} columns, expected at least {}",
                    record.len(),
                    QUOTE_HEADERS.len()
                ),
            });
        }

        let ticker = record.get(0).unwrap_or("").trim();
        match &chain {
            Some(existing) if existing.ticker() != ticker => {
                return Err(ChainError::InvalidChain {
                    message: format!(
                        "line {line}: ticker {ticker} does not match {}",
                        existing.ticker()
                    ),
                });
            }
            Some(_) => {}
            None => chain = Some(Chain::new(ticker, spot, dividend_yield)?),
        }

        let label = record.get(1).unwrap_or("").trim();
        if pending.as_ref().is_none_or(|p| p.label != label) {
            if let (Some(done), Some(current)) = (pending.take(), chain.as_mut()) {
                done.finish(current);
            }
            let yte = parse_number(&record, 2, line)?;
            let result = NaiveDate::parse_from_str(label, DATE_PARSE_FORMAT)
                .map_err(|error| ChainError::Csv {
                    message: format!("line {line}: invalid expiration date '{label}': {error}"),
                })
                .and_then(|date| ExpirationLadder::empty(date, yte));
            pending = Some(PendingLadder {
                label: label.to_string(),
                result,
            });
        }

        let call_quote = parse_quote(&record, 3, line)?;
        let put_quote = parse_quote(&record, 9, line)?;
        let strike = parse_number(&record, 15, line)?;

        if let Some(ladder) = pending.as_mut() {
            ladder.push_strike(strike, call_quote, put_quote);
        }
    }

    let mut chain = chain.ok_or_else(|| ChainError::InvalidChain {
        message: "csv contains no rows".to_string(),
    })?;
    if let Some(done) = pending.take() {
        done.finish(&mut chain);
    }

    trace!(
        "read {} ladders for {}",
        chain.ladders().len(),
        chain.ticker()
    );
    Ok(chain)
}

/// Reads a chain from the CSV file at `path`.
pub fn read_chain_file<P: AsRef<Path>>(
    path: P,
    spot: f64,
    dividend_yield: f64,
) -> Result<Chain, ChainError> {
    let file = File::open(path)?;
    read_chain(file, spot, dividend_yield)
}
