//! Enriches an option chain and prints it as CSV with Greeks.
//!
//! Usage:
//!
//! ```sh
//! # synthetic chain priced off a volatility smile
//! cargo run -p demos --bin enrich_chain
//!
//! # chain previously written by CsvExport
//! cargo run -p demos --bin enrich_chain -- chain.csv 512.40 0.013
//! ```

use chrono::{Days, Utc};
use greeks_rs::chain::read_chain_file;
use greeks_rs::prelude::*;
use tracing::{info, warn};

const SPOT: f64 = 500.0;
const DIVIDEND_YIELD: f64 = 0.013;

/// Prices a quote at `vol`, with a one-cent-wide market either side of it.
fn quote_at(params: &PricingParams, vol: f64) -> Quote {
    let price = (BlackScholes::price(params, vol) * 100.0).round() / 100.0;
    let bid = (price - 0.01).max(0.0);
    Quote::new(price, bid, price + 0.01, 100.0, 1_000.0, 0.0)
}

fn synthetic_chain(rate: f64) -> Result<Chain, ChainError> {
    let now = Utc::now();
    let today = now.date_naive();
    let day_count = DayCount::default();
    let mut chain = Chain::new("SPY", SPOT, DIVIDEND_YIELD)?;

    for days_out in [7u64, 30, 90, 180] {
        let Some(expiration) = today.checked_add_days(Days::new(days_out)) else {
            continue;
        };
        let t = day_count.year_fraction(now, expiration);
        let mut ladder = ExpirationLadder::empty(expiration, t)?;

        for step in -4..=4 {
            let strike = SPOT + 10.0 * f64::from(step);
            let moneyness = (strike / SPOT).ln();
            let vol = 0.18 + 1.2 * moneyness * moneyness;
            let call =
                PricingParams::call(SPOT, strike, t, rate).with_dividend_yield(DIVIDEND_YIELD);
            let put = call.mirrored();
            ladder.push_strike(strike, quote_at(&call, vol), quote_at(&put, vol))?;
        }
        chain.push_ladder(ladder);
    }

    // Already expired: reported as unavailable, never aborts enrichment.
    if let Some(expired) = today.checked_sub_days(Days::new(1)) {
        let mut ladder = ExpirationLadder::empty(expired, day_count.year_fraction(now, expired))?;
        let stale = Quote::new(1.25, 1.20, 1.30, 5.0, 50.0, 0.0);
        ladder.push_strike(SPOT, stale, Quote::default())?;
        chain.push_ladder(ladder);
    }

    Ok(chain)
}

fn load_chain(rate: f64) -> Result<Chain, Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(synthetic_chain(rate)?),
        [path, spot, dividend_yield] => {
            let chain = read_chain_file(path, spot.parse()?, dividend_yield.parse()?)?;
            info!("loaded {} ladders from {}", chain.ladders().len(), path);
            Ok(chain)
        }
        _ => Err("usage: enrich_chain [<csv path> <spot> <dividend yield>]".into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::default();
    let aggregator = ChainAggregator::with_config(config.clone())?;
    info!(
        "risk-free rate {}, volatility bracket [{}, {}], tolerance {}",
        config.risk_free_rate, config.lower_bound, config.upper_bound, config.tolerance
    );

    let mut chain = load_chain(config.risk_free_rate)?;
    let summary = aggregator.enrich_in_place(&mut chain);
    info!("summary {}", serde_json::to_string(&summary)?);

    if summary.unavailable > 0 {
        warn!(
            "{} of {} contracts have no implied volatility",
            summary.unavailable, summary.contracts
        );
    }

    for ladder in chain.ladders() {
        let atm = ladder.calls().iter().min_by(|a, b| {
            let distance = |c: &Contract| (c.strike() - chain.spot()).abs();
            distance(a).total_cmp(&distance(b))
        });
        if let Some(analytics) = atm.and_then(|contract| contract.analytics()) {
            info!(
                "{} (T = {:.4}) ATM call iv {:.4} delta {:.4} gamma {:.6}",
                ladder.expiration(),
                ladder.time_to_expiry(),
                analytics.implied_volatility.or_zero(),
                analytics.greeks.delta.or_zero(),
                analytics.greeks.gamma.or_zero()
            );
        }
    }

    let snapshot = ChainSnapshotPackage::new(chain.clone())?;
    info!("snapshot checksum {}", snapshot.checksum);

    let export = CsvExport::new().with_greeks(true);
    export.write(&chain, std::io::stdout().lock())?;

    Ok(())
}
