//! Option chain data model, enrichment and persistence.
//!
//! A [`Chain`] holds one underlying's spot price and dividend yield plus one
//! [`ExpirationLadder`] per expiration date. Each ladder pairs calls and puts row by
//! row on shared strikes. [`ChainAggregator`] runs the Greeks engine over every
//! contract; [`CsvExport`] and [`ChainSnapshotPackage`] persist the result.

mod aggregator;
mod contract;
mod day_count;
mod error;
/// CSV export and import.
pub mod export;
mod ladder;
mod option_chain;
mod snapshot;

pub use aggregator::{ChainAggregator, EnrichmentSummary};
pub use contract::{Contract, Quote};
pub use day_count::DayCount;
pub use error::ChainError;
pub use export::{CsvExport, read_chain, read_chain_file};
pub use ladder::ExpirationLadder;
pub use option_chain::Chain;
pub use snapshot::{CHAIN_SNAPSHOT_FORMAT_VERSION, ChainSnapshotPackage};
