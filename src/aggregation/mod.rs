//! Flight aggregation engine.
//!
//! Buckets flight records by (airport, destination continent), then pivots
//! the bucket sizes into a dense airport × continent table.

pub mod categorize;
pub mod table;
pub mod types;

pub use categorize::categorize_by_continent;
pub use table::build_count_table;
pub use types::{AirportDatasets, CategorizedFlights, ContinentCounts, ContinentKey, SummaryTable};
