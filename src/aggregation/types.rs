//! Data types used by the aggregation pipeline.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::services::flight_source::{FlightRecord, ProviderResponse};

/// Raw provider responses keyed by airport code.
pub type AirportDatasets = BTreeMap<String, ProviderResponse>;

/// Bucket key: origin airport plus destination continent (or "Unknown").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContinentKey {
    pub airport: String,
    pub continent: String,
}

impl ContinentKey {
    pub fn new(airport: impl Into<String>, continent: impl Into<String>) -> Self {
        Self {
            airport: airport.into(),
            continent: continent.into(),
        }
    }
}

/// Records per bucket, in the order they were read from the provider.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CategorizedFlights {
    buckets: BTreeMap<ContinentKey, Vec<FlightRecord>>,
}

impl CategorizedFlights {
    /// Appends `record` to its bucket, creating the bucket on first use.
    pub fn push(&mut self, key: ContinentKey, record: FlightRecord) {
        self.buckets.entry(key).or_default().push(record);
    }

    pub fn get(&self, airport: &str, continent: &str) -> Option<&[FlightRecord]> {
        self.buckets
            .get(&ContinentKey::new(airport, continent))
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContinentKey, &[FlightRecord])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn total_records(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Reduces every bucket to its size.
    pub fn counts(&self) -> ContinentCounts {
        self.buckets
            .iter()
            .map(|(key, records)| (key.clone(), records.len()))
            .collect()
    }
}

/// Number of flights per bucket.
pub type ContinentCounts = BTreeMap<ContinentKey, usize>;

/// Dense airport × continent flight counts.
///
/// Rows and columns are sorted lexicographically; `counts[row][col]` is
/// always present, zero when no flight matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub(crate) airports: Vec<String>,
    pub(crate) continents: Vec<String>,
    pub(crate) counts: Vec<Vec<usize>>,
}

impl SummaryTable {
    pub fn airports(&self) -> &[String] {
        &self.airports
    }

    pub fn continents(&self) -> &[String] {
        &self.continents
    }

    /// Cell for (`airport`, `continent`); `None` only when either is not a
    /// row or column of this table.
    pub fn get(&self, airport: &str, continent: &str) -> Option<usize> {
        let row = self.airports.iter().position(|a| a == airport)?;
        let col = self.continents.iter().position(|c| c == continent)?;
        Some(self.counts[row][col])
    }

    /// Cells of one row, aligned with [`Self::continents`].
    pub fn row(&self, airport: &str) -> Option<&[usize]> {
        let row = self.airports.iter().position(|a| a == airport)?;
        Some(&self.counts[row])
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}
