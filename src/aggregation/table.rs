use std::collections::BTreeSet;

use crate::aggregation::types::{CategorizedFlights, ContinentCounts, SummaryTable};

/// Pivots bucket sizes into a dense airport × continent table.
///
/// Columns are the union of continents seen for any airport, so an airport
/// with no flights to a continent another airport served still gets a 0 cell.
pub fn build_count_table(categorized: &CategorizedFlights) -> SummaryTable {
    pivot_counts(&categorized.counts())
}

/// Same as [`build_count_table`] but starting from precomputed counts.
pub fn pivot_counts(counts: &ContinentCounts) -> SummaryTable {
    let airports: BTreeSet<&str> = counts.keys().map(|k| k.airport.as_str()).collect();
    let continents: BTreeSet<&str> = counts.keys().map(|k| k.continent.as_str()).collect();

    let airports: Vec<String> = airports.into_iter().map(str::to_string).collect();
    let continents: Vec<String> = continents.into_iter().map(str::to_string).collect();

    let mut cells = vec![vec![0usize; continents.len()]; airports.len()];
    for (key, count) in counts {
        // Both lookups succeed: rows and columns were collected from these keys.
        if let (Ok(row), Ok(col)) = (
            airports.binary_search(&key.airport),
            continents.binary_search(&key.continent),
        ) {
            cells[row][col] += count;
        }
    }

    SummaryTable {
        airports,
        continents,
        counts: cells,
    }
}
