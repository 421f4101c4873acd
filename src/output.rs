//! Rendering and persistence for the summary table.
//!
//! Supports an aligned text table, pretty JSON, and CSV.

use anyhow::Result;
use tracing::debug;

use crate::aggregation::SummaryTable;
use csv::WriterBuilder;
use std::fs::File;

pub const TABLE_TITLE: &str = "Flights per Continent for each Airport:";

/// Renders the table as aligned text: one header row of continents, then one
/// row per airport.
pub fn render_table(table: &SummaryTable) -> String {
    let row_label = "Airport";
    let label_width = table
        .airports()
        .iter()
        .map(String::len)
        .chain(std::iter::once(row_label.len()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table
        .continents()
        .iter()
        .map(|c| c.len().max(1))
        .collect();

    let mut out = format!("{row_label:<label_width$}");
    for (continent, width) in table.continents().iter().zip(&widths) {
        out.push_str(&format!("  {continent:>width$}"));
    }
    out.push('\n');

    for airport in table.airports() {
        out.push_str(&format!("{airport:<label_width$}"));
        let cells = table.row(airport).unwrap_or_default();
        for (count, width) in cells.iter().zip(&widths) {
            out.push_str(&format!("  {count:>width$}"));
        }
        out.push('\n');
    }
    out
}

/// Prints the titled table to stdout.
pub fn print_table(table: &SummaryTable) {
    println!("{TABLE_TITLE}");
    print!("{}", render_table(table));
}

/// Prints the table as pretty JSON to stdout.
pub fn print_json(table: &SummaryTable) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}

/// Writes the table to `path` as CSV, replacing any existing file.
///
/// The header is `airport` followed by every continent column.
pub fn write_csv(path: &str, table: &SummaryTable) -> Result<()> {
    debug!(path, rows = table.airports().len(), "Writing CSV table");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    let mut header = vec!["airport".to_string()];
    header.extend(table.continents().iter().cloned());
    writer.write_record(&header)?;

    for airport in table.airports() {
        let mut record = vec![airport.clone()];
        if let Some(cells) = table.row(airport) {
            record.extend(cells.iter().map(usize::to_string));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{CategorizedFlights, ContinentKey, build_count_table};
    use crate::services::flight_source::FlightRecord;
    use serde_json::json;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_table() -> SummaryTable {
        let mut flights = CategorizedFlights::default();
        for (airport, continent) in [("ADD", "Africa"), ("ADD", "Africa"), ("ADD", "Europe"), ("NBO", "Africa")] {
            flights.push(ContinentKey::new(airport, continent), FlightRecord(json!({})));
        }
        build_count_table(&flights)
    }

    #[test]
    fn test_render_table_layout() {
        let rendered = render_table(&sample_table());
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Airport  Africa  Europe");
        assert_eq!(lines[1], "ADD           2       1");
        assert_eq!(lines[2], "NBO           1       0");
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_table()).unwrap();
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample_table()).unwrap();
        assert_eq!(value["airports"], json!(["ADD", "NBO"]));
        assert_eq!(value["continents"], json!(["Africa", "Europe"]));
        assert_eq!(value["counts"], json!([[2, 1], [1, 0]]));
    }

    #[test]
    fn test_write_csv_dense_rows() {
        let path = temp_path("flight_continents_test_table.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &sample_table()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["airport,Africa,Europe", "ADD,2,1", "NBO,1,0"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_overwrites() {
        let path = temp_path("flight_continents_test_overwrite.csv");
        write_csv(&path, &sample_table()).unwrap();
        write_csv(&path, &sample_table()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
