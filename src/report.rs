//! End-to-end report flow: fetch both directions, categorize, pivot.

use tracing::{info, warn};

use crate::aggregation::{AirportDatasets, SummaryTable, build_count_table, categorize_by_continent};
use crate::error::{ReportError, Result};
use crate::services::flight_source::{Direction, FlightSource};
use crate::services::geo_resolver::GeoResolver;
use crate::window::ReportWindow;

/// What to report on.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub airports: Vec<String>,
    pub window: ReportWindow,
    /// Which fetched direction feeds the aggregation.
    pub direction: Direction,
}

/// Both sides of the schedule for every configured airport.
#[derive(Debug, Default)]
pub struct ScheduleData {
    pub departures: AirportDatasets,
    pub arrivals: AirportDatasets,
}

impl ScheduleData {
    pub fn for_direction(&self, direction: Direction) -> &AirportDatasets {
        match direction {
            Direction::Departure => &self.departures,
            Direction::Arrival => &self.arrivals,
        }
    }
}

/// Total number of flight records across all airports.
pub fn record_count(datasets: &AirportDatasets) -> usize {
    datasets.values().map(|r| r.records().len()).sum()
}

/// Fetches one direction for each airport in turn.
///
/// The first failing airport aborts the whole fetch; nothing fetched so far
/// is returned.
#[tracing::instrument(skip(source, airports), fields(airports = airports.len()))]
pub async fn fetch_airport_datasets<S>(
    source: &S,
    airports: &[String],
    direction: Direction,
    window: &ReportWindow,
) -> Result<AirportDatasets>
where
    S: FlightSource + ?Sized + Sync,
{
    let start = window.start_str();
    let end = window.end_str();

    let mut datasets = AirportDatasets::new();
    for airport in airports {
        let response = source.fetch(airport, direction, &start, &end).await?;
        datasets.insert(airport.clone(), response);
    }
    Ok(datasets)
}

/// Fetches departures then arrivals for every airport.
pub async fn fetch_schedule<S>(source: &S, options: &ReportOptions) -> Result<ScheduleData>
where
    S: FlightSource + ?Sized + Sync,
{
    let departures =
        fetch_airport_datasets(source, &options.airports, Direction::Departure, &options.window).await?;
    let arrivals =
        fetch_airport_datasets(source, &options.airports, Direction::Arrival, &options.window).await?;

    info!(
        departures = record_count(&departures),
        arrivals = record_count(&arrivals),
        "Schedule fetched"
    );
    Ok(ScheduleData { departures, arrivals })
}

/// Runs the full report and returns the dense airport × continent table.
///
/// # Errors
///
/// [`ReportError::EmptyResult`] when the selected direction has no records
/// for any airport; otherwise whatever the flight source or resolver raised.
#[tracing::instrument(skip_all, fields(direction = %options.direction, start = %options.window.start, end = %options.window.end))]
pub async fn run_report<S, R>(source: &S, resolver: &R, options: &ReportOptions) -> Result<SummaryTable>
where
    S: FlightSource + ?Sized + Sync,
    R: GeoResolver + ?Sized + Sync,
{
    let schedule = fetch_schedule(source, options).await?;
    let datasets = schedule.for_direction(options.direction);

    if record_count(datasets) == 0 {
        warn!("No flight records returned for any airport");
        return Err(ReportError::EmptyResult);
    }

    let categorized = categorize_by_continent(datasets, resolver).await?;
    let table = build_count_table(&categorized);

    info!(
        airports = table.airports().len(),
        continents = table.continents().len(),
        flights = table.total(),
        "Summary table built"
    );
    Ok(table)
}
