use tracing::{debug, warn};

use crate::aggregation::types::{AirportDatasets, CategorizedFlights, ContinentKey};
use crate::error::Result;
use crate::services::geo_resolver::{GeoResolver, UNKNOWN_CONTINENT};

/// Buckets every flight record by (airport, destination continent).
///
/// Records without a destination country land in the airport's "Unknown"
/// bucket, as do records whose country the resolver cannot place. Each record
/// ends up in exactly one bucket. The only failure is the resolver itself
/// being unreachable.
#[tracing::instrument(skip_all, fields(airports = datasets.len()))]
pub async fn categorize_by_continent<R>(
    datasets: &AirportDatasets,
    resolver: &R,
) -> Result<CategorizedFlights>
where
    R: GeoResolver + ?Sized + Sync,
{
    let mut categorized = CategorizedFlights::default();

    for (airport, response) in datasets {
        let records = response.records();
        debug!(airport = %airport, records = records.len(), "Categorizing airport");

        for record in records {
            let continent = match record.arrival_country() {
                Some(code) => {
                    let continent = resolver.resolve_continent(code).await?;
                    if continent == UNKNOWN_CONTINENT {
                        warn!(airport = %airport, country_code = code, "Continent could not be resolved");
                    }
                    continent
                }
                None => UNKNOWN_CONTINENT.to_string(),
            };

            categorized.push(ContinentKey::new(airport.as_str(), continent), record.clone());
        }
    }

    debug!(
        buckets = categorized.bucket_count(),
        records = categorized.total_records(),
        "Categorization complete"
    );
    Ok(categorized)
}
