//! Trait and types for retrieving flight schedules from a provider.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Which side of the schedule to request from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Direction {
    Departure,
    Arrival,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Departure => "departure",
            Direction::Arrival => "arrival",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flight as delivered by the provider.
///
/// Only `arrival.iso_country` is ever inspected; every other field is kept
/// verbatim so buckets hold the records exactly as received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FlightRecord(pub Value);

impl FlightRecord {
    /// Destination country code, or `None` when the `arrival` mapping or its
    /// `iso_country` field is missing, null or blank.
    pub fn arrival_country(&self) -> Option<&str> {
        self.0
            .get("arrival")
            .and_then(|arrival| arrival.get("iso_country"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Raw provider payload for a single airport and direction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderResponse {
    #[serde(default)]
    data: Option<Vec<FlightRecord>>,
    #[serde(default)]
    error: Option<Value>,
}

impl ProviderResponse {
    pub fn new(records: Vec<FlightRecord>) -> Self {
        Self {
            data: Some(records),
            error: None,
        }
    }

    /// Records under `data`; an absent or null `data` key yields none.
    pub fn records(&self) -> &[FlightRecord] {
        self.data.as_deref().unwrap_or_default()
    }

    /// The provider's own error description, if the payload carries one.
    pub fn error_message(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| error.get("info").and_then(Value::as_str))
            .or_else(|| error.as_str());

        Some(match message {
            Some(message) => message.to_string(),
            None => error.to_string(),
        })
    }
}

/// Abstraction over a flight-schedule provider (e.g. aviationstack).
#[async_trait::async_trait]
pub trait FlightSource {
    /// Returns the provider response for `airport` between `start_date` and
    /// `end_date` inclusive, both formatted `YYYY-MM-DD`.
    async fn fetch(
        &self,
        airport: &str,
        direction: Direction,
        start_date: &str,
        end_date: &str,
    ) -> Result<ProviderResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arrival_country_present() {
        let record = FlightRecord(json!({"arrival": {"iso_country": "KEN", "iata": "NBO"}}));
        assert_eq!(record.arrival_country(), Some("KEN"));
    }

    #[test]
    fn test_arrival_country_missing_variants() {
        let cases = [
            json!({}),
            json!({"arrival": null}),
            json!({"arrival": {}}),
            json!({"arrival": {"iso_country": null}}),
            json!({"arrival": {"iso_country": ""}}),
            json!({"arrival": {"iso_country": "  "}}),
        ];
        for case in cases {
            assert_eq!(FlightRecord(case.clone()).arrival_country(), None, "{case}");
        }
    }

    #[test]
    fn test_missing_data_key_is_empty() {
        let response: ProviderResponse = serde_json::from_value(json!({"pagination": {}})).unwrap();
        assert!(response.records().is_empty());
        assert!(response.error_message().is_none());
    }

    #[test]
    fn test_null_data_key_is_empty() {
        let response: ProviderResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(response.records().is_empty());
    }

    #[test]
    fn test_records_keep_unknown_fields() {
        let response: ProviderResponse = serde_json::from_value(json!({
            "data": [{"flight_date": "2026-01-01", "arrival": {"iso_country": "ETH"}}]
        }))
        .unwrap();

        assert_eq!(response.records().len(), 1);
        assert_eq!(response.records()[0].0["flight_date"], "2026-01-01");
    }

    #[test]
    fn test_malformed_data_is_rejected() {
        let result: std::result::Result<ProviderResponse, _> =
            serde_json::from_value(json!({"data": "oops"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_provider_error_message() {
        let response: ProviderResponse = serde_json::from_value(json!({
            "error": {"code": "invalid_access_key", "message": "You have not supplied a valid API Access Key."}
        }))
        .unwrap();

        assert_eq!(
            response.error_message().as_deref(),
            Some("You have not supplied a valid API Access Key.")
        );
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Arrival.to_string(), "arrival");
        assert_eq!(Direction::Departure.to_string(), "departure");
    }
}
