use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::fetch::{self, HttpClient, auth::UrlParam};
use crate::services::flight_source::{Direction, FlightSource, ProviderResponse};

/// [`FlightSource`] backed by the aviationstack `/flights` endpoint.
///
/// The access key is attached by the [`UrlParam`] transport, so it never
/// appears in the URLs this client builds or logs.
pub struct AviationstackClient<C> {
    http: UrlParam<C>,
    base_url: String,
}

impl<C: HttpClient> AviationstackClient<C> {
    pub fn new(http: C, api_key: String, base_url: String) -> Self {
        Self {
            http: UrlParam::access_key(http, api_key),
            base_url,
        }
    }
}

#[async_trait]
impl<C: HttpClient> FlightSource for AviationstackClient<C> {
    #[tracing::instrument(skip(self))]
    async fn fetch(
        &self,
        airport: &str,
        direction: Direction,
        start_date: &str,
        end_date: &str,
    ) -> Result<ProviderResponse> {
        let flight_date = format!("{start_date},{end_date}");
        let url = fetch::build_url(
            &self.base_url,
            "flights",
            &[
                ("arr_iata", airport),
                ("type", direction.as_str()),
                ("flight_date", flight_date.as_str()),
            ],
        )
        .map_err(|e| ReportError::source_unavailable(airport, direction, e))?;

        debug!(url = %url, "Requesting flights");
        let response = fetch::get(&self.http, url)
            .await
            .map_err(|e| ReportError::source_unavailable(airport, direction, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReportError::source_unavailable(airport, direction, e))?;

        if !status.is_success() {
            return Err(ReportError::source_unavailable(
                airport,
                direction,
                format!("API returned status {status}: {body}"),
            ));
        }

        let parsed = parse_flights_body(airport, direction, &body)?;
        info!(records = parsed.records().len(), "Flights fetched");
        Ok(parsed)
    }
}

/// Decodes a successful `/flights` body, turning provider-reported errors
/// and unexpected shapes into [`ReportError::SourceUnavailable`].
pub(crate) fn parse_flights_body(
    airport: &str,
    direction: Direction,
    body: &str,
) -> Result<ProviderResponse> {
    let parsed: ProviderResponse = serde_json::from_str(body).map_err(|e| {
        ReportError::source_unavailable(airport, direction, format!("malformed response: {e}"))
    })?;

    if let Some(message) = parsed.error_message() {
        return Err(ReportError::source_unavailable(airport, direction, message));
    }
    Ok(parsed)
}
