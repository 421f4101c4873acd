use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::fetch::{self, HttpClient};
use crate::services::geo_resolver::{GeoResolver, UNKNOWN_CONTINENT};

/// [`GeoResolver`] backed by the REST Countries `/alpha/{code}` endpoint.
///
/// Anything short of a transport failure (404, odd payloads, missing
/// continent) resolves to [`UNKNOWN_CONTINENT`].
pub struct RestCountriesClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> RestCountriesClient<C> {
    pub fn new(http: C, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl<C: HttpClient> GeoResolver for RestCountriesClient<C> {
    #[tracing::instrument(skip(self))]
    async fn resolve_continent(&self, country_code: &str) -> Result<String> {
        let unavailable = |message: String| ReportError::ResolverUnavailable {
            code: country_code.to_string(),
            message,
        };

        let mut url = fetch::build_url(&self.base_url, "alpha", &[])
            .map_err(|e| unavailable(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| unavailable(format!("cannot append path to {}", self.base_url)))?
            .push(country_code);

        let response = fetch::get(&self.http, url)
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "Country lookup returned non-success status");
            return Ok(UNKNOWN_CONTINENT.to_string());
        }

        let continent = match response.json::<Value>().await {
            Ok(body) => continent_from_body(&body),
            Err(e) => {
                debug!(error = %e, "Country lookup returned unparseable body");
                None
            }
        };

        Ok(continent.unwrap_or_else(|| UNKNOWN_CONTINENT.to_string()))
    }
}

/// Extracts the continent from a country payload.
///
/// v3.1 answers with an array of countries each carrying a `continents`
/// list; a bare object or a singular `continent` string is accepted too.
pub(crate) fn continent_from_body(body: &Value) -> Option<String> {
    let country = match body {
        Value::Array(countries) => countries.first()?,
        other => other,
    };

    let from_list = country
        .get("continents")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(Value::as_str);
    let from_field = || country.get("continent").and_then(Value::as_str);

    from_list
        .or_else(from_field)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
