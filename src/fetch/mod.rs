mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;
use reqwest::Url;

/// Builds `base/path?query` without touching any credential parameters.
pub fn build_url(base: &str, path: &str, query: &[(&str, &str)]) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    if query.is_empty() {
        return Ok(Url::parse(&joined)?);
    }
    Ok(Url::parse_with_params(&joined, query)?)
}

/// Issues a GET through `client` and hands back the raw response.
///
/// Status handling is left to the caller: the flight source treats any
/// non-success status as fatal, the geo resolver folds it into "Unknown".
pub async fn get<C: HttpClient + ?Sized>(client: &C, url: Url) -> Result<reqwest::Response> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);
    Ok(client.execute(req).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_path_and_query() {
        let url = build_url(
            "http://api.aviationstack.com/v1/",
            "/flights",
            &[("arr_iata", "ADD"), ("type", "arrival")],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "http://api.aviationstack.com/v1/flights?arr_iata=ADD&type=arrival"
        );
    }

    #[test]
    fn test_build_url_encodes_date_range_comma() {
        let url = build_url(
            "http://example.test",
            "flights",
            &[("flight_date", "2025-10-15,2026-10-15")],
        )
        .unwrap();

        assert_eq!(url.query(), Some("flight_date=2025-10-15%2C2026-10-15"));
    }

    #[test]
    fn test_build_url_without_query_has_no_question_mark() {
        let url = build_url("https://restcountries.com/v3.1", "alpha", &[]).unwrap();
        assert_eq!(url.as_str(), "https://restcountries.com/v3.1/alpha");
    }

    #[test]
    fn test_build_url_rejects_garbage_base() {
        assert!(build_url("not a url", "flights", &[]).is_err());
    }
}
