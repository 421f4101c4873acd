//! Runtime configuration read from the environment.
//!
//! `.env` is loaded by the binary before [`Config::from_env`] runs, so every
//! setting here can live in that file instead of the shell.

use crate::error::{ReportError, Result};

pub const DEFAULT_FLIGHTS_BASE_URL: &str = "http://api.aviationstack.com/v1";
pub const DEFAULT_COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";
pub const DEFAULT_AIRPORTS: &[&str] = &["ADD", "NBO"];
pub const DEFAULT_WINDOW_DAYS: u64 = 365;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// aviationstack access key.
    pub api_key: String,
    pub flights_base_url: String,
    pub countries_base_url: String,
    /// IATA codes to report on, upper-cased.
    pub airports: Vec<String>,
    pub window_days: u64,
}

impl Config {
    /// Loads the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("AVIATIONSTACK_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or(ReportError::MissingConfig("AVIATIONSTACK_API_KEY"))?;

        let airports = match non_empty("REPORT_AIRPORTS") {
            Some(raw) => parse_airports(&raw)?,
            None => DEFAULT_AIRPORTS.iter().map(|a| a.to_string()).collect(),
        };

        let window_days = match non_empty("REPORT_WINDOW_DAYS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ReportError::InvalidConfig {
                    key: "REPORT_WINDOW_DAYS",
                    message: e.to_string(),
                })?,
            None => DEFAULT_WINDOW_DAYS,
        };

        Ok(Self {
            api_key,
            flights_base_url: non_empty("AVIATIONSTACK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FLIGHTS_BASE_URL.to_string()),
            countries_base_url: non_empty("RESTCOUNTRIES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_COUNTRIES_BASE_URL.to_string()),
            airports,
            window_days,
        })
    }

    /// Replaces the airport list and window when given on the command line.
    pub fn with_overrides(mut self, airports: Option<Vec<String>>, days: Option<u64>) -> Result<Self> {
        if let Some(airports) = airports {
            self.airports = parse_airports(&airports.join(","))?;
        }
        if let Some(days) = days {
            self.window_days = days;
        }
        Ok(self)
    }
}

/// Splits a comma-separated IATA list, dropping blanks and duplicates.
pub fn parse_airports(raw: &str) -> Result<Vec<String>> {
    let mut airports: Vec<String> = Vec::new();
    for code in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let code = code.to_ascii_uppercase();
        if !airports.contains(&code) {
            airports.push(code);
        }
    }

    if airports.is_empty() {
        return Err(ReportError::InvalidConfig {
            key: "REPORT_AIRPORTS",
            message: "no airport codes given".to_string(),
        });
    }
    Ok(airports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_key() {
        let config = Config::from_lookup(lookup(&[("AVIATIONSTACK_API_KEY", "secret")])).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.airports, vec!["ADD", "NBO"]);
        assert_eq!(config.window_days, 365);
        assert_eq!(config.flights_base_url, DEFAULT_FLIGHTS_BASE_URL);
        assert_eq!(config.countries_base_url, DEFAULT_COUNTRIES_BASE_URL);
    }

    #[test]
    fn test_legacy_api_key_variable() {
        let config = Config::from_lookup(lookup(&[("API_KEY", "legacy")])).unwrap();
        assert_eq!(config.api_key, "legacy");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let err = Config::from_lookup(lookup(&[("AVIATIONSTACK_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ReportError::MissingConfig("AVIATIONSTACK_API_KEY")));
    }

    #[test]
    fn test_airports_and_days_from_env() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEY", "k"),
            ("REPORT_AIRPORTS", "jfk, lhr,,JFK"),
            ("REPORT_WINDOW_DAYS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.airports, vec!["JFK", "LHR"]);
        assert_eq!(config.window_days, 30);
    }

    #[test]
    fn test_bad_window_days() {
        let err = Config::from_lookup(lookup(&[("API_KEY", "k"), ("REPORT_WINDOW_DAYS", "a year")]))
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidConfig { key: "REPORT_WINDOW_DAYS", .. }));
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::from_lookup(lookup(&[("API_KEY", "k")]))
            .unwrap()
            .with_overrides(Some(vec!["cai".to_string()]), Some(7))
            .unwrap();

        assert_eq!(config.airports, vec!["CAI"]);
        assert_eq!(config.window_days, 7);
    }

    #[test]
    fn test_empty_airport_list_rejected() {
        assert!(parse_airports(" , ").is_err());
    }
}
