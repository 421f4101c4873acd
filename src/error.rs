//! Error types for the continent report.
//!
//! An unresolvable country code is deliberately absent here: it is folded
//! into the "Unknown" continent and never surfaces as an error.

use thiserror::Error;

use crate::services::flight_source::Direction;

/// Failures that abort a report run.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The flight provider could not deliver records for an airport.
    #[error("flight source unavailable for {airport} ({direction}): {message}")]
    SourceUnavailable {
        /// IATA code that was being fetched.
        airport: String,
        /// Which side of the schedule was requested.
        direction: Direction,
        /// Transport, status or payload failure.
        message: String,
    },

    /// The country lookup service could not be reached at all.
    #[error("geo resolver unavailable for '{code}': {message}")]
    ResolverUnavailable {
        /// Country code being resolved.
        code: String,
        /// Transport failure.
        message: String,
    },

    /// Every fetch came back empty.
    #[error("no data available for the configured airports")]
    EmptyResult,

    /// A required setting is not present in the environment.
    #[error("missing configuration: {0} must be set")]
    MissingConfig(&'static str),

    /// A setting is present but could not be used.
    #[error("invalid configuration for {key}: {message}")]
    InvalidConfig {
        /// Environment variable or flag name.
        key: &'static str,
        /// Why it was rejected.
        message: String,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    pub(crate) fn source_unavailable(
        airport: &str,
        direction: Direction,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::SourceUnavailable {
            airport: airport.to_string(),
            direction,
            message: message.to_string(),
        }
    }

    /// Whether this is the "nothing to report" condition rather than a failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_message() {
        let err = ReportError::source_unavailable("ADD", Direction::Arrival, "status 500");
        assert_eq!(
            err.to_string(),
            "flight source unavailable for ADD (arrival): status 500"
        );
        assert!(!err.is_empty_result());
    }

    #[test]
    fn test_empty_result_flag() {
        assert!(ReportError::EmptyResult.is_empty_result());
    }
}
