//! Collaborator contracts consumed by the aggregation engine.

pub mod flight_source;
pub mod geo_resolver;
