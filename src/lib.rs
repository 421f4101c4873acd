pub mod aggregation;
pub mod config;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod output;
pub mod report;
pub mod services;
pub mod window;
