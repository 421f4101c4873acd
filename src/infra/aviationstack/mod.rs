mod client;

pub use client::AviationstackClient;
