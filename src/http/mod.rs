//! HTTP client used for metadata probes.

mod client;

pub use client::HttpClient;
