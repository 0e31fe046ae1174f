/// NLP service clients — the only place the ranker talks to external extraction services.
///
/// Both services are optional. A client that cannot be built or reached is simply absent,
/// and the matching extraction strategy degrades to the "N/A" sentinel.
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

pub mod ner;
pub mod resume_parser;

pub use ner::{NerAnalysis, NerClient};
pub use resume_parser::ResumeParserClient;

/// Builds the shared HTTP client used by every service client.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Joins a base URL and a path without doubling or dropping the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
