//! Structured resume-parsing service client.
//!
//! Contract: `POST {url}` with the resume as multipart field `file`; the JSON response may
//! carry `name` and `email` strings. Anything else in the payload is ignored.

use std::path::Path;

use reqwest::{multipart, Client};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("could not read resume file: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parser service error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Fields the parser may return. Missing, null, and blank values all come back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParsedResume {
    #[serde(default, deserialize_with = "non_blank")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub email: Option<String>,
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    // Parsers sometimes return lists or numbers here; only plain strings count.
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string))
}

#[derive(Clone)]
pub struct ResumeParserClient {
    client: Client,
    url: String,
}

impl ResumeParserClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn parse_file(&self, path: &Path) -> Result<ParsedResume, ParserError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);

        let response = self.client.post(&self.url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ParserError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ParsedResume = response.json().await?;
        debug!("Resume parser returned {:?} for {}", parsed, path.display());
        Ok(parsed)
    }
}
