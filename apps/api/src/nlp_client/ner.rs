//! Named-entity recognition service client.
//!
//! Contract: `POST {base}/analyze` with `{"text": ...}` returns the entity spans and the
//! word-level tokens of the text. `GET {base}/health` is probed once at startup; a failed
//! probe leaves the ranker without NER for the life of the process.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::join_url;

/// Entity label the NER model assigns to people.
pub const PERSON_LABEL: &str = "PERSON";

#[derive(Debug, Error)]
pub enum NerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NER service error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NerEntity {
    pub text: String,
    pub label: String,
}

/// Entities in document order plus the word-level token stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NerAnalysis {
    #[serde(default)]
    pub entities: Vec<NerEntity>,
    #[serde(default)]
    pub tokens: Vec<String>,
}

impl NerAnalysis {
    /// Text of the first entity tagged PERSON.
    pub fn first_person(&self) -> Option<&str> {
        self.entities
            .iter()
            .find(|e| e.label == PERSON_LABEL)
            .map(|e| e.text.as_str())
    }

    /// First token that looks like an email: contains both '@' and '.'.
    pub fn first_email_token(&self) -> Option<&str> {
        self.tokens
            .iter()
            .map(|t| t.as_str())
            .find(|t| t.contains('@') && t.contains('.'))
    }
}

#[derive(Clone)]
pub struct NerClient {
    client: Client,
    base_url: String,
}

impl NerClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Probes the health endpoint and returns a client only if the service answered.
    /// Never fails: an unreachable service is logged and reported as `None`.
    pub async fn connect(client: Client, base_url: &str) -> Option<Self> {
        let ner = Self::new(client, base_url);
        match ner.health().await {
            Ok(()) => {
                info!("NER service available at {base_url}");
                Some(ner)
            }
            Err(e) => {
                warn!("NER service unavailable at {base_url}, NER extraction disabled: {e}");
                None
            }
        }
    }

    async fn health(&self) -> Result<(), NerError> {
        let response = self
            .client
            .get(join_url(&self.base_url, "health"))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NerError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    pub async fn analyze(&self, text: &str) -> Result<NerAnalysis, NerError> {
        let response = self
            .client
            .post(join_url(&self.base_url, "analyze"))
            .json(&AnalyzeRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let analysis: NerAnalysis = response.json().await?;
        debug!(
            "NER analysis: {} entities, {} tokens",
            analysis.entities.len(),
            analysis.tokens.len()
        );
        Ok(analysis)
    }
}
