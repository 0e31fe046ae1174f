//! Structured-parser strategy: delegates to the external resume-parsing service.

use async_trait::async_trait;
use tracing::warn;

use super::{EntityCandidate, EntityExtractor, ExtractionStrategy, ResumeSource};
use crate::nlp_client::ResumeParserClient;

/// Without a configured parser every call yields "N/A".
#[derive(Clone, Default)]
pub struct StructuredParserExtractor {
    client: Option<ResumeParserClient>,
}

impl StructuredParserExtractor {
    pub fn new(client: Option<ResumeParserClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntityExtractor for StructuredParserExtractor {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::StructuredParser
    }

    async fn extract(&self, source: ResumeSource<'_>) -> EntityCandidate {
        let Some(client) = &self.client else {
            return EntityCandidate::not_available();
        };

        match client.parse_file(source.path).await {
            Ok(parsed) => {
                EntityCandidate::name_and_email(parsed.name.as_deref(), parsed.email.as_deref())
            }
            Err(e) => {
                warn!("Resume parser failed for {}: {e}", source.path.display());
                EntityCandidate::not_available()
            }
        }
    }
}
