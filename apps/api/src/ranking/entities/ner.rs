//! NER strategy: first PERSON entity as the name, first email-looking token as the email.

use async_trait::async_trait;
use tracing::warn;

use super::{EntityCandidate, EntityExtractor, ExtractionStrategy, ResumeSource};
use crate::nlp_client::{NerAnalysis, NerClient};

/// `None` when the NER service was not configured or failed its startup probe.
#[derive(Clone, Default)]
pub struct NerExtractor {
    client: Option<NerClient>,
}

impl NerExtractor {
    pub fn new(client: Option<NerClient>) -> Self {
        Self { client }
    }
}

fn candidate_from(analysis: &NerAnalysis) -> EntityCandidate {
    EntityCandidate::name_and_email(analysis.first_person(), analysis.first_email_token())
}

#[async_trait]
impl EntityExtractor for NerExtractor {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::Ner
    }

    async fn extract(&self, source: ResumeSource<'_>) -> EntityCandidate {
        let Some(client) = &self.client else {
            return EntityCandidate::not_available();
        };

        match client.analyze(source.text).await {
            Ok(analysis) => candidate_from(&analysis),
            Err(e) => {
                warn!("NER analysis failed for {}: {e}", source.path.display());
                EntityCandidate::not_available()
            }
        }
    }
}
