//! Entity extraction — three independent strategies that each guess a candidate's
//! name, email, and phone from one resume.
//!
//! Strategies never fail: every error inside a strategy is logged and surfaces as the
//! "N/A" sentinel, so one broken strategy cannot abort the others. The guesses are then
//! reconciled by `ranking::consensus`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::resume::NOT_AVAILABLE;
use crate::ranking::consensus::{resolve_email, resolve_name, resolve_phone};

pub mod ner;
pub mod pattern;
pub mod structured;

pub use self::ner::NerExtractor;
pub use self::pattern::RegexExtractor;
pub use self::structured::StructuredParserExtractor;

/// Which strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    StructuredParser,
    Regex,
    Ner,
}

/// One strategy's guess. Every field is either a real value or "N/A".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCandidate {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl EntityCandidate {
    pub fn not_available() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
            phone: NOT_AVAILABLE.to_string(),
        }
    }

    /// Name and email only; strategies that never see phone numbers use this.
    pub fn name_and_email(name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            name: name.unwrap_or(NOT_AVAILABLE).to_string(),
            email: email.unwrap_or(NOT_AVAILABLE).to_string(),
            phone: NOT_AVAILABLE.to_string(),
        }
    }
}

/// The resume as the strategies see it: the stored upload plus its extracted text.
#[derive(Debug, Clone, Copy)]
pub struct ResumeSource<'a> {
    pub path: &'a Path,
    pub text: &'a str,
}

/// The capability every strategy implements.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    fn strategy(&self) -> ExtractionStrategy;

    async fn extract(&self, source: ResumeSource<'_>) -> EntityCandidate;
}

/// Final name, email, and phone after consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntities {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// The three strategies wired together. Injected so tests can swap in doubles.
#[derive(Clone)]
pub struct EntityExtractors {
    pub structured: Arc<dyn EntityExtractor>,
    pub regex: Arc<dyn EntityExtractor>,
    pub ner: Arc<dyn EntityExtractor>,
}

impl EntityExtractors {
    /// Runs the three strategies concurrently and reconciles their guesses.
    pub async fn extract(&self, source: ResumeSource<'_>) -> ResolvedEntities {
        let (structured, regex, ner) = tokio::join!(
            self.structured.extract(source),
            self.regex.extract(source),
            self.ner.extract(source),
        );

        debug!(
            "Entity candidates for {}: {:?}={:?} {:?}={:?} {:?}={:?}",
            source.path.display(),
            self.structured.strategy(),
            structured,
            self.regex.strategy(),
            regex,
            self.ner.strategy(),
            ner
        );

        ResolvedEntities {
            name: resolve_name(&structured.name, &regex.name, &ner.name),
            email: resolve_email(&structured.email, &regex.email, &ner.email),
            phone: resolve_phone(&regex.phone),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FixedExtractor;
    use super::*;

    fn source() -> ResumeSource<'static> {
        ResumeSource {
            path: Path::new("uploads/jane.pdf"),
            text: "Jane Doe",
        }
    }

    #[tokio::test]
    async fn test_majority_name_and_priority_email() {
        let extractors = EntityExtractors {
            structured: FixedExtractor::arc(
                ExtractionStrategy::StructuredParser,
                "Jane Doe",
                "bad@@x",
                NOT_AVAILABLE,
            ),
            regex: FixedExtractor::arc(
                ExtractionStrategy::Regex,
                "Jane Doe",
                "good@example.com",
                "555-123-4567",
            ),
            ner: FixedExtractor::arc(ExtractionStrategy::Ner, "Doe", NOT_AVAILABLE, NOT_AVAILABLE),
        };

        let resolved = extractors.extract(source()).await;
        assert_eq!(resolved.name, "Jane Doe");
        assert_eq!(resolved.email, "good@example.com");
        assert_eq!(resolved.phone, "555-123-4567");
    }

    #[tokio::test]
    async fn test_all_strategies_empty() {
        let na = || {
            Arc::new(FixedExtractor {
                strategy: ExtractionStrategy::Ner,
                candidate: EntityCandidate::not_available(),
            }) as Arc<dyn EntityExtractor>
        };
        let extractors = EntityExtractors {
            structured: na(),
            regex: na(),
            ner: na(),
        };

        let resolved = extractors.extract(source()).await;
        assert_eq!(resolved.name, NOT_AVAILABLE);
        assert_eq!(resolved.email, NOT_AVAILABLE);
        assert_eq!(resolved.phone, NOT_AVAILABLE);
    }

    #[test]
    fn test_name_and_email_fills_sentinels() {
        let c = EntityCandidate::name_and_email(Some("Jane Doe"), None);
        assert_eq!(c.name, "Jane Doe");
        assert_eq!(c.email, NOT_AVAILABLE);
        assert_eq!(c.phone, NOT_AVAILABLE);
    }
}
