//! Batch ranking pipeline.
//!
//! 1. Per resume, in submission order: extract text, resolve entities, extract skills and
//!    experience. Empty text, timeouts, and other failures become processing errors.
//! 2. Score every surviving resume against the job description.
//! 3. Stable-sort descending by score; ties keep submission order.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::{RankedEntry, ResumeRecord, TOP_SKILLS_LIMIT};
use crate::ranking::entities::{EntityExtractors, ResumeSource};
use crate::ranking::scorer::RelevanceScorer;
use crate::ranking::skills::{extract_experience_years, SkillDictionary};

/// Turns a stored resume into plain text. Failures are reported as an empty string.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, path: &Path) -> String;
}

/// PDF text extraction, run on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, path: &Path) -> String {
        let owned = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned)).await;
        match result {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("PDF extraction failed for {}: {e}", path.display());
                String::new()
            }
            Err(e) => {
                warn!("PDF extraction task failed for {}: {e}", path.display());
                String::new()
            }
        }
    }
}

/// A resume already saved to upload storage.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub filename: String,
    pub path: PathBuf,
}

/// One submitted file, in submission order. Uploads that could not be stored still
/// travel through the batch so their errors keep their place.
#[derive(Debug, Clone)]
pub enum ResumeUpload {
    Stored(UploadedResume),
    Rejected { filename: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Could not extract text from {filename}")]
    EmptyText { filename: String },

    #[error("Error processing {filename}: {reason}")]
    Failed { filename: String, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<RankedEntry>,
    pub processing_errors: Vec<String>,
}

pub struct RankingPipeline {
    text_extractor: Arc<dyn TextExtractor>,
    entities: EntityExtractors,
    skills: Arc<SkillDictionary>,
    scorer: RelevanceScorer,
    resume_timeout: Duration,
}

impl RankingPipeline {
    pub fn new(
        text_extractor: Arc<dyn TextExtractor>,
        entities: EntityExtractors,
        skills: Arc<SkillDictionary>,
        skills_weight: f64,
        resume_timeout: Duration,
    ) -> Self {
        let scorer = RelevanceScorer::new(skills.clone(), skills_weight);
        Self {
            text_extractor,
            entities,
            skills,
            scorer,
            resume_timeout,
        }
    }

    pub async fn run(
        &self,
        job_description: &str,
        resumes: &[ResumeUpload],
    ) -> Result<BatchOutcome, AppError> {
        if job_description.trim().is_empty() {
            return Err(AppError::Validation("Job description is required".to_string()));
        }
        if resumes.is_empty() {
            return Err(AppError::Validation(
                "At least one resume file is required".to_string(),
            ));
        }

        let job_description = job_description.to_lowercase();
        let mut records = Vec::with_capacity(resumes.len());
        let mut processing_errors = Vec::new();

        for upload in resumes {
            let resume = match upload {
                ResumeUpload::Stored(resume) => resume,
                ResumeUpload::Rejected { filename, reason } => {
                    let e = ResumeError::Failed {
                        filename: filename.clone(),
                        reason: reason.clone(),
                    };
                    warn!("{e}");
                    processing_errors.push(e.to_string());
                    continue;
                }
            };
            match self.process_with_timeout(resume).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("{e}");
                    processing_errors.push(e.to_string());
                }
            }
        }

        let mut results: Vec<RankedEntry> = records
            .iter()
            .map(|record| self.rank(&job_description, record))
            .collect();
        results.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));

        info!(
            "Ranked {} of {} resumes ({} errors)",
            results.len(),
            resumes.len(),
            processing_errors.len()
        );

        Ok(BatchOutcome {
            results,
            processing_errors,
        })
    }

    async fn process_with_timeout(
        &self,
        resume: &UploadedResume,
    ) -> Result<ResumeRecord, ResumeError> {
        match tokio::time::timeout(self.resume_timeout, self.process(resume)).await {
            Ok(result) => result,
            Err(_) => Err(ResumeError::Failed {
                filename: resume.filename.clone(),
                reason: format!("timed out after {}s", self.resume_timeout.as_secs()),
            }),
        }
    }

    async fn process(&self, resume: &UploadedResume) -> Result<ResumeRecord, ResumeError> {
        let raw_text = self.text_extractor.extract_text(&resume.path).await;
        if raw_text.trim().is_empty() {
            return Err(ResumeError::EmptyText {
                filename: resume.filename.clone(),
            });
        }

        let entities = self
            .entities
            .extract(ResumeSource {
                path: &resume.path,
                text: &raw_text,
            })
            .await;

        info!("Extracted {} from {}", entities.name, resume.filename);

        Ok(ResumeRecord {
            filename: resume.filename.clone(),
            name: entities.name,
            email: entities.email,
            phone: entities.phone,
            skills: self.skills.extract_skills(&raw_text),
            experience_years: extract_experience_years(&raw_text),
            raw_text,
        })
    }

    fn rank(&self, job_description: &str, record: &ResumeRecord) -> RankedEntry {
        let score = self
            .scorer
            .score(job_description, &record.raw_text.to_lowercase());

        RankedEntry {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            similarity_score: round_to(score.similarity_score, 2),
            matching_skills_count: score.matching_skills_count,
            total_job_skills_count: score.total_job_skills_count,
            skills_match_rate: round_to(
                match_rate(score.matching_skills_count, score.total_job_skills_count),
                1,
            ),
            experience_years: record.experience_years,
            top_skills: record.skills.iter().take(TOP_SKILLS_LIMIT).cloned().collect(),
            filename: record.filename.clone(),
        }
    }
}

/// Percentage of job skills matched; 0 when the job lists none.
pub fn match_rate(matching: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matching as f64 / total as f64 * 100.0
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}


#[cfg(test)]
mod tests {
    use super::test_support::MapTextExtractor;
    use super::*;
    use crate::ranking::entities::{NerExtractor, RegexExtractor, StructuredParserExtractor};

    fn extractors() -> EntityExtractors {
        EntityExtractors {
            structured: Arc::new(StructuredParserExtractor::default()),
            regex: Arc::new(RegexExtractor),
            ner: Arc::new(NerExtractor::default()),
        }
    }

    fn pipeline(texts: &[(&str, &str)], delay: Option<Duration>) -> RankingPipeline {
        let extractor = MapTextExtractor {
            texts: texts
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            delay,
        };
        RankingPipeline::new(
            Arc::new(extractor),
            extractors(),
            Arc::new(SkillDictionary::default()),
            0.3,
            Duration::from_secs(5),
        )
    }

    fn uploads(names: &[&str]) -> Vec<ResumeUpload> {
        names
            .iter()
            .map(|n| {
                ResumeUpload::Stored(UploadedResume {
                    filename: n.to_string(),
                    path: PathBuf::from("uploads").join(n),
                })
            })
            .collect()
    }

    const JD: &str = "Backend engineer: Python, PostgreSQL, Docker and Kubernetes on AWS.";

    #[tokio::test]
    async fn test_batch_with_empty_resume() {
        let p = pipeline(
            &[
                ("weak.pdf", "Bob Stone\nPainter and sculptor.\n2 years in art"),
                (
                    "strong.pdf",
                    "Jane Doe\njane@example.com\n(555) 123-4567\nBackend engineer, 6 years of experience with Python, PostgreSQL, Docker, Kubernetes and AWS.",
                ),
                ("empty.pdf", "   \n  "),
            ],
            None,
        );

        let outcome = p
            .run(JD, &uploads(&["weak.pdf", "strong.pdf", "empty.pdf"]))
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(
            outcome.processing_errors,
            vec!["Could not extract text from empty.pdf".to_string()]
        );
        assert!(outcome.results[0].similarity_score >= outcome.results[1].similarity_score);

        let top = &outcome.results[0];
        assert_eq!(top.filename, "strong.pdf");
        assert_eq!(top.name, "Jane Doe");
        assert_eq!(top.email, "jane@example.com");
        assert_eq!(top.phone, "555-123-4567");
        assert_eq!(top.experience_years, 6);
        assert_eq!(top.matching_skills_count, top.total_job_skills_count);
        assert_eq!(top.skills_match_rate, 100.0);
    }

    #[tokio::test]
    async fn test_rejected_uploads_keep_submission_order() {
        let p = pipeline(&[("b.pdf", ""), ("c.pdf", "Cara Diaz\nPython developer")], None);
        let mut batch = uploads(&["b.pdf"]);
        batch.insert(
            0,
            ResumeUpload::Rejected {
                filename: "a.pdf".to_string(),
                reason: "invalid file name".to_string(),
            },
        );
        batch.extend(uploads(&["c.pdf"]));

        let outcome = p.run(JD, &batch).await.unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(
            outcome.processing_errors,
            vec![
                "Error processing a.pdf: invalid file name".to_string(),
                "Could not extract text from b.pdf".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_ties_keep_submission_order() {
        let text = "Alex Kim\nPython developer";
        let p = pipeline(&[("a.pdf", text), ("b.pdf", text), ("c.pdf", text)], None);
        let outcome = p
            .run("python developer", &uploads(&["b.pdf", "a.pdf", "c.pdf"]))
            .await
            .unwrap();
        let order: Vec<&str> = outcome.results.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(order, vec!["b.pdf", "a.pdf", "c.pdf"]);
    }

    #[tokio::test]
    async fn test_empty_job_description_rejected() {
        let p = pipeline(&[("a.pdf", "text")], None);
        let err = p.run("  ", &uploads(&["a.pdf"])).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let p = pipeline(&[], None);
        let err = p.run(JD, &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_processing_error() {
        let p = RankingPipeline::new(
            Arc::new(MapTextExtractor {
                texts: [("slow.pdf".to_string(), "Jane Doe".to_string())].into(),
                delay: Some(Duration::from_secs(120)),
            }),
            extractors(),
            Arc::new(SkillDictionary::default()),
            0.3,
            Duration::from_secs(1),
        );
        let outcome = p.run(JD, &uploads(&["slow.pdf"])).await.unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(
            outcome.processing_errors,
            vec!["Error processing slow.pdf: timed out after 1s".to_string()]
        );
    }

    #[tokio::test]
    async fn test_top_skills_capped_at_ten() {
        let text = "Sam Lee\npython java javascript c++ c# php ruby go rust html css react";
        let p = pipeline(&[("many.pdf", text)], None);
        let outcome = p.run(JD, &uploads(&["many.pdf"])).await.unwrap();
        assert_eq!(outcome.results[0].top_skills.len(), TOP_SKILLS_LIMIT);
        assert_eq!(outcome.results[0].top_skills[0], "python");
    }

    #[test]
    fn test_match_rate_zero_total() {
        assert_eq!(match_rate(0, 0), 0.0);
        assert_eq!(match_rate(1, 4), 25.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(71.256, 2), 71.26);
        assert_eq!(round_to(66.66, 1), 66.7);
    }
}
