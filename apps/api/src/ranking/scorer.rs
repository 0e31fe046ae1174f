//! Relevance scoring — blends TF-IDF text similarity with job-skills coverage.
//!
//! final = ((1 - w) * similarity + w * skills_coverage) * 100

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ranking::skills::SkillDictionary;
use crate::ranking::tfidf::{pair_similarity, DEFAULT_MAX_FEATURES};

pub const DEFAULT_SKILLS_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0 – 100
    pub similarity_score: f64,
    pub matching_skills_count: usize,
    pub total_job_skills_count: usize,
}

#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    skills: Arc<SkillDictionary>,
    skills_weight: f64,
    max_features: usize,
}

impl RelevanceScorer {
    pub fn new(skills: Arc<SkillDictionary>, skills_weight: f64) -> Self {
        Self {
            skills,
            skills_weight: skills_weight.clamp(0.0, 1.0),
            max_features: DEFAULT_MAX_FEATURES,
        }
    }

    /// Scores one resume against the job description. Each call fits its own vectorizer.
    pub fn score(&self, job_description: &str, resume_text: &str) -> ScoreResult {
        let basic_similarity = pair_similarity(job_description, resume_text, self.max_features);

        let job_skills: HashSet<String> =
            self.skills.extract_skills(job_description).into_iter().collect();
        let resume_skills: HashSet<String> =
            self.skills.extract_skills(resume_text).into_iter().collect();

        let matching = job_skills.intersection(&resume_skills).count();
        let total = job_skills.len();
        let skills_score = if total > 0 {
            matching as f64 / total as f64
        } else {
            0.0
        };

        let w = self.skills_weight;
        ScoreResult {
            similarity_score: ((1.0 - w) * basic_similarity + w * skills_score) * 100.0,
            matching_skills_count: matching,
            total_job_skills_count: total,
        }
    }
}
