use serde::{Deserialize, Serialize};

/// Sentinel for a name, email, or phone that no strategy could find.
/// Always this literal, never an empty string or a missing field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of skills carried into a ranked entry's `top_skills`.
pub const TOP_SKILLS_LIMIT: usize = 10;

/// Returns true when `value` holds a real extracted value rather than the sentinel.
pub fn is_available(value: &str) -> bool {
    value != NOT_AVAILABLE
}

/// Everything extracted from one uploaded resume. Built once per file and never
/// mutated after the extraction phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub filename: String,
    pub raw_text: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Dictionary scan order, not text order.
    pub skills: Vec<String>,
    pub experience_years: u32,
}

/// One row of the ranking output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// 0 – 100, rounded to 2 decimals
    pub similarity_score: f64,
    pub matching_skills_count: usize,
    pub total_job_skills_count: usize,
    /// 0 – 100, rounded to 1 decimal
    pub skills_match_rate: f64,
    pub experience_years: u32,
    pub top_skills: Vec<String>,
    pub filename: String,
}
