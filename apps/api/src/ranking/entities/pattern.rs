//! Regex strategy: email and phone patterns plus a layout heuristic for the name.
//! Authoritative for phone numbers.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{EntityCandidate, EntityExtractor, ExtractionStrategy, ResumeSource};
use crate::models::resume::NOT_AVAILABLE;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").expect("valid regex")
});

/// Optional +1 country code, then 3-3-4 digit groups with flexible separators.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})")
        .expect("valid regex")
});

/// Only the top of the resume is searched for a name.
const NAME_SEARCH_LINES: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

#[async_trait]
impl EntityExtractor for RegexExtractor {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::Regex
    }

    async fn extract(&self, source: ResumeSource<'_>) -> EntityCandidate {
        EntityCandidate {
            name: extract_name(source.text),
            email: extract_email(source.text),
            phone: extract_phone(source.text),
        }
    }
}

pub fn extract_email(text: &str) -> String {
    EMAIL_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// First phone number, normalized to `AAA-EEE-LLLL`.
pub fn extract_phone(text: &str) -> String {
    PHONE_PATTERN
        .captures(text)
        .map(|caps| format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// First of the leading non-empty lines that reads like a person's name:
/// no digits, 2-4 alphabetic words, each capitalized.
pub fn extract_name(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SEARCH_LINES)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn looks_like_name(line: &str) -> bool {
    if line.chars().any(char::is_numeric) {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words.iter().all(|w| w.chars().all(char::is_alphabetic))
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(char::is_uppercase))
}
