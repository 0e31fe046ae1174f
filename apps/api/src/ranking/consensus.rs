//! Consensus over the three extraction strategies.
//!
//! Arguments are always in strategy order: structured parser, regex, NER.
//!
//! - Name: majority vote among non-"N/A" guesses, else priority parser > NER > regex.
//! - Email: first guess (parser, regex, NER) that passes syntax validation. No vote.
//! - Phone: the regex guess, verbatim.

use validator::ValidateEmail;

use crate::models::resume::{is_available, NOT_AVAILABLE};

pub fn resolve_name(parser: &str, regex: &str, ner: &str) -> String {
    let valid: Vec<&str> = [parser, regex, ner]
        .into_iter()
        .filter(|c| is_available(c))
        .collect();

    if valid.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    if let Some(agreed) = valid
        .iter()
        .find(|c| valid.iter().filter(|other| other == c).count() > 1)
    {
        return agreed.to_string();
    }

    [parser, ner, regex]
        .into_iter()
        .find(|c| is_available(c))
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

pub fn resolve_email(parser: &str, regex: &str, ner: &str) -> String {
    [parser, regex, ner]
        .into_iter()
        .filter(|c| is_available(c))
        .find(|c| is_valid_email(c))
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Regex is authoritative for phone numbers.
pub fn resolve_phone(regex: &str) -> String {
    regex.to_string()
}

fn is_valid_email(candidate: &str) -> bool {
    candidate.to_string().validate_email()
}
