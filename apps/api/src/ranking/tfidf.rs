//! TF-IDF vectorization and cosine similarity over a small, per-call corpus.
//!
//! Tokens are lowercased runs of two or more word characters with English stop-words
//! removed. Term frequency is the raw count, idf is smoothed
//! (`ln((1 + n) / (1 + df)) + 1`), and each document vector is L2-normalized.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_MAX_FEATURES: usize = 5000;

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
    "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
    "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
    "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
    "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
    "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
    "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
    "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Lowercased, stop-word-filtered tokens in text order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Fits on `documents` and returns one L2-normalized vector per document,
/// indexed by vocabulary position.
pub fn fit_transform(documents: &[&str], max_features: usize) -> Vec<Vec<f64>> {
    let counts: Vec<HashMap<String, usize>> = documents
        .iter()
        .map(|doc| {
            let mut tf = HashMap::new();
            for token in tokenize(doc) {
                *tf.entry(token).or_insert(0) += 1;
            }
            tf
        })
        .collect();

    // Corpus-wide frequency, ordered alphabetically so ties resolve deterministically.
    let mut corpus_freq: BTreeMap<&str, usize> = BTreeMap::new();
    for tf in &counts {
        for (term, n) in tf {
            *corpus_freq.entry(term.as_str()).or_insert(0) += n;
        }
    }

    let mut ranked: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1)); // stable: alphabetical within equal counts
    ranked.truncate(max_features);
    let mut vocabulary: Vec<&str> = ranked.into_iter().map(|(t, _)| t).collect();
    vocabulary.sort_unstable();

    let n_docs = documents.len() as f64;
    let idf: Vec<f64> = vocabulary
        .iter()
        .map(|term| {
            let df = counts.iter().filter(|tf| tf.contains_key(*term)).count() as f64;
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    counts
        .iter()
        .map(|tf| {
            let mut row: Vec<f64> = vocabulary
                .iter()
                .zip(&idf)
                .map(|(term, w)| tf.get(*term).copied().unwrap_or(0) as f64 * w)
                .collect();
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|v| *v /= norm);
            }
            row
        })
        .collect()
}

/// Cosine similarity; 0 when either vector is all zeros.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|v| v * v).sum::<f64>().sqrt();
    let nb = b.iter().map(|v| v * v).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na * nb)).clamp(0.0, 1.0)
}

/// TF-IDF cosine similarity of two texts, fitted on just this pair.
pub fn pair_similarity(a: &str, b: &str, max_features: usize) -> f64 {
    let vectors = fit_transform(&[a, b], max_features);
    cosine_similarity(&vectors[0], &vectors[1])
}
