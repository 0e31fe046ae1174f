// Resume ranking: entity extraction + consensus, skills, TF-IDF scoring, batch pipeline.
// External NLP services are reached only through nlp_client.

pub mod consensus;
pub mod entities;
pub mod export;
pub mod handlers;
pub mod pipeline;
pub mod scorer;
pub mod skills;
pub mod storage;
pub mod tfidf;
