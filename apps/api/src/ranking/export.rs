//! CSV export of a ranking. Each batch fully replaces the previous file.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::models::resume::RankedEntry;

pub const EXPORT_DOWNLOAD_NAME: &str = "ranked_resumes.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not replace export file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Phone")]
    phone: &'a str,
    #[serde(rename = "Similarity_Score")]
    similarity_score: f64,
    #[serde(rename = "Filename")]
    filename: &'a str,
}

/// Writes `entries` in ranked order (rank starts at 1) to a temp file beside `path`,
/// then atomically moves it into place.
pub fn write_ranking_csv(path: &Path, entries: &[RankedEntry]) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::Writer::from_writer(tmp.as_file());
        if entries.is_empty() {
            writer.write_record([
                "Rank",
                "Name",
                "Email",
                "Phone",
                "Similarity_Score",
                "Filename",
            ])?;
        }
        for (i, entry) in entries.iter().enumerate() {
            writer.serialize(ExportRow {
                rank: i + 1,
                name: &entry.name,
                email: &entry.email,
                phone: &entry.phone,
                similarity_score: entry.similarity_score,
                filename: &entry.filename,
            })?;
        }
        writer.flush()?;
    }
    tmp.persist(path)?;

    info!("Wrote {} ranked rows to {}", entries.len(), path.display());
    Ok(())
}
