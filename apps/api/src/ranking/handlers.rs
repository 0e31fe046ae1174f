use std::collections::HashSet;

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::RankedEntry;
use crate::ranking::export::{write_ranking_csv, EXPORT_DOWNLOAD_NAME};
use crate::ranking::pipeline::{ResumeUpload, UploadedResume};
use crate::ranking::storage::{sanitize_file_name, unique_file_name};
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUME_FILES_FIELD: &str = "resume_files";

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub batch_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub job_description_chars: usize,
    pub results: Vec<RankedEntry>,
    pub processing_errors: Vec<String>,
    pub export_path: String,
}

/// POST /api/v1/rankings
pub async fn handle_create_ranking(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RankingResponse>, AppError> {
    let batch_id = Uuid::new_v4();
    let mut job_description = String::new();
    let mut uploads = Vec::new();
    let mut stored_names = HashSet::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            JOB_DESCRIPTION_FIELD => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Multipart(e.to_string()))?;
            }
            RESUME_FILES_FIELD => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Multipart(e.to_string()))?;

                // browsers send an empty part when no file was chosen
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                let Some(sanitized) = sanitize_file_name(&file_name) else {
                    warn!("Skipping upload with unusable name {file_name:?}");
                    uploads.push(ResumeUpload::Rejected {
                        filename: file_name,
                        reason: "invalid file name".to_string(),
                    });
                    continue;
                };

                let filename = unique_file_name(&sanitized, &stored_names);
                match state.uploads.save(&filename, &data).await {
                    Ok(path) => {
                        stored_names.insert(filename.clone());
                        uploads.push(ResumeUpload::Stored(UploadedResume { filename, path }));
                    }
                    Err(e) => {
                        warn!("Could not store upload {filename}: {e}");
                        uploads.push(ResumeUpload::Rejected {
                            filename,
                            reason: "could not store upload".to_string(),
                        });
                    }
                }
            }
            _ => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Multipart(e.to_string()))?;
            }
        }
    }

    info!(
        "Batch {batch_id}: {} resumes, job description {} chars",
        uploads.len(),
        job_description.len()
    );

    let outcome = state.pipeline.run(&job_description, &uploads).await?;
    let processing_errors = outcome.processing_errors;

    let export_path = state.config.export_path.clone();
    let results = outcome.results;
    let results = tokio::task::spawn_blocking(move || {
        write_ranking_csv(&export_path, &results).map(|_| results)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("export task failed: {e}")))?
    .map_err(|e| AppError::Export(e.to_string()))?;

    if !processing_errors.is_empty() {
        warn!("Batch {batch_id} processing errors: {processing_errors:?}");
    }

    Ok(Json(RankingResponse {
        batch_id,
        generated_at: Utc::now(),
        job_description_chars: job_description.chars().count(),
        results,
        processing_errors,
        export_path: state.config.export_path.display().to_string(),
    }))
}

/// GET /api/v1/rankings/export
pub async fn handle_download_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = &state.config.export_path;
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("No ranking export has been written yet".to_string()))
        }
        Err(e) => return Err(AppError::Storage(format!("read {}: {e}", path.display()))),
    };

    let disposition = format!("attachment; filename=\"{EXPORT_DOWNLOAD_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?,
            ),
        ],
        Body::from(bytes),
    )
        .into_response())
}

/// GET /api/v1/resumes/:filename
pub async fn handle_view_resume(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let path = state.uploads.resolve(&filename)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Storage(format!("read {}: {e}", path.display())))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, HeaderValue::from_static("inline")),
        ],
        Body::from(bytes),
    )
        .into_response())
}
