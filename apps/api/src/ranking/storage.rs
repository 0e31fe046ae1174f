//! Upload storage on the local filesystem.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Saves `bytes` under the sanitized `file_name`, overwriting any earlier upload
    /// with the same name. Returns the stored path.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
        let name = sanitize_file_name(file_name).ok_or_else(|| {
            AppError::Validation(format!("Invalid upload file name: {file_name:?}"))
        })?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Storage(format!("create {}: {e}", self.dir.display())))?;

        let path = self.dir.join(&name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("write {}: {e}", path.display())))?;

        debug!("Stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Resolves a previously uploaded file for viewing.
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf, AppError> {
        if file_name.contains("..") || file_name.starts_with('/') {
            return Err(AppError::Validation("Invalid filename".to_string()));
        }
        let path = self.dir.join(file_name);
        if !path.is_file() {
            return Err(AppError::NotFound("Resume not found".to_string()));
        }
        Ok(path)
    }
}

/// Returns `name`, or `stem_N.ext` with the first N >= 2 not already in `taken`.
/// Keeps same-named uploads within one batch from overwriting each other.
pub fn unique_file_name(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(name) {
        return name.to_string();
    }
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());

    (2..)
        .map(|n| match &ext {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        })
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

/// Reduces a client-supplied name to its final path component.
/// `None` when nothing usable remains.
pub fn sanitize_file_name(file_name: &str) -> Option<String> {
    let normalized = file_name.replace('\\', "/");
    let last = normalized.rsplit('/').next()?.trim();
    if last.is_empty() || last == "." || last == ".." {
        return None;
    }
    Some(last.to_string())
}
