use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Resumes are capped at 5 MiB.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Directory-backed artifact store for uploaded resumes.
///
/// Each stored file gets a generated uuid name; the returned path is what the
/// application row records. Only PDF content is accepted.
#[derive(Clone, Debug)]
pub struct ResumeStore {
    base_dir: PathBuf,
}

impl ResumeStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }

    fn check_upload(filename: &str, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Err(Error::BadRequest("Resume file is empty".to_string()));
        }
        if data.len() > MAX_RESUME_BYTES {
            return Err(Error::BadRequest(
                "Resume file exceeds the 5 MiB limit".to_string(),
            ));
        }
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if ext != "pdf" {
            return Err(Error::BadRequest(
                "Only PDF resumes are accepted".to_string(),
            ));
        }
        if !data.starts_with(b"%PDF") {
            return Err(Error::BadRequest("Invalid PDF file content".to_string()));
        }
        Ok(())
    }

    /// Validate and persist an upload, returning the stored path.
    pub async fn store(&self, filename: &str, data: &Bytes) -> Result<String> {
        Self::check_upload(filename, data)?;
        self.ensure_dir().await?;

        let stored = self.base_dir.join(format!("{}.pdf", Uuid::new_v4()));
        fs::write(&stored, data).await.map_err(|e| {
            tracing::error!(error = %e, "failed to write resume file");
            Error::Internal(format!("Failed to save resume: {}", e))
        })?;

        Ok(stored.to_string_lossy().into_owned())
    }

    pub async fn exists(&self, path: &str) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    /// Remove a stored artifact. A file that is already gone is not an
    /// error: deletion is the cleanup half of the store-then-record
    /// contract and must be safe to repeat.
    pub async fn delete(&self, path: &str) -> Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Open a stored artifact for streaming. Missing files surface as
    /// `NotFound` so a dangling record never turns into a 500.
    pub async fn open(&self, path: &str) -> Result<fs::File> {
        match fs::File::open(path).await {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound("Resume file not found".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
