//! JSON file adapter for profile documents.
//!
//! A store points at either a single candidate file (array or
//! `{"candidates": [...]}`) or a directory of `*.json` documents, one per
//! person. Records that fail to decode or validate are logged and skipped.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::documents::{CandidateFile, ProfileDocument};
use crate::domain::matching::UserVector;
use crate::ports::{CandidatePool, CandidateSource, ProfileSourceError};

/// Filesystem-backed candidate source.
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    /// Create a store reading from a file or directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read a single profile document, typically the target.
    ///
    /// Unlike candidate loading, a malformed document here is an error.
    pub async fn read_profile(path: impl AsRef<Path>) -> Result<UserVector, ProfileSourceError> {
        let path = path.as_ref();
        let value = read_json(path).await?;
        decode_entry(value).map_err(|e| {
            ProfileSourceError::Parse(format!("{}: {}", path.display(), e))
        })
    }

    async fn load_file(&self) -> Result<CandidatePool, ProfileSourceError> {
        let value = read_json(&self.path).await?;
        let file: CandidateFile = serde_json::from_value(value).map_err(|e| {
            ProfileSourceError::Parse(format!(
                "{}: expected an array or an object with a candidates array ({})",
                self.path.display(),
                e
            ))
        })?;

        let mut pool = CandidatePool::default();
        for (index, entry) in file.into_entries().into_iter().enumerate() {
            match decode_entry(entry) {
                Ok(user) => pool.candidates.push(user),
                Err(error) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        index,
                        error = %error,
                        "Skipping malformed candidate record"
                    );
                    pool.skipped += 1;
                }
            }
        }
        Ok(pool)
    }

    async fn load_dir(&self) -> Result<CandidatePool, ProfileSourceError> {
        let mut entries = fs::read_dir(&self.path).await.map_err(|e| {
            ProfileSourceError::Io(format!("Failed to read directory: {}", e))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ProfileSourceError::Io(format!("Failed to read directory: {}", e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                files.push(path);
            }
        }
        // Directory iteration order is platform-dependent
        files.sort();

        let mut pool = CandidatePool::default();
        for path in files {
            let loaded = match read_json(&path).await {
                Ok(value) => decode_entry(value),
                Err(error) => Err(error.to_string()),
            };
            match loaded {
                Ok(user) => pool.candidates.push(user),
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %error,
                        "Skipping malformed candidate file"
                    );
                    pool.skipped += 1;
                }
            }
        }
        Ok(pool)
    }
}

#[async_trait]
impl CandidateSource for JsonProfileStore {
    async fn load_candidates(&self) -> Result<CandidatePool, ProfileSourceError> {
        let metadata = fs::metadata(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProfileSourceError::NotFound(self.path.display().to_string())
            } else {
                ProfileSourceError::Io(format!("Failed to stat {}: {}", self.path.display(), e))
            }
        })?;

        let pool = if metadata.is_dir() {
            self.load_dir().await?
        } else {
            self.load_file().await?
        };

        tracing::debug!(
            path = %self.path.display(),
            loaded = pool.candidates.len(),
            skipped = pool.skipped,
            "Loaded candidate pool"
        );
        Ok(pool)
    }
}

async fn read_json(path: &Path) -> Result<Value, ProfileSourceError> {
    let content = fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProfileSourceError::NotFound(path.display().to_string())
        } else {
            ProfileSourceError::Io(format!("Failed to read {}: {}", path.display(), e))
        }
    })?;

    serde_json::from_str(&content)
        .map_err(|e| ProfileSourceError::Parse(format!("{}: {}", path.display(), e)))
}

fn decode_entry(value: Value) -> Result<UserVector, String> {
    let document = ProfileDocument::from_value(value).map_err(|e| e.to_string())?;
    document.into_user_vector().map_err(|e| e.to_string())
}
