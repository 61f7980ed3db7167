//! Ephemeral storage for rendered report images (`url` response mode).
//!
//! Images live in one flat directory under per-request unique names. Writes
//! go through a temporary file in the same directory and are persisted
//! atomically, so a reader can never observe a partially written image. A
//! periodic sweeper deletes entries older than the configured TTL.

use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::error::AppError;
use crate::utils::filename::report_filename;

/// Flat-directory store for generated report images.
pub struct ScreenshotStore {
    dir: PathBuf,
    ttl: Duration,
}

impl ScreenshotStore {
    /// Opens the store, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn open(dir: PathBuf, ttl: Duration) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir, ttl })
    }

    /// Persists `bytes` under a fresh unique name and returns that name.
    ///
    /// The write is atomic: the image is spooled to a temp file in the
    /// target directory and renamed into place only after a complete write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RenderFailed`] when the image cannot be written.
    pub async fn store(&self, domain: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let filename = report_filename(domain);
        let dir = self.dir.clone();
        let final_path = dir.join(&filename);

        let result = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            use std::io::Write;

            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.flush()?;
            tmp.persist(&final_path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::internal("Screenshot write task failed", json!({ "cause": e.to_string() })))?;

        result.map_err(|e| AppError::RenderFailed {
            message: "Failed to store the report image".to_string(),
            details: json!({ "cause": e.to_string() }),
        })?;

        tracing::debug!(%filename, "stored report image");
        Ok(filename)
    }

    /// Reads a stored image back.
    ///
    /// The caller is responsible for validating the filename first; this
    /// method only joins it onto the store directory.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no such image exists and
    /// [`AppError::Internal`] on other I/O failures.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        let path = self.dir.join(filename);

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::not_found(
                "Screenshot not found",
                json!({ "filename": filename }),
            )),
            Err(e) => Err(AppError::internal(
                "Failed to read screenshot",
                json!({ "cause": e.to_string() }),
            )),
        }
    }

    /// Deletes stored images older than the TTL. Returns how many were
    /// removed. Unreadable entries are skipped, not fatal.
    pub async fn sweep(&self) -> std::io::Result<usize> {
        let now = SystemTime::now();
        let mut removed = 0;

        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let Ok(modified) = metadata.modified() else {
                continue;
            };

            let expired = now
                .duration_since(modified)
                .map(|age| age > self.ttl)
                .unwrap_or(false);

            if expired && tokio::fs::remove_file(entry.path()).await.is_ok() {
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Spawns the background sweeper, running [`Self::sweep`] at `every`.
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // The first tick fires immediately; skip it.
            interval.tick().await;

            loop {
                interval.tick().await;
                match self.sweep().await {
                    Ok(0) => {}
                    Ok(removed) => tracing::info!(removed, "swept expired screenshots"),
                    Err(e) => tracing::warn!("screenshot sweep failed: {e}"),
                }
            }
        });
    }
}
