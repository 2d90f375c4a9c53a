//! Filesystem output writer
//!
//! Writes a final batch under the destination root, creating intermediate
//! directories. In dry-run mode nothing touches the disk; the writer only
//! reports what it would have written.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::{ApplicationError, OutputWriter};
use crate::domain::GeneratedFile;

/// Output writer backed by the local filesystem.
pub struct FileSystemWriter;

impl FileSystemWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputWriter for FileSystemWriter {
    async fn write(
        &self,
        root: &Path,
        files: &[GeneratedFile],
        dry_run: bool,
    ) -> Result<Vec<PathBuf>, ApplicationError> {
        let mut written = Vec::with_capacity(files.len());

        for file in files {
            let path = root.join(&file.path);

            if dry_run {
                tracing::info!(path = %path.display(), "dry-run: would write");
                written.push(file.path.clone());
                continue;
            }

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    ApplicationError::Output(format!(
                        "failed to create directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
            fs::write(&path, file.content.as_bytes())
                .await
                .map_err(|e| {
                    ApplicationError::Output(format!(
                        "failed to write file {}: {e}",
                        path.display()
                    ))
                })?;

            tracing::debug!(path = %path.display(), "file written");
            written.push(file.path.clone());
        }

        Ok(written)
    }
}
