//! Repository fetch collaborator
//!
//! Materializes an existing project tree at the destination by shelling out
//! to `git clone`. Runs to completion before the merge policy; the core only
//! consumes the resulting directory tree.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::application::{ApplicationError, RepositoryFetcher};

/// Fetcher shelling out to the system `git`.
pub struct GitFetcher;

impl GitFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryFetcher for GitFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), ApplicationError> {
        // A non-empty destination already carries a tree; cloning into it
        // would fail, and the merge policy will respect what is there
        if dest.exists() && dest.read_dir().map(|mut d| d.next().is_some()).unwrap_or(false) {
            tracing::info!(dest = %dest.display(), "destination not empty, skipping clone");
            return Ok(());
        }

        tracing::info!(url, dest = %dest.display(), "cloning repository");
        let output = Command::new("git")
            .arg("clone")
            .arg(url)
            .arg(dest)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ApplicationError::Fetch(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            return Err(ApplicationError::Fetch(format!(
                "git clone {url} exited with {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// Fetcher for pipelines without a pre-existing repository.
pub struct NoopFetcher;

#[async_trait]
impl RepositoryFetcher for NoopFetcher {
    async fn fetch(&self, _url: &str, _dest: &Path) -> Result<(), ApplicationError> {
        Ok(())
    }
}
