//! Port interfaces for the application layer
//!
//! The core never writes files or touches the network itself; these ports
//! are the contracts its external collaborators implement.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::domain::GeneratedFile;

/// Writes a final batch under a destination root, or reports what would be
/// written when `dry_run` is set. Creates intermediate directories.
#[async_trait]
pub trait OutputWriter: Send + Sync {
    async fn write(
        &self,
        root: &Path,
        files: &[GeneratedFile],
        dry_run: bool,
    ) -> Result<Vec<PathBuf>, ApplicationError>;
}

/// Materializes an existing project tree at the destination before the merge
/// policy runs. The core consumes only its postcondition.
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), ApplicationError>;
}
