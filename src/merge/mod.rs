//! Merge/preservation policy
//!
//! Partitions a candidate batch against the target directory: candidates
//! whose path already exists on disk are dropped whole, everything else
//! passes through unchanged. Existing content always wins - no content-level
//! merge, no diffing, no deletion. Existence checks are total, so the policy
//! itself cannot fail.

use std::path::{Path, PathBuf};

use crate::domain::GeneratedFile;

/// Result of partitioning a candidate batch.
#[derive(Debug)]
pub struct MergePlan {
    /// Candidates safe to hand to the file writer, in input order
    pub writes: Vec<GeneratedFile>,
    /// Paths skipped because a file already exists at the destination
    pub preserved: Vec<PathBuf>,
}

impl MergePlan {
    pub fn preserved_count(&self) -> usize {
        self.preserved.len()
    }
}

/// The coarse existing-files-win policy.
pub struct PreservationPolicy;

impl PreservationPolicy {
    /// Partition candidates by existence at `target/candidate.path`.
    pub fn partition(target: &Path, candidates: Vec<GeneratedFile>) -> MergePlan {
        let mut writes = Vec::with_capacity(candidates.len());
        let mut preserved = Vec::new();

        for candidate in candidates {
            if target.join(&candidate.path).exists() {
                tracing::debug!(path = %candidate.path.display(), "existing file preserved");
                preserved.push(candidate.path);
            } else {
                writes.push(candidate);
            }
        }

        MergePlan { writes, preserved }
    }
}
