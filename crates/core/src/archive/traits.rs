//! Trait definitions for the archive module.

use async_trait::async_trait;

use super::error::ArchiveError;
use super::types::{ArchiveJob, ArchiveSummary};

/// Packages a list of files into a single compressed archive.
///
/// Implementations must fail atomically: when any part of the job
/// cannot be completed, no destination file is left on disk.
#[async_trait]
pub trait Archiver: Send + Sync {
    /// Returns the name of this archiver implementation.
    fn name(&self) -> &str;

    /// Writes the archive described by `job`.
    async fn archive(&self, job: ArchiveJob) -> Result<ArchiveSummary, ArchiveError>;

    /// Validates that the archiver is properly configured and ready.
    async fn validate(&self) -> Result<(), ArchiveError>;
}

/// Pre-flight checks shared by all backends.
pub(super) async fn check_job(job: &ArchiveJob) -> Result<(), ArchiveError> {
    if job.entries.is_empty() {
        return Err(ArchiveError::NoEntries);
    }
    for entry in &job.entries {
        if tokio::fs::metadata(&entry.source).await.is_err() {
            return Err(ArchiveError::SourceMissing {
                path: entry.source.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    use crate::archive::ArchiveEntry;

    #[tokio::test]
    async fn test_check_job_rejects_empty() {
        let job = ArchiveJob {
            entries: vec![],
            destination: PathBuf::from("/tmp/out.zip"),
        };
        assert!(matches!(check_job(&job).await, Err(ArchiveError::NoEntries)));
    }

    #[tokio::test]
    async fn test_check_job_rejects_missing_source() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("present.pdf");
        tokio::fs::write(&present, b"x").await.unwrap();

        let job = ArchiveJob {
            entries: vec![
                ArchiveEntry {
                    source: present,
                    name: "present.pdf".to_string(),
                },
                ArchiveEntry {
                    source: temp.path().join("gone.pdf"),
                    name: "gone.pdf".to_string(),
                },
            ],
            destination: temp.path().join("out.zip"),
        };
        assert!(matches!(
            check_job(&job).await,
            Err(ArchiveError::SourceMissing { .. })
        ));
    }
}
