//! Types for the archive module.

use std::path::PathBuf;

/// One file to be placed into the archive under a chosen entry name.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Path of the file on disk.
    pub source: PathBuf,
    /// Name of the entry inside the archive.
    pub name: String,
}

/// A packaging job, consumed once by an [`Archiver`](super::Archiver).
///
/// Entry order is preserved in the written archive. Every source must
/// exist at archive time or the whole job fails.
#[derive(Debug, Clone)]
pub struct ArchiveJob {
    pub entries: Vec<ArchiveEntry>,
    pub destination: PathBuf,
}

/// Result of a completed packaging job.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub destination: PathBuf,
    pub entries: usize,
    pub size_bytes: u64,
    pub duration_ms: u64,
}
