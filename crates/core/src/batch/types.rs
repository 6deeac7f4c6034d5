//! Types for the batch module.

use std::path::PathBuf;
use uuid::Uuid;

/// One file received from the upload layer.
///
/// The temporary path is owned by the request: it is tracked for
/// deletion the moment the upload is persisted and removed when the
/// request's cleanup guard drops.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Unique temporary path assigned by the upload layer.
    pub path: PathBuf,
    /// Original client-supplied filename, if any.
    pub original_name: Option<String>,
}

impl UploadedFile {
    pub fn new(path: PathBuf, original_name: Option<String>) -> Self {
        Self {
            path,
            original_name,
        }
    }

    /// The name used for ordering; absent names sort last.
    pub fn sort_name(&self) -> &str {
        self.original_name.as_deref().unwrap_or("")
    }
}

/// One merged output, ready to be packaged.
#[derive(Debug, Clone)]
pub struct MergedArtifact {
    /// Temporary path of the merged PDF on disk.
    pub path: PathBuf,
    /// Collision-free name this artifact gets inside the archive.
    pub archive_name: String,
}

/// Source of per-request run identifiers.
///
/// Run ids namespace every temporary filename so concurrent requests
/// never collide on disk. Production uses random uuids; tests inject a
/// deterministic counter.
pub trait RunIdProvider: Send + Sync {
    fn next_run_id(&self) -> String;
}

/// Default provider producing random v4 uuids.
#[derive(Debug, Default)]
pub struct UuidRunIdProvider;

impl RunIdProvider for UuidRunIdProvider {
    fn next_run_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
