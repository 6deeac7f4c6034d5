//! Guaranteed removal of per-request temporary files.

use std::path::PathBuf;
use tracing::debug;

/// Tracks every temporary path a request creates and removes them all
/// when dropped.
///
/// The guard is created at the top of a request, handed through the
/// pipeline so files are tracked the moment they exist, and finally
/// moved into the streaming response body. Whether it drops after a
/// full transfer, on a handler error, or when the client disconnects
/// mid-stream, the same removal runs exactly once per path. Removal
/// is best-effort: failures are logged and never surface to the caller.
#[derive(Debug, Default)]
pub struct CleanupGuard {
    paths: Vec<PathBuf>,
}

impl CleanupGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `path` for removal when the guard drops.
    pub fn track(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Number of paths currently tracked.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        for path in self.paths.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Failed to remove temporary file");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_guard_removes_tracked_files_on_drop() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.pdf");
        let b = temp.path().join("b.pdf");
        std::fs::write(&a, b"a").unwrap();
        std::fs::write(&b, b"b").unwrap();

        let mut guard = CleanupGuard::new();
        guard.track(a.clone());
        guard.track(b.clone());
        assert_eq!(guard.len(), 2);
        drop(guard);

        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn test_guard_ignores_missing_files() {
        let temp = TempDir::new().unwrap();
        let mut guard = CleanupGuard::new();
        guard.track(temp.path().join("never-created.pdf"));
        drop(guard);
    }

    #[test]
    fn test_untracked_files_survive() {
        let temp = TempDir::new().unwrap();
        let kept = temp.path().join("kept.pdf");
        std::fs::write(&kept, b"kept").unwrap();

        let guard = CleanupGuard::new();
        assert!(guard.is_empty());
        drop(guard);

        assert!(kept.exists());
    }
}
