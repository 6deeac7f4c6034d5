//! In-process archiver backed by the zip crate.

use async_trait::async_trait;
use std::io::{Read, Write};
use std::time::Instant;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::error::ArchiveError;
use super::traits::{check_job, Archiver};
use super::types::{ArchiveJob, ArchiveSummary};
use crate::metrics;

/// Archiver that writes DEFLATE-compressed zip files in-process.
///
/// Compression runs on the blocking thread pool so large batches do
/// not stall the async workers.
#[derive(Debug, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Archiver for ZipArchiver {
    fn name(&self) -> &str {
        "library"
    }

    async fn archive(&self, job: ArchiveJob) -> Result<ArchiveSummary, ArchiveError> {
        let start = Instant::now();
        check_job(&job).await?;

        let destination = job.destination.clone();
        let entries = job.entries.len();

        let result = tokio::task::spawn_blocking(move || write_zip(&job)).await;

        let written = match result {
            Ok(Ok(size)) => size,
            Ok(Err(e)) => {
                let _ = tokio::fs::remove_file(&destination).await;
                metrics::ARCHIVES_TOTAL
                    .with_label_values(&["library", "failed"])
                    .inc();
                return Err(e);
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&destination).await;
                metrics::ARCHIVES_TOTAL
                    .with_label_values(&["library", "failed"])
                    .inc();
                return Err(ArchiveError::write_failed(destination, e.to_string()));
            }
        };

        let elapsed = start.elapsed();
        metrics::ARCHIVES_TOTAL
            .with_label_values(&["library", "success"])
            .inc();
        metrics::ARCHIVE_DURATION
            .with_label_values(&["library"])
            .observe(elapsed.as_secs_f64());

        Ok(ArchiveSummary {
            destination,
            entries,
            size_bytes: written,
            duration_ms: elapsed.as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), ArchiveError> {
        Ok(())
    }
}

fn write_zip(job: &ArchiveJob) -> Result<u64, ArchiveError> {
    let file = std::fs::File::create(&job.destination)
        .map_err(|e| ArchiveError::write_failed(job.destination.clone(), e.to_string()))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut buffer = vec![0u8; 64 * 1024];
    for entry in &job.entries {
        let mut source = std::fs::File::open(&entry.source).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ArchiveError::SourceMissing {
                    path: entry.source.clone(),
                }
            } else {
                ArchiveError::Io(e)
            }
        })?;

        writer
            .start_file(entry.name.as_str(), options)
            .map_err(|e| ArchiveError::write_failed(job.destination.clone(), e.to_string()))?;

        loop {
            let read = source.read(&mut buffer).map_err(ArchiveError::Io)?;
            if read == 0 {
                break;
            }
            writer
                .write_all(&buffer[..read])
                .map_err(|e| ArchiveError::write_failed(job.destination.clone(), e.to_string()))?;
        }
    }

    let file = writer
        .finish()
        .map_err(|e| ArchiveError::write_failed(job.destination.clone(), e.to_string()))?;

    Ok(file.metadata().map(|m| m.len()).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveEntry;
    use std::io::Cursor;
    use tempfile::TempDir;
    use zip::ZipArchive;

    async fn entry(dir: &TempDir, file: &str, name: &str, content: &[u8]) -> ArchiveEntry {
        let path = dir.path().join(file);
        tokio::fs::write(&path, content).await.unwrap();
        ArchiveEntry {
            source: path,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_archive_preserves_entry_names_and_order() {
        let temp = TempDir::new().unwrap();
        let job = ArchiveJob {
            entries: vec![
                entry(&temp, "m1.pdf", "orden1.pdf", b"first").await,
                entry(&temp, "m2.pdf", "orden2.pdf", b"second").await,
                entry(&temp, "m3.pdf", "orden10.pdf", b"third").await,
            ],
            destination: temp.path().join("out.zip"),
        };

        let summary = ZipArchiver::new().archive(job).await.unwrap();
        assert_eq!(summary.entries, 3);
        assert!(summary.size_bytes > 0);

        let bytes = tokio::fs::read(&summary.destination).await.unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["orden1.pdf", "orden2.pdf", "orden10.pdf"]);
    }

    #[tokio::test]
    async fn test_archive_roundtrips_content() {
        let temp = TempDir::new().unwrap();
        let job = ArchiveJob {
            entries: vec![entry(&temp, "m1.pdf", "orden.pdf", b"payload bytes").await],
            destination: temp.path().join("out.zip"),
        };

        let summary = ZipArchiver::new().archive(job).await.unwrap();

        let bytes = tokio::fs::read(&summary.destination).await.unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = Vec::new();
        archive
            .by_name("orden.pdf")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, b"payload bytes");
    }

    #[tokio::test]
    async fn test_archive_empty_job_fails() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("out.zip");
        let job = ArchiveJob {
            entries: vec![],
            destination: destination.clone(),
        };

        let result = ZipArchiver::new().archive(job).await;
        assert!(matches!(result, Err(ArchiveError::NoEntries)));
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_archive_missing_source_leaves_no_output() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("out.zip");
        let job = ArchiveJob {
            entries: vec![ArchiveEntry {
                source: temp.path().join("never-written.pdf"),
                name: "orden.pdf".to_string(),
            }],
            destination: destination.clone(),
        };

        let result = ZipArchiver::new().archive(job).await;
        assert!(matches!(result, Err(ArchiveError::SourceMissing { .. })));
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_validate_ok() {
        assert!(ZipArchiver::new().validate().await.is_ok());
    }
}
