//! Out-of-process archiver delegating to an external interpreter.
//!
//! The packaging script runs Python's `zipfile` module: the entry list
//! is fed as JSON on stdin, the destination path is the first argument,
//! and a missing source raises inside the child so the whole job fails
//! with a non-zero exit code.

use async_trait::async_trait;
use serde::Serialize;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use super::error::ArchiveError;
use super::traits::{check_job, Archiver};
use super::types::{ArchiveJob, ArchiveSummary};
use crate::config::CommandArchiverConfig;
use crate::metrics;

const ZIPFILE_SCRIPT: &str = r#"
import sys, json, zipfile, os
entries = json.loads(sys.stdin.read())
dest = sys.argv[1]
with zipfile.ZipFile(dest, 'w', compression=zipfile.ZIP_DEFLATED) as zf:
    for item in entries:
        path = item['path']
        if not os.path.exists(path):
            raise FileNotFoundError(path)
        zf.write(path, arcname=item['name'])
"#;

#[derive(Serialize)]
struct WireEntry<'a> {
    path: &'a str,
    name: &'a str,
}

/// Archiver that spawns an interpreter process per job.
pub struct CommandArchiver {
    config: CommandArchiverConfig,
}

impl CommandArchiver {
    /// Creates a new command archiver with the given configuration.
    pub fn new(config: CommandArchiverConfig) -> Self {
        Self { config }
    }

    /// Creates an archiver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CommandArchiverConfig::default())
    }

    fn entry_payload(job: &ArchiveJob) -> String {
        let wire: Vec<WireEntry<'_>> = job
            .entries
            .iter()
            .map(|e| WireEntry {
                path: e.source.to_str().unwrap_or_default(),
                name: &e.name,
            })
            .collect();
        serde_json::to_string(&wire).unwrap_or_else(|_| "[]".to_string())
    }

    async fn run_packaging(&self, job: &ArchiveJob) -> Result<(), ArchiveError> {
        let payload = Self::entry_payload(job);

        let mut child = Command::new(&self.config.interpreter)
            .arg("-c")
            .arg(ZIPFILE_SCRIPT)
            .arg(&job.destination)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ArchiveError::InterpreterNotFound {
                        path: self.config.interpreter.clone(),
                    }
                } else {
                    ArchiveError::Io(e)
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload.as_bytes())
                .await
                .map_err(ArchiveError::Io)?;
            // Dropping stdin closes the pipe so the child sees EOF.
        }

        let stderr_pipe = child.stderr.take();

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let status = match timeout(timeout_duration, child.wait()).await {
            Ok(result) => result.map_err(ArchiveError::Io)?,
            Err(_) => {
                let _ = child.kill().await;
                return Err(ArchiveError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        if !status.success() {
            let mut stderr_output = String::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut stderr_output).await;
            }
            return Err(ArchiveError::command_failed(
                format!("interpreter exited with code: {:?}", status.code()),
                if stderr_output.is_empty() {
                    None
                } else {
                    Some(stderr_output)
                },
            ));
        }

        // Success without a destination file counts as failure.
        if tokio::fs::metadata(&job.destination).await.is_err() {
            return Err(ArchiveError::write_failed(
                job.destination.clone(),
                "archive not created",
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Archiver for CommandArchiver {
    fn name(&self) -> &str {
        "command"
    }

    async fn archive(&self, job: ArchiveJob) -> Result<ArchiveSummary, ArchiveError> {
        let start = Instant::now();
        check_job(&job).await?;

        if let Err(e) = self.run_packaging(&job).await {
            let _ = tokio::fs::remove_file(&job.destination).await;
            metrics::ARCHIVES_TOTAL
                .with_label_values(&["command", "failed"])
                .inc();
            return Err(e);
        }

        let size_bytes = tokio::fs::metadata(&job.destination)
            .await
            .map(|m| m.len())
            .unwrap_or(0);

        let elapsed = start.elapsed();
        metrics::ARCHIVES_TOTAL
            .with_label_values(&["command", "success"])
            .inc();
        metrics::ARCHIVE_DURATION
            .with_label_values(&["command"])
            .observe(elapsed.as_secs_f64());

        Ok(ArchiveSummary {
            destination: job.destination,
            entries: job.entries.len(),
            size_bytes,
            duration_ms: elapsed.as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), ArchiveError> {
        let result = Command::new(&self.config.interpreter)
            .arg("-c")
            .arg("import zipfile")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(ArchiveError::command_failed(
                format!("interpreter check exited with code: {:?}", status.code()),
                None,
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ArchiveError::InterpreterNotFound {
                    path: self.config.interpreter.clone(),
                })
            }
            Err(e) => Err(ArchiveError::Io(e)),
        }
    }
}
