//! Packaging of merged outputs into a single downloadable archive.
//!
//! Two interchangeable backends implement the [`Archiver`] trait: an
//! in-process writer built on the zip crate and an out-of-process
//! writer that delegates to an external interpreter. Both fail
//! atomically: a job either yields a complete archive or leaves no
//! destination file behind.

mod command;
mod error;
mod library;
mod traits;
mod types;

pub use command::CommandArchiver;
pub use error::ArchiveError;
pub use library::ZipArchiver;
pub use traits::Archiver;
pub use types::{ArchiveEntry, ArchiveJob, ArchiveSummary};

use std::sync::Arc;

use crate::config::{ArchiverBackend, ArchiverConfig};

/// Builds the archiver selected by configuration.
pub fn create_archiver(config: &ArchiverConfig) -> Arc<dyn Archiver> {
    match config.backend {
        ArchiverBackend::Library => Arc::new(ZipArchiver::new()),
        ArchiverBackend::Command => Arc::new(CommandArchiver::new(
            config.command.clone().unwrap_or_default(),
        )),
    }
}
