//! Batch orchestration: one request's worth of pair merges.
//!
//! The orchestrator validates the incoming collections, sorts orders
//! and invoices independently by their filename sequence, merges each
//! positional pair, and persists the merged outputs under run-scoped
//! names. Batches are all-or-nothing: the first failing pair aborts
//! the run and nothing is delivered.

mod error;
mod types;

pub use error::BatchError;
pub use types::{MergedArtifact, RunIdProvider, UploadedFile, UuidRunIdProvider};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::cleanup::CleanupGuard;
use crate::merge::PairMerger;
use crate::metrics;
use crate::naming::NameAllocator;
use crate::sequence::sort_by_sequence;

/// Drives the merge pipeline for one batch request at a time.
pub struct BatchMerger {
    merger: PairMerger,
    run_ids: Arc<dyn RunIdProvider>,
    workdir: PathBuf,
}

impl BatchMerger {
    pub fn new(workdir: PathBuf, run_ids: Arc<dyn RunIdProvider>) -> Self {
        Self {
            merger: PairMerger::new(),
            run_ids,
            workdir,
        }
    }

    /// Working directory where run-scoped temporary files are written.
    pub fn workdir(&self) -> &PathBuf {
        &self.workdir
    }

    /// Allocates the run id that namespaces this request's temporary
    /// filenames.
    pub fn begin_run(&self) -> String {
        self.run_ids.next_run_id()
    }

    /// Merges every (order, invoice) pair of one batch.
    ///
    /// Preconditions are checked, not assumed: both collections must be
    /// non-empty and of equal length. Merged outputs are registered
    /// with `cleanup` the moment they are written, so the caller's
    /// guard removes them on every exit path. On success the artifacts
    /// are returned in sorted pair order, ready for archiving.
    pub async fn merge_batch(
        &self,
        run_id: &str,
        mut orders: Vec<UploadedFile>,
        mut invoices: Vec<UploadedFile>,
        cleanup: &mut CleanupGuard,
    ) -> Result<Vec<MergedArtifact>, BatchError> {
        if orders.is_empty() || invoices.is_empty() {
            return Err(BatchError::NoFiles);
        }
        if orders.len() != invoices.len() {
            return Err(BatchError::CountMismatch {
                orders: orders.len(),
                invoices: invoices.len(),
            });
        }

        sort_by_sequence(&mut orders, |f| f.sort_name());
        sort_by_sequence(&mut invoices, |f| f.sort_name());

        metrics::BATCH_PAIRS.observe(orders.len() as f64);

        let mut names = NameAllocator::new();
        let mut artifacts = Vec::with_capacity(orders.len());

        for (index, (order, invoice)) in orders.iter().zip(invoices.iter()).enumerate() {
            let start = Instant::now();

            let order_bytes = tokio::fs::read(&order.path).await?;
            let invoice_bytes = tokio::fs::read(&invoice.path).await?;

            let merged = self.merger.merge(&order_bytes, &invoice_bytes)?;

            let archive_name = names.allocate(order.original_name.as_deref(), index);
            let path = self.workdir.join(format!("{}_{}.pdf", run_id, index + 1));
            tokio::fs::write(&path, &merged).await?;
            cleanup.track(path.clone());

            metrics::PAIRS_MERGED_TOTAL.inc();
            metrics::MERGE_DURATION.observe(start.elapsed().as_secs_f64());
            debug!(
                run_id,
                pair = index + 1,
                archive_name,
                bytes = merged.len(),
                "Merged pair"
            );

            artifacts.push(MergedArtifact { path, archive_name });
        }

        Ok(artifacts)
    }
}
