//! Test support: deterministic run ids and generated PDF fixtures.
//!
//! Used by unit tests in this crate and by the server's integration
//! tests; nothing here is wired into production paths.

pub mod fixtures;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::batch::RunIdProvider;

/// Run id provider producing `<prefix>-1`, `<prefix>-2`, ... in call order.
#[derive(Debug)]
pub struct SequentialRunIdProvider {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialRunIdProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl RunIdProvider for SequentialRunIdProvider {
    fn next_run_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
