use std::path::PathBuf;
use std::sync::Arc;

use fusor_core::{Archiver, BatchMerger, Config, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    batcher: BatchMerger,
    archiver: Arc<dyn Archiver>,
}

impl AppState {
    pub fn new(config: Config, batcher: BatchMerger, archiver: Arc<dyn Archiver>) -> Self {
        Self {
            config,
            batcher,
            archiver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn batcher(&self) -> &BatchMerger {
        &self.batcher
    }

    pub fn archiver(&self) -> &dyn Archiver {
        self.archiver.as_ref()
    }

    pub fn workdir(&self) -> &PathBuf {
        self.batcher.workdir()
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }
}
