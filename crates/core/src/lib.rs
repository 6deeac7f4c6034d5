pub mod archive;
pub mod batch;
pub mod cleanup;
pub mod config;
pub mod merge;
pub mod metrics;
pub mod naming;
pub mod sequence;
pub mod testing;

pub use archive::{
    create_archiver, ArchiveEntry, ArchiveError, ArchiveJob, ArchiveSummary, Archiver,
    CommandArchiver, ZipArchiver,
};
pub use batch::{
    BatchError, BatchMerger, MergedArtifact, RunIdProvider, UploadedFile, UuidRunIdProvider,
};
pub use cleanup::CleanupGuard;
pub use config::{
    load_config, load_config_from_str, validate_config, ArchiverBackend, ArchiverConfig,
    CommandArchiverConfig, Config, ConfigError, LimitsConfig, SanitizedConfig, ServerConfig,
    StorageConfig,
};
pub use merge::{DocumentRole, MergeError, PairMerger};
pub use naming::NameAllocator;
pub use sequence::{compare_by_sequence, extract_sequence, sort_by_sequence};
