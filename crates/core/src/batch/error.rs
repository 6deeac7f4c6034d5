//! Error types for the batch module.

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::merge::MergeError;

/// Errors that can occur while processing one batch request.
///
/// Validation variants carry the user-facing Spanish messages the API
/// returns verbatim; everything else surfaces as a processing failure.
#[derive(Debug, Error)]
pub enum BatchError {
    /// One or both collections were empty.
    #[error("Debes adjuntar órdenes y facturas (formatos PDF).")]
    NoFiles,

    /// Collections have different lengths.
    #[error("La cantidad de órdenes y facturas no coincide")]
    CountMismatch { orders: usize, invoices: usize },

    /// A pair failed to merge; the batch is aborted.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// Packaging the merged outputs failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// I/O error while reading sources or persisting outputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BatchError {
    /// Whether this error is a request validation failure (HTTP 400)
    /// rather than a processing failure (HTTP 500).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoFiles | Self::CountMismatch { .. })
    }

    /// Additional human-readable detail for the JSON error body.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::CountMismatch { orders, invoices } => {
                Some(format!("Órdenes: {orders}, Facturas: {invoices}"))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_mismatch_detail() {
        let err = BatchError::CountMismatch {
            orders: 3,
            invoices: 2,
        };
        assert!(err.is_validation());
        assert_eq!(err.detail().unwrap(), "Órdenes: 3, Facturas: 2");
        assert_eq!(
            err.to_string(),
            "La cantidad de órdenes y facturas no coincide"
        );
    }

    #[test]
    fn test_no_files_has_no_detail() {
        let err = BatchError::NoFiles;
        assert!(err.is_validation());
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_merge_error_is_not_validation() {
        let err = BatchError::from(MergeError::parse(
            crate::merge::DocumentRole::Order,
            "broken",
        ));
        assert!(!err.is_validation());
    }
}
