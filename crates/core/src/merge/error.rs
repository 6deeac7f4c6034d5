//! Error types for pair merging.

use thiserror::Error;

/// Which half of a pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Order,
    Invoice,
}

impl std::fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Order => write!(f, "order"),
            Self::Invoice => write!(f, "invoice"),
        }
    }
}

/// Errors that can occur while merging one (order, invoice) pair.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Input bytes are not a readable PDF document.
    #[error("Failed to parse {role} PDF: {reason}")]
    Parse { role: DocumentRole, reason: String },

    /// Input parsed but contains no pages.
    #[error("The {role} PDF has no pages")]
    EmptyDocument { role: DocumentRole },

    /// The merged page tree could not be assembled.
    #[error("Failed to assemble merged document: {reason}")]
    Assemble { reason: String },

    /// The merged document could not be serialized.
    #[error("Failed to serialize merged document: {reason}")]
    Serialize { reason: String },
}

impl MergeError {
    pub fn parse(role: DocumentRole, reason: impl Into<String>) -> Self {
        Self::Parse {
            role,
            reason: reason.into(),
        }
    }

    pub fn assemble(reason: impl Into<String>) -> Self {
        Self::Assemble {
            reason: reason.into(),
        }
    }
}
