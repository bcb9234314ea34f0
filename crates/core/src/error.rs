//! Error types for the storage-facing layer
//!
//! [`OrbisError`] is what the storage engine, the read caches and the
//! replication collaborator report. The command layer never inspects it
//! beyond wrapping it: a fault raised while a command runs travels back to
//! the caller as the `cause` of an execution failure.
//!
//! The type is `Clone + Serialize` so that it can be embedded in
//! the executor's serializable error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rid::RecordId;

/// Result type alias for storage-level operations
pub type OrbisResult<T> = std::result::Result<T, OrbisError>;

/// Storage-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum OrbisError {
    /// Text that does not denote a record identifier
    #[error("invalid record id '{input}': {reason}")]
    InvalidRecordId {
        /// Offending text
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// No record at this location
    #[error("record not found: {rid}")]
    RecordNotFound {
        /// Requested location
        rid: RecordId,
    },

    /// A tracked version did not match the stored one
    #[error("concurrent modification on {rid}: expected version {expected}, found {actual}")]
    ConcurrentModification {
        /// Record being modified
        rid: RecordId,
        /// Version supplied by the caller
        expected: u64,
        /// Version currently stored
        actual: u64,
    },

    /// Stored bytes could not be turned back into a record
    #[error("record {rid} is corrupted: {reason}")]
    Corruption {
        /// Affected record
        rid: RecordId,
        /// Decoder message
        reason: String,
    },

    /// Storage engine failure
    #[error("storage error: {reason}")]
    Storage {
        /// Engine message
        reason: String,
    },

    /// Read cache failure
    #[error("cache error: {reason}")]
    Cache {
        /// Cache message
        reason: String,
    },

    /// Replication transport failure
    #[error("replication error: {reason}")]
    Replication {
        /// Transport message
        reason: String,
    },

    /// Caller supplied an unusable argument
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },
}

impl OrbisError {
    /// Build an [`OrbisError::InvalidRecordId`].
    pub fn invalid_rid(input: impl Into<String>, reason: impl Into<String>) -> Self {
        OrbisError::InvalidRecordId {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`OrbisError::Storage`].
    pub fn storage(reason: impl Into<String>) -> Self {
        OrbisError::Storage {
            reason: reason.into(),
        }
    }

    /// Build an [`OrbisError::Cache`].
    pub fn cache(reason: impl Into<String>) -> Self {
        OrbisError::Cache {
            reason: reason.into(),
        }
    }

    /// Build an [`OrbisError::Replication`].
    pub fn replication(reason: impl Into<String>) -> Self {
        OrbisError::Replication {
            reason: reason.into(),
        }
    }

    /// Build an [`OrbisError::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        OrbisError::InvalidInput {
            reason: reason.into(),
        }
    }
}
