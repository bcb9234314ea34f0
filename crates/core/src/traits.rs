//! Collaborator traits for storage and caching
//!
//! The command layer talks to the storage engine and to session read caches
//! only through these narrow interfaces. Implementations must be safe to call
//! concurrently from multiple sessions (requires Send + Sync); the command
//! layer performs no locking of its own around them.

use crate::error::OrbisResult;
use crate::record::Record;
use crate::rid::RecordId;
use crate::version::RecordVersion;

/// Completion callback for a delete: invoked with the target and whether a
/// record was actually removed.
pub type DeleteCallback<'a> = &'a (dyn Fn(&RecordId, bool) + Send + Sync);

/// How the engine should carry out a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Return only once the record is gone
    #[default]
    Synchronous,
    /// The engine may return before the record is gone
    Asynchronous,
}

/// Record storage engine
///
/// `delete` operates on raw storage entries: it never decodes the stored
/// record, so it also succeeds on entries that [`RecordStorage::read`] cannot
/// decode.
pub trait RecordStorage: Send + Sync {
    /// Resolve a cluster name to its id, creating the cluster on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn cluster_id(&self, name: &str) -> OrbisResult<i32>;

    /// Place a new record in `cluster`.
    ///
    /// Returns the record with its assigned id and version `1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster does not exist or the record cannot be
    /// encoded.
    fn create(&self, cluster: i32, record: Record) -> OrbisResult<Record>;

    /// Read and decode the record at `rid`.
    ///
    /// Returns `None` if there is no entry at that location.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OrbisError::Corruption`] if the entry cannot be decoded.
    fn read(&self, rid: &RecordId) -> OrbisResult<Option<Record>>;

    /// Replace the stored record, returning the new version counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or `version` does not
    /// admit the stored counter.
    fn update(&self, record: &Record, version: RecordVersion) -> OrbisResult<u64>;

    /// Remove the entry at `rid`.
    ///
    /// Returns `true` if an entry was removed. A missing entry is not an error.
    /// `callback`, when supplied, is invoked once the outcome is known.
    ///
    /// # Errors
    ///
    /// Returns an error if `version` does not admit the stored counter or the
    /// engine fails.
    fn delete(
        &self,
        rid: &RecordId,
        version: RecordVersion,
        mode: DeleteMode,
        callback: Option<DeleteCallback<'_>>,
    ) -> OrbisResult<bool>;
}

/// Session-scoped read cache (first-level cache)
pub trait RecordCache: Send + Sync {
    /// Cached copy of the record, if any
    fn get(&self, rid: &RecordId) -> Option<Record>;

    /// Cache a record under its id
    ///
    /// # Errors
    ///
    /// Returns an error if the cache rejects the record.
    fn put(&self, record: Record) -> OrbisResult<()>;

    /// Drop any cached copy of `rid`. Evicting an absent entry is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache fails.
    fn evict(&self, rid: &RecordId) -> OrbisResult<()>;

    /// Number of cached records
    fn len(&self) -> usize;

    /// Check if the cache holds nothing
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
