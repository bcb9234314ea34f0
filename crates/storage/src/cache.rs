//! First-level (session-scoped) record cache.
//!
//! Each session owns one [`Level1Cache`]. Reads go through it; anything
//! that removes or rewrites a record behind the session's back must evict
//! the stale copy explicitly.

use orbis_core::{OrbisResult, Record, RecordCache, RecordId};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

/// RwLock-protected map from RecordId to the cached record.
#[derive(Debug)]
pub struct Level1Cache {
    enabled: bool,
    records: RwLock<FxHashMap<RecordId, Record>>,
}

impl Level1Cache {
    /// Create an enabled cache.
    pub fn new() -> Self {
        Level1Cache {
            enabled: true,
            records: RwLock::new(FxHashMap::default()),
        }
    }

    /// Create a cache that never retains anything.
    pub fn disabled() -> Self {
        Level1Cache {
            enabled: false,
            ..Self::new()
        }
    }

    /// Whether the cache retains records.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if `rid` is cached.
    pub fn contains(&self, rid: &RecordId) -> bool {
        self.records.read().contains_key(rid)
    }

    /// Drop every cached record.
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl Default for Level1Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCache for Level1Cache {
    fn get(&self, rid: &RecordId) -> Option<Record> {
        self.records.read().get(rid).cloned()
    }

    fn put(&self, record: Record) -> OrbisResult<()> {
        if self.enabled && record.rid.is_persistent() {
            self.records.write().insert(record.rid, record);
        }
        Ok(())
    }

    fn evict(&self, rid: &RecordId) -> OrbisResult<()> {
        let removed = self.records.write().remove(rid).is_some();
        trace!(%rid, removed, "level1 evict");
        Ok(())
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}
