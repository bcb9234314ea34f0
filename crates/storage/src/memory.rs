//! In-memory record storage
//!
//! # Design
//!
//! - DashMap keyed by RecordId: sharded writes, lock-free reads
//! - Clusters are allocated on first use and never removed
//! - Positions are handed out per cluster from a monotonically increasing
//!   counter; a deleted position is never reused
//! - Entries hold encoded bytes plus the version counter. Only `read` and
//!   `update` decode; `delete` works on the raw entry.

use std::sync::atomic::{AtomicI32, Ordering};

use dashmap::DashMap;
use orbis_core::{
    DeleteCallback, DeleteMode, OrbisError, OrbisResult, Record, RecordId, RecordStorage,
    RecordVersion,
};
use tracing::{debug, trace};

use crate::codec;

/// A raw storage entry.
#[derive(Debug, Clone)]
struct StoredEntry {
    version: u64,
    bytes: Vec<u8>,
}

/// DashMap-backed implementation of [`RecordStorage`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<RecordId, StoredEntry>,
    cluster_ids: DashMap<String, i32>,
    next_position: DashMap<i32, i64>,
    next_cluster: AtomicI32,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, decodable or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an entry exists at `rid`, without decoding it.
    pub fn contains(&self, rid: &RecordId) -> bool {
        self.entries.contains_key(rid)
    }

    /// Write raw bytes at a fixed location, bypassing the codec.
    ///
    /// Used when importing entries verbatim from another node or a backup.
    /// The bytes are not validated, so later reads may report corruption.
    pub fn put_raw(&self, rid: RecordId, version: u64, bytes: Vec<u8>) {
        self.next_position
            .entry(rid.cluster())
            .and_modify(|next| *next = (*next).max(rid.position() + 1))
            .or_insert(rid.position() + 1);
        self.entries.insert(rid, StoredEntry { version, bytes });
    }

    fn allocate_position(&self, cluster: i32) -> OrbisResult<i64> {
        let mut next = self
            .next_position
            .get_mut(&cluster)
            .ok_or_else(|| OrbisError::storage(format!("cluster {} does not exist", cluster)))?;
        let position = *next;
        *next += 1;
        Ok(position)
    }
}

impl RecordStorage for MemoryStorage {
    fn cluster_id(&self, name: &str) -> OrbisResult<i32> {
        if name.is_empty() {
            return Err(OrbisError::invalid_input("cluster name must not be empty"));
        }
        let key = name.to_lowercase();
        let id = *self.cluster_ids.entry(key).or_insert_with(|| {
            let id = self.next_cluster.fetch_add(1, Ordering::SeqCst);
            self.next_position.entry(id).or_insert(0);
            debug!(cluster = name, id, "created cluster");
            id
        });
        Ok(id)
    }

    fn create(&self, cluster: i32, mut record: Record) -> OrbisResult<Record> {
        let bytes = codec::encode(&record)?;
        let position = self.allocate_position(cluster)?;

        record.rid = RecordId::new(cluster, position);
        record.version = 1;
        self.entries.insert(record.rid, StoredEntry { version: 1, bytes });
        trace!(rid = %record.rid, "created record");
        Ok(record)
    }

    fn read(&self, rid: &RecordId) -> OrbisResult<Option<Record>> {
        match self.entries.get(rid) {
            Some(entry) => codec::decode(*rid, entry.version, &entry.bytes).map(Some),
            None => Ok(None),
        }
    }

    fn update(&self, record: &Record, version: RecordVersion) -> OrbisResult<u64> {
        let bytes = codec::encode(record)?;
        let mut entry = self
            .entries
            .get_mut(&record.rid)
            .ok_or(OrbisError::RecordNotFound { rid: record.rid })?;

        if !version.admits(entry.version) {
            return Err(OrbisError::ConcurrentModification {
                rid: record.rid,
                expected: version.as_u64().unwrap_or_default(),
                actual: entry.version,
            });
        }

        entry.version += 1;
        entry.bytes = bytes;
        Ok(entry.version)
    }

    fn delete(
        &self,
        rid: &RecordId,
        version: RecordVersion,
        mode: DeleteMode,
        callback: Option<DeleteCallback<'_>>,
    ) -> OrbisResult<bool> {
        // Check and remove under the shard lock so a concurrent update cannot
        // slip between them.
        let removed = match self
            .entries
            .remove_if(rid, |_, entry| version.admits(entry.version))
        {
            Some(_) => true,
            None => match self.entries.get(rid) {
                Some(entry) => {
                    return Err(OrbisError::ConcurrentModification {
                        rid: *rid,
                        expected: version.as_u64().unwrap_or_default(),
                        actual: entry.version,
                    })
                }
                None => false,
            },
        };

        debug!(%rid, %version, ?mode, removed, "delete");
        if let Some(cb) = callback {
            cb(rid, removed);
        }
        Ok(removed)
    }
}
