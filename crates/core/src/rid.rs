//! Record identifier
//!
//! A [`RecordId`] names the physical location of a record: the cluster it
//! lives in and its position inside that cluster. The textual form is
//! `#<cluster>:<position>`, e.g. `#12:0`.
//!
//! Identifiers are opaque to the command layer. They are produced by the
//! parser (as literal text), resolved by [`RecordId::from_str`] right before
//! use and handed to the storage engine unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OrbisError;

/// Prefix of the textual record identifier form.
pub const RID_PREFIX: char = '#';

/// Separator between cluster and position.
pub const RID_SEPARATOR: char = ':';

/// Cluster id of a record that has not been assigned storage yet.
pub const CLUSTER_ID_INVALID: i32 = -1;

/// Position of a record that has not been assigned storage yet.
pub const CLUSTER_POS_INVALID: i64 = -1;

/// Location of a record: cluster plus position.
///
/// Ordering is by cluster first, then by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId {
    cluster: i32,
    position: i64,
}

impl RecordId {
    /// Create an identifier from its parts.
    pub const fn new(cluster: i32, position: i64) -> Self {
        RecordId { cluster, position }
    }

    /// Identifier of a record that has not been stored yet (`#-1:-1`).
    pub const fn unassigned() -> Self {
        RecordId::new(CLUSTER_ID_INVALID, CLUSTER_POS_INVALID)
    }

    /// Cluster the record lives in.
    #[inline]
    pub const fn cluster(&self) -> i32 {
        self.cluster
    }

    /// Position inside the cluster.
    #[inline]
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// True when both parts point at a real storage slot.
    #[inline]
    pub const fn is_persistent(&self) -> bool {
        self.cluster >= 0 && self.position >= 0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", RID_PREFIX, self.cluster, RID_SEPARATOR, self.position)
    }
}

impl FromStr for RecordId {
    type Err = OrbisError;

    /// Parse `#c:p` or `c:p`, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix(RID_PREFIX).unwrap_or(trimmed);

        let (cluster, position) = body
            .split_once(RID_SEPARATOR)
            .ok_or_else(|| OrbisError::invalid_rid(s, "missing ':' separator"))?;

        let cluster = cluster
            .parse::<i32>()
            .map_err(|e| OrbisError::invalid_rid(s, format!("bad cluster id: {}", e)))?;
        let position = position
            .parse::<i64>()
            .map_err(|e| OrbisError::invalid_rid(s, format!("bad cluster position: {}", e)))?;

        Ok(RecordId::new(cluster, position))
    }
}
