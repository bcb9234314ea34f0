//! Record version markers
//!
//! Every stored record carries a version counter that is bumped on each
//! update. Callers that mutate a record pass a [`RecordVersion`] telling
//! storage how to treat that counter:
//!
//! - **Tracked**: optimistic concurrency. The mutation only proceeds when the
//!   supplied counter equals the stored one.
//! - **Untracked**: the mutation proceeds unconditionally. Maintenance verbs
//!   use this to remove records whose stored state can no longer be trusted.

use serde::{Deserialize, Serialize};

/// Version marker supplied with a record mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordVersion {
    /// Checked against the stored version counter
    Tracked(u64),
    /// Skip the optimistic-concurrency check
    Untracked,
}

impl RecordVersion {
    /// Create a tracked version
    pub const fn tracked(v: u64) -> Self {
        RecordVersion::Tracked(v)
    }

    /// Create an untracked version
    pub const fn untracked() -> Self {
        RecordVersion::Untracked
    }

    /// Check if this version bypasses concurrency checks
    #[inline]
    pub const fn is_untracked(&self) -> bool {
        matches!(self, RecordVersion::Untracked)
    }

    /// The tracked counter, if any
    #[inline]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            RecordVersion::Tracked(v) => Some(*v),
            RecordVersion::Untracked => None,
        }
    }

    /// Whether a mutation carrying this marker may touch a record stored at `current`
    #[inline]
    pub const fn admits(&self, current: u64) -> bool {
        match self {
            RecordVersion::Tracked(v) => *v == current,
            RecordVersion::Untracked => true,
        }
    }
}

impl std::fmt::Display for RecordVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordVersion::Tracked(v) => write!(f, "v{}", v),
            RecordVersion::Untracked => write!(f, "untracked"),
        }
    }
}

impl From<u64> for RecordVersion {
    fn from(v: u64) -> Self {
        RecordVersion::Tracked(v)
    }
}
