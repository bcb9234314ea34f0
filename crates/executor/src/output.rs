//! Output enum for command execution results.
//!
//! Every verb produces exactly one output variant. This mapping is
//! deterministic: the same verb always produces the same variant (though
//! the values may differ based on database state).

use orbis_core::{Record, Value};
use serde::{Deserialize, Serialize};

/// Successful command execution results.
///
/// | Verb | Output |
/// |------|--------|
/// | `TRUNCATE RECORD` | `Count` (number of requested identifiers) |
/// | `CREATE VERTEX`, `CREATE EDGE` | `Record` |
/// | `DELETE VERTEX`, `DELETE EDGE` | `Count` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Number of affected (or requested) records
    Count(u64),

    /// A single record
    Record(Record),

    /// A single value, for verbs outside the shipped families
    Value(Value),
}

impl Output {
    /// The count, if this is a `Count` output
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Output::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// The record, if this is a `Record` output
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Output::Record(r) => Some(r),
            _ => None,
        }
    }
}
