//! Concrete command objects.
//!
//! | Module | Verb | Output |
//! |--------|------|--------|
//! | `truncate_record` | `TRUNCATE RECORD` | `Count` |
//!
//! Graph verbs live in `orbis-graph` and plug in through their own registry.

mod truncate_record;

pub use truncate_record::TruncateRecord;
