//! Core types and traits for OrbisDB
//!
//! This crate defines the foundational types shared by every layer of the
//! query-processing core:
//! - RecordId: location token of a stored record (`#cluster:position`)
//! - RecordVersion: tracked (optimistic concurrency) or untracked version marker
//! - Value: unified value enum for record fields and expression results
//! - Record: a class-tagged bag of fields addressed by a RecordId
//! - Error: storage-level error type
//! - Traits: collaborator interfaces for the storage engine and read caches

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod rid;
pub mod traits;
pub mod value;
pub mod version;

pub use error::{OrbisError, OrbisResult};
pub use record::Record;
pub use rid::RecordId;
pub use traits::{DeleteCallback, DeleteMode, RecordCache, RecordStorage};
pub use value::Value;
pub use version::RecordVersion;
