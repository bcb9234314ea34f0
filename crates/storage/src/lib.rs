//! Storage layer for OrbisDB
//!
//! This crate implements the collaborators the command layer deletes
//! through:
//! - MemoryStorage: DashMap-sharded record store keyed by RecordId, storing
//!   encoded record bytes so that deletes never need to decode them
//! - Level1Cache: session-scoped read cache with explicit eviction
//! - codec: record body encoding
//!
//! Both types implement the `orbis_core` traits and are `Send + Sync`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod codec;
pub mod memory;

pub use cache::Level1Cache;
pub use memory::MemoryStorage;
