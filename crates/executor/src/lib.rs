//! # Orbis Executor
//!
//! The command and method dispatch core of OrbisDB.
//!
//! A textual request travels through three layers:
//! - the [`CommandRegistry`] maps its verb to a constructor and yields a fresh
//!   [`CommandInstance`];
//! - the instance parses the request, checking the session's permissions
//!   first, then executes against the session's storage and cache;
//! - the [`Executor`] drives both steps and hands verbatim commands to the
//!   [`Replicator`].
//!
//! Per-row expressions are a separate path: the parser turns
//! `expr.method()` suffixes into [`MethodNode`]s that evaluate depth-first.
//!
//! ## Quick Start
//!
//! ```text
//! use orbis_executor::{CommandRequest, Executor, Session};
//!
//! let executor = Executor::default();
//! let session = Session::new(user, security, storage);
//!
//! let out = executor.execute(&session, &CommandRequest::new("TRUNCATE RECORD #12:0, #12:1"))?;
//! assert_eq!(out.as_count(), Some(2));
//! ```
//!
//! ## Verbs
//!
//! | Verb | Family | Replication |
//! |------|--------|-------------|
//! | `TRUNCATE RECORD` | core | verbatim |
//! | `CREATE VERTEX`, `CREATE EDGE`, `DELETE VERTEX`, `DELETE EDGE` | graph (`orbis-graph`) | local |

#![warn(missing_docs)]

mod command;
mod config;
mod context;
mod error;
mod executor;
mod expression;
mod handlers;
mod methods;
mod output;
pub mod parser;
mod registry;
mod replication;
mod request;
mod session;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API
// =============================================================================

pub use command::{CommandExecutor, CommandInstance, ReplicationMode};
pub use config::{CacheConfig, OrbisConfig, ReplicationConfig, CONFIG_FILE_NAME};
pub use context::CommandContext;
pub use error::Error;
pub use executor::Executor;
pub use expression::{Expression, FIELD_CLASS, FIELD_RID, FIELD_VERSION};
pub use handlers::TruncateRecord;
pub use methods::{
    Deferred, MethodFunction, MethodNode, MethodRegistry, NumericCoercion, NumericTarget,
};
pub use output::Output;
pub use registry::{
    core_registry, CommandConstructor, CommandRegistry, CompositeRegistry, StaticCommandRegistry,
};
pub use replication::{RecordingReplicator, Replicator};
pub use request::{CommandRequest, ParameterRef, Parameters};
pub use session::{Session, SessionKind};

// Re-export the data model so users don't need orbis-core directly
pub use orbis_core::{OrbisError, Record, RecordId, RecordVersion, Value};

// Re-export security types so users don't need orbis-security directly
pub use orbis_security::{AccessMode, Permission, Resource, User};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
