//! OrbisDB - command and method dispatch for a document/graph database
//!
//! This crate bundles the layers behind a single import: the core verbs and
//! per-row methods from `orbis-executor`, the graph verbs from `orbis-graph`,
//! and the in-memory storage and role-based security used to run them.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use orbisdb::{default_executor, AccessMode, CommandRequest, MemoryStorage, RoleBasedSecurity, Session, User};
//!
//! let session = Session::new(
//!     User::new("admin", &["admin"]),
//!     Arc::new(RoleBasedSecurity::with_default_roles(AccessMode::ReadWrite)),
//!     Arc::new(MemoryStorage::new()),
//! );
//! let executor = default_executor()?;
//!
//! let ada = executor.execute(&session, &CommandRequest::new("CREATE VERTEX Person SET name = 'ada'"))?;
//! executor.execute(&session, &CommandRequest::new("TRUNCATE RECORD #12:0, #12:1"))?;
//! ```

use std::sync::Arc;

// Re-export the public API from orbis-executor
pub use orbis_executor::*;

pub use orbis_graph::{
    graph_registry, graph_session, CreateEdge, CreateVertex, DeleteEdge, DeleteVertex,
    GraphCommandRegistry, GraphSession, EDGE_CLASS, VERTEX_CLASS,
};
pub use orbis_security::{RoleBasedSecurity, SecurityManager};
pub use orbis_core::RecordStorage;
pub use orbis_storage::{Level1Cache, MemoryStorage};

/// Every verb family shipped with OrbisDB: core first, then graph.
///
/// # Errors
///
/// [`Error::Registration`] if two families claim the same verb.
pub fn default_registry() -> Result<CompositeRegistry> {
    let core: Arc<dyn CommandRegistry> = core_registry();
    CompositeRegistry::new(vec![core, graph_registry()])
}

/// An executor over [`default_registry`] with the default configuration.
pub fn default_executor() -> Result<Executor> {
    Ok(Executor::new(Arc::new(default_registry()?)))
}
