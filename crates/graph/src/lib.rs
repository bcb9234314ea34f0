//! # Orbis Graph
//!
//! Vertex and edge verbs for OrbisDB, plus [`graph_session`], which gives any
//! session graph semantics.
//!
//! The verbs ship as their own family. Register them next to the core verbs:
//!
//! ```text
//! let core: Arc<dyn CommandRegistry> = core_registry();
//! let registry = CompositeRegistry::new(vec![core, graph_registry()])?;
//! let executor = Executor::new(Arc::new(registry));
//!
//! executor.execute(&session, &CommandRequest::new("CREATE VERTEX Person SET name = 'ada'"))?;
//! ```

#![warn(missing_docs)]

mod commands;
mod registry;
mod session;

#[cfg(test)]
mod tests;

pub use commands::{CreateEdge, CreateVertex, DeleteEdge, DeleteVertex};
pub use registry::{graph_registry, GraphCommandRegistry};
pub use session::{graph_session, GraphSession, EDGE_CLASS, VERTEX_CLASS};
