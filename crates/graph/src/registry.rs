//! The graph command family.

use std::collections::BTreeSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use orbis_executor::{
    CommandConstructor, CommandInstance, CommandRegistry, Result, Session, StaticCommandRegistry,
};

use crate::commands::{CreateEdge, CreateVertex, DeleteEdge, DeleteVertex};
use crate::session::{graph_session, GraphSession};

static GRAPH: Lazy<StaticCommandRegistry> = Lazy::new(|| {
    StaticCommandRegistry::from_static(&[
        (CreateEdge::NAME, CreateEdge::create as CommandConstructor),
        (DeleteEdge::NAME, DeleteEdge::create as CommandConstructor),
        (CreateVertex::NAME, CreateVertex::create as CommandConstructor),
        (DeleteVertex::NAME, DeleteVertex::create as CommandConstructor),
    ])
});

/// Registry of the four graph verbs.
///
/// Stateless; every value shares the same process-wide table.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphCommandRegistry;

impl GraphCommandRegistry {
    /// Shorthand for [`graph_session`].
    pub fn graph(session: &Session) -> GraphSession<'_> {
        graph_session(session)
    }
}

impl CommandRegistry for GraphCommandRegistry {
    fn names(&self) -> BTreeSet<&'static str> {
        GRAPH.names()
    }

    fn create(&self, name: &str) -> Result<CommandInstance> {
        GRAPH.create(name)
    }

    fn contains(&self, name: &str) -> bool {
        GRAPH.contains(name)
    }
}

/// The graph registry as a shareable trait object.
pub fn graph_registry() -> Arc<dyn CommandRegistry> {
    Arc::new(GraphCommandRegistry)
}
