//! Shared fixtures for the graph crate.

use std::sync::Arc;

use orbis_executor::{
    core_registry, AccessMode, CommandRegistry, CompositeRegistry, Executor, Session, User,
};
use orbis_security::RoleBasedSecurity;
use orbis_storage::MemoryStorage;

use crate::graph_registry;

pub mod commands;

pub(crate) fn session_in(
    mode: AccessMode,
    name: &str,
    roles: &[&str],
) -> (Session, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let security = Arc::new(RoleBasedSecurity::with_default_roles(mode));
    let session = Session::new(User::new(name, roles), security, storage.clone());
    (session, storage)
}

pub(crate) fn admin_session() -> (Session, Arc<MemoryStorage>) {
    session_in(AccessMode::ReadWrite, "admin", &["admin"])
}

/// An executor that knows both the core and the graph verbs.
pub(crate) fn executor() -> Executor {
    let core: Arc<dyn CommandRegistry> = core_registry();
    let registry = CompositeRegistry::new(vec![core, graph_registry()]).unwrap();
    Executor::new(Arc::new(registry))
}
