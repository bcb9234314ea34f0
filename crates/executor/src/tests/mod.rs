//! Test modules and shared fixtures for the executor crate.

use std::sync::Arc;

use orbis_core::{Record, RecordStorage};
use orbis_security::{AccessMode, RoleBasedSecurity, User};
use orbis_storage::MemoryStorage;

use crate::Session;


/// A session for `name` holding `roles`, over a fresh in-memory store.
pub(crate) fn session_as(name: &str, roles: &[&str]) -> (Session, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let security = Arc::new(RoleBasedSecurity::with_default_roles(AccessMode::ReadWrite));
    let session = Session::new(User::new(name, roles), security, storage.clone());
    (session, storage)
}

pub(crate) fn admin_session() -> (Session, Arc<MemoryStorage>) {
    session_as("admin", &["admin"])
}

pub(crate) fn test_session() -> Session {
    admin_session().0
}

/// Store an empty record of `class` and return it with its id.
pub(crate) fn seed(storage: &MemoryStorage, class: &str) -> Record {
    let cluster = storage.cluster_id(class).unwrap();
    storage.create(cluster, Record::new(class)).unwrap()
}
