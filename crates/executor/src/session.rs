//! Per-request database session.
//!
//! A [`Session`] bundles everything a command touches: the user it runs as,
//! the security manager that judges that user, the storage engine and a
//! session-scoped first-level cache. It is passed explicitly to every
//! `parse` and `execute` call; nothing is looked up from thread-local state.
//!
//! # Usage
//!
//! ```ignore
//! use orbis_executor::{CommandRequest, Executor, Session};
//!
//! let session = Session::new(user, security, storage);
//! let out = executor.execute(&session, &CommandRequest::new("TRUNCATE RECORD #12:0"))?;
//! ```

use std::sync::Arc;

use orbis_core::{OrbisResult, Record, RecordCache, RecordId, RecordStorage};
use orbis_security::{Permission, Resource, RoleBasedSecurity, SecurityManager, User};
use orbis_storage::Level1Cache;
use tracing::trace;
use uuid::Uuid;

use crate::config::OrbisConfig;
use crate::methods::MethodRegistry;
use crate::Result;

/// What the session can do beyond plain documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionKind {
    /// Records only
    #[default]
    Document,
    /// Records plus vertex and edge semantics
    Graph,
}

/// A database session, owned by one request or connection.
#[derive(Clone)]
pub struct Session {
    id: Uuid,
    user: User,
    security: Arc<dyn SecurityManager>,
    storage: Arc<dyn RecordStorage>,
    cache: Arc<dyn RecordCache>,
    methods: Arc<MethodRegistry>,
    kind: SessionKind,
}

impl Session {
    /// Create a document session with an enabled first-level cache.
    pub fn new(
        user: User,
        security: Arc<dyn SecurityManager>,
        storage: Arc<dyn RecordStorage>,
    ) -> Self {
        Session {
            id: Uuid::new_v4(),
            user,
            security,
            storage,
            cache: Arc::new(Level1Cache::new()),
            methods: MethodRegistry::builtin(),
            kind: SessionKind::Document,
        }
    }

    /// Create a session whose security and cache follow `config`.
    pub fn from_config(user: User, config: &OrbisConfig, storage: Arc<dyn RecordStorage>) -> Self {
        let security = Arc::new(RoleBasedSecurity::with_default_roles(config.access_mode));
        let cache: Arc<dyn RecordCache> = if config.cache.level1_enabled {
            Arc::new(Level1Cache::new())
        } else {
            Arc::new(Level1Cache::disabled())
        };
        Session::new(user, security, storage).with_cache(cache)
    }

    /// Replace the first-level cache.
    pub fn with_cache(mut self, cache: Arc<dyn RecordCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Change the session kind.
    pub fn with_kind(mut self, kind: SessionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace the method registry used when parsing.
    pub fn with_methods(mut self, methods: Arc<MethodRegistry>) -> Self {
        self.methods = methods;
        self
    }

    /// Unique session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The user commands run as.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Storage engine.
    pub fn storage(&self) -> &Arc<dyn RecordStorage> {
        &self.storage
    }

    /// First-level cache.
    pub fn cache(&self) -> &Arc<dyn RecordCache> {
        &self.cache
    }

    /// Methods available to expressions.
    pub fn methods(&self) -> &MethodRegistry {
        &self.methods
    }

    /// Session kind.
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Check that the user holds `permission` on `resource`.
    pub fn check(&self, resource: &Resource, permission: Permission) -> Result<()> {
        self.security.check(&self.user, resource, permission)?;
        Ok(())
    }

    /// Read a record, going through the first-level cache.
    pub fn load(&self, rid: &RecordId) -> OrbisResult<Option<Record>> {
        if let Some(record) = self.cache.get(rid) {
            trace!(session = %self.id, %rid, "cache hit");
            return Ok(Some(record));
        }
        let record = self.storage.read(rid)?;
        if let Some(record) = &record {
            self.cache.put(record.clone())?;
        }
        Ok(record)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("user", &self.user.name())
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbis_core::Value;
    use orbis_security::AccessMode;
    use orbis_storage::MemoryStorage;

    fn session_with(user: User, mode: AccessMode) -> (Session, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let security = Arc::new(RoleBasedSecurity::with_default_roles(mode));
        (Session::new(user, security, storage.clone()), storage)
    }

    #[test]
    fn test_check_maps_denial() {
        let (session, _) = session_with(User::new("ro", &["reader"]), AccessMode::ReadWrite);
        assert!(session.check(&Resource::Command, Permission::Read).is_ok());
        let err = session
            .check(&Resource::Class("V".into()), Permission::Create)
            .unwrap_err();
        assert!(matches!(err, crate::Error::PermissionDenied { ref user, .. } if user == "ro"));
    }

    #[test]
    fn test_load_reads_through_cache() {
        let (session, storage) = session_with(User::new("admin", &["admin"]), AccessMode::ReadWrite);
        let cluster = storage.cluster_id("Product").unwrap();
        let rec = storage
            .create(cluster, Record::new("Product").with_field("name", "lamp"))
            .unwrap();

        assert!(session.cache().get(&rec.rid).is_none());
        let loaded = session.load(&rec.rid).unwrap().unwrap();
        assert_eq!(loaded.field("name"), Some(&Value::from("lamp")));
        assert!(session.cache().get(&rec.rid).is_some());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let (a, _) = session_with(User::new("admin", &["admin"]), AccessMode::ReadWrite);
        let (b, _) = session_with(User::new("admin", &["admin"]), AccessMode::ReadWrite);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.kind(), SessionKind::Document);
    }
}
