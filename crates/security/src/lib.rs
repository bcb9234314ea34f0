//! Access control for OrbisDB.
//!
//! This crate provides the [`SecurityManager`] interface consulted by every
//! command before it touches data, together with a role-based
//! implementation and the [`AccessMode`] switch that turns a whole database
//! read-only.
//!
//! Resources are named hierarchically (`database.command`,
//! `database.class.Person`, ...). A [`Role`] grants a bit mask of
//! [`Permission`]s per resource name, with `*` rules covering every resource
//! of a kind and a role-wide default for everything else.

#![warn(missing_docs)]

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Controls whether the database allows writes or is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Allow both reads and writes (default).
    #[default]
    ReadWrite,
    /// Read-only mode: every create, update or delete permission is denied.
    ReadOnly,
}

/// An operation a user may be granted on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Create new entries
    Create,
    /// Read or execute
    Read,
    /// Modify entries
    Update,
    /// Remove entries
    Delete,
}

impl Permission {
    /// Bit used for this permission in a role's rule mask.
    pub const fn bit(self) -> u8 {
        match self {
            Permission::Create => 0b0001,
            Permission::Read => 0b0010,
            Permission::Update => 0b0100,
            Permission::Delete => 0b1000,
        }
    }

    /// Mask granting every permission.
    pub const ALL: u8 = 0b1111;

    /// True for create, update and delete.
    pub const fn is_write(self) -> bool {
        !matches!(self, Permission::Read)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Permission::Create => "create",
            Permission::Read => "read",
            Permission::Update => "update",
            Permission::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// A protected resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// The database as a whole
    Database,
    /// Command execution (`database.command`)
    Command,
    /// A named cluster
    Cluster(String),
    /// A named class
    Class(String),
}

impl Resource {
    /// Rule key covering every resource of the same kind, if the kind has one.
    pub fn generic(&self) -> Option<&'static str> {
        match self {
            Resource::Cluster(_) => Some("database.cluster.*"),
            Resource::Class(_) => Some("database.class.*"),
            Resource::Database | Resource::Command => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Database => write!(f, "database"),
            Resource::Command => write!(f, "database.command"),
            Resource::Cluster(name) => write!(f, "database.cluster.{}", name),
            Resource::Class(name) => write!(f, "database.class.{}", name),
        }
    }
}

/// What a role grants for resources it has no rule for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleMode {
    /// Everything not explicitly ruled is granted
    AllowAll,
    /// Everything not explicitly ruled is denied
    DenyAll,
}

/// A named set of permission rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    name: String,
    mode: RoleMode,
    rules: HashMap<String, u8>,
}

impl Role {
    /// Create a role with no rules.
    pub fn new(name: impl Into<String>, mode: RoleMode) -> Self {
        Role {
            name: name.into(),
            mode,
            rules: HashMap::new(),
        }
    }

    /// Grant permissions on a resource key (exact name or a `*` rule).
    pub fn grant(mut self, resource: impl Into<String>, permissions: &[Permission]) -> Self {
        let mask = permissions.iter().fold(0u8, |m, p| m | p.bit());
        *self.rules.entry(resource.into()).or_insert(0) |= mask;
        self
    }

    /// Role name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decide a permission: exact rule, then the kind's `*` rule, then the
    /// role mode.
    pub fn allows(&self, resource: &Resource, permission: Permission) -> bool {
        let key = resource.to_string();
        let mask = self
            .rules
            .get(&key)
            .or_else(|| resource.generic().and_then(|g| self.rules.get(g)));

        match mask {
            Some(mask) => mask & permission.bit() != 0,
            None => self.mode == RoleMode::AllowAll,
        }
    }
}

/// An authenticated database user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    name: String,
    roles: Vec<String>,
    active: bool,
}

impl User {
    /// Create an active user holding the given roles.
    pub fn new(name: impl Into<String>, roles: &[&str]) -> Self {
        User {
            name: name.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            active: true,
        }
    }

    /// Same user, suspended or reactivated.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// User name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role names.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Whether the user may act at all.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Security check failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SecurityError {
    /// The user lacks the permission on the resource
    #[error("user '{user}' does not have permission '{permission}' on resource '{resource}'")]
    Denied {
        /// User name
        user: String,
        /// Resource name
        resource: String,
        /// Requested permission
        permission: Permission,
    },
}

impl SecurityError {
    fn denied(user: &User, resource: &Resource, permission: Permission) -> Self {
        SecurityError::Denied {
            user: user.name().to_string(),
            resource: resource.to_string(),
            permission,
        }
    }
}

/// The permission subsystem as seen by commands.
///
/// Implementations must be thread-safe: one manager serves every session.
pub trait SecurityManager: Send + Sync {
    /// Succeed if `user` holds `permission` on `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`SecurityError::Denied`] otherwise.
    fn check(
        &self,
        user: &User,
        resource: &Resource,
        permission: Permission,
    ) -> Result<(), SecurityError>;
}

/// Role-based security manager.
///
/// A permission is granted when the user is active, the access mode admits
/// it, and at least one of the user's known roles allows it.
#[derive(Debug, Clone, Default)]
pub struct RoleBasedSecurity {
    access_mode: AccessMode,
    roles: HashMap<String, Role>,
}

impl RoleBasedSecurity {
    /// Create a manager with no roles.
    pub fn new(access_mode: AccessMode) -> Self {
        RoleBasedSecurity {
            access_mode,
            roles: HashMap::new(),
        }
    }

    /// Create a manager with the built-in `admin`, `writer` and `reader` roles.
    pub fn with_default_roles(access_mode: AccessMode) -> Self {
        let reader = Role::new("reader", RoleMode::DenyAll)
            .grant("database", &[Permission::Read])
            .grant("database.command", &[Permission::Read])
            .grant("database.cluster.*", &[Permission::Read])
            .grant("database.class.*", &[Permission::Read]);

        let all = [
            Permission::Create,
            Permission::Read,
            Permission::Update,
            Permission::Delete,
        ];
        let writer = Role::new("writer", RoleMode::DenyAll)
            .grant("database", &[Permission::Read])
            .grant("database.command", &[Permission::Read])
            .grant("database.cluster.*", &all)
            .grant("database.class.*", &all);

        Self::new(access_mode)
            .with_role(Role::new("admin", RoleMode::AllowAll))
            .with_role(writer)
            .with_role(reader)
    }

    /// Register (or replace) a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role.name().to_string(), role);
        self
    }

    /// Current access mode.
    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }
}

impl SecurityManager for RoleBasedSecurity {
    fn check(
        &self,
        user: &User,
        resource: &Resource,
        permission: Permission,
    ) -> Result<(), SecurityError> {
        if !user.is_active() {
            debug!(user = user.name(), %resource, %permission, "denied: user inactive");
            return Err(SecurityError::denied(user, resource, permission));
        }

        if self.access_mode == AccessMode::ReadOnly && permission.is_write() {
            debug!(user = user.name(), %resource, %permission, "denied: read-only database");
            return Err(SecurityError::denied(user, resource, permission));
        }

        let granted = user
            .roles()
            .iter()
            .filter_map(|r| self.roles.get(r))
            .any(|role| role.allows(resource, permission));

        if granted {
            Ok(())
        } else {
            debug!(user = user.name(), %resource, %permission, "denied: no role grants it");
            Err(SecurityError::denied(user, resource, permission))
        }
    }
}
