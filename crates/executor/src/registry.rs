//! Command registries: verb name to constructor.
//!
//! A registry is built once from a fixed table and is read-only afterwards,
//! so lookups need no locking. Each command family ships its own registry;
//! [`CompositeRegistry`] stitches families together and refuses to start if
//! two of them claim the same verb.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::command::{CommandExecutor, CommandInstance};
use crate::handlers::TruncateRecord;
use crate::{Error, Result};

/// Builds a fresh, unparsed command.
pub type CommandConstructor = fn() -> std::result::Result<Box<dyn CommandExecutor>, String>;

/// Lookup of commands by exact verb name.
pub trait CommandRegistry: Send + Sync {
    /// All registered verb names.
    fn names(&self) -> BTreeSet<&'static str>;

    /// Create an unparsed instance of `name`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCommand`] if the name is not registered,
    /// [`Error::CommandCreation`] if its constructor fails.
    fn create(&self, name: &str) -> Result<CommandInstance>;

    /// Whether `name` is registered.
    fn contains(&self, name: &str) -> bool {
        self.names().contains(name)
    }
}

/// A registry over a fixed `(name, constructor)` table.
pub struct StaticCommandRegistry {
    entries: BTreeMap<&'static str, CommandConstructor>,
}

impl StaticCommandRegistry {
    /// Build from a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Registration`] if a name appears twice.
    pub fn from_table(table: &[(&'static str, CommandConstructor)]) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (name, constructor) in table {
            if entries.insert(*name, *constructor).is_some() {
                return Err(Error::Registration {
                    name: name.to_string(),
                });
            }
        }
        Ok(StaticCommandRegistry { entries })
    }

    /// Build from a table known to be free of duplicates.
    ///
    /// Later entries win if the table does repeat a name.
    pub fn from_static(table: &[(&'static str, CommandConstructor)]) -> Self {
        debug_assert!(
            Self::from_table(table).is_ok(),
            "duplicate verb in static command table"
        );
        StaticCommandRegistry {
            entries: table.iter().copied().collect(),
        }
    }
}

impl CommandRegistry for StaticCommandRegistry {
    fn names(&self) -> BTreeSet<&'static str> {
        self.entries.keys().copied().collect()
    }

    fn create(&self, name: &str) -> Result<CommandInstance> {
        let constructor = self.entries.get(name).ok_or_else(|| Error::UnknownCommand {
            name: name.to_string(),
        })?;
        let command = constructor().map_err(|reason| Error::CommandCreation {
            name: name.to_string(),
            reason,
        })?;
        debug!(command = name, "created command");
        Ok(CommandInstance::new(command))
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl fmt::Debug for StaticCommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

static CORE: Lazy<Arc<StaticCommandRegistry>> = Lazy::new(|| {
    Arc::new(StaticCommandRegistry::from_static(&[(
        TruncateRecord::NAME,
        TruncateRecord::create as CommandConstructor,
    )]))
});

/// The process-wide registry of core maintenance verbs.
pub fn core_registry() -> Arc<StaticCommandRegistry> {
    Arc::clone(&CORE)
}

/// Several registries searched in order.
pub struct CompositeRegistry {
    members: Vec<Arc<dyn CommandRegistry>>,
}

impl CompositeRegistry {
    /// Combine `members`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Registration`] if two members register the same name.
    pub fn new(members: Vec<Arc<dyn CommandRegistry>>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for member in &members {
            for name in member.names() {
                if !seen.insert(name) {
                    return Err(Error::Registration {
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(CompositeRegistry { members })
    }
}

impl CommandRegistry for CompositeRegistry {
    fn names(&self) -> BTreeSet<&'static str> {
        self.members.iter().flat_map(|m| m.names()).collect()
    }

    fn create(&self, name: &str) -> Result<CommandInstance> {
        self.members
            .iter()
            .find(|m| m.contains(name))
            .ok_or_else(|| Error::UnknownCommand {
                name: name.to_string(),
            })?
            .create(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.contains(name))
    }
}

impl fmt::Debug for CompositeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
