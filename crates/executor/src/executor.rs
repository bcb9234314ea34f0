//! The Executor - single entry point for textual commands.
//!
//! The Executor resolves the verb of a request against its registry, creates
//! a fresh command instance, and drives it through parse and execute. It
//! keeps no per-request state; everything request-scoped lives in the
//! [`Session`] passed in.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::command::ReplicationMode;
use crate::config::OrbisConfig;
use crate::output::Output;
use crate::registry::{core_registry, CommandRegistry};
use crate::replication::Replicator;
use crate::request::CommandRequest;
use crate::session::Session;
use crate::{Error, Result};

/// The command executor.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads; each request
/// brings its own [`Session`].
///
/// # Example
///
/// ```ignore
/// use orbis_executor::{CommandRequest, Executor};
///
/// let executor = Executor::new(core_registry());
///
/// let out = executor.execute(&session, &CommandRequest::new("TRUNCATE RECORD #12:0, #12:1"))?;
/// assert_eq!(out.as_count(), Some(2));
///
/// let results = executor.execute_many(&session, vec![
///     CommandRequest::new("TRUNCATE RECORD #12:2"),
///     CommandRequest::new("TRUNCATE RECORD #12:3"),
/// ]);
/// ```
pub struct Executor {
    registry: Arc<dyn CommandRegistry>,
    replicator: Option<Arc<dyn Replicator>>,
    config: OrbisConfig,
}

impl Executor {
    /// Create an executor over `registry` with default config.
    pub fn new(registry: Arc<dyn CommandRegistry>) -> Self {
        Executor {
            registry,
            replicator: None,
            config: OrbisConfig::default(),
        }
    }

    /// Attach a replicator for verbatim commands.
    pub fn with_replicator(mut self, replicator: Arc<dyn Replicator>) -> Self {
        self.replicator = Some(replicator);
        self
    }

    /// Replace the config.
    pub fn with_config(mut self, config: OrbisConfig) -> Self {
        self.config = config;
        self
    }

    /// Registry in use.
    pub fn registry(&self) -> &Arc<dyn CommandRegistry> {
        &self.registry
    }

    /// Config in use.
    pub fn config(&self) -> &OrbisConfig {
        &self.config
    }

    /// Find the registered verb that opens `text`.
    ///
    /// The text is upper-cased and its whitespace collapsed; the longest
    /// registered name followed by a space or the end of the text wins.
    pub fn resolve_verb(&self, text: &str) -> Result<&'static str> {
        let normalized = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        self.registry
            .names()
            .into_iter()
            .filter(|name| {
                normalized
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
            })
            .max_by_key(|name| name.len())
            .ok_or_else(|| Error::UnknownCommand {
                name: normalized.split(' ').take(2).collect::<Vec<_>>().join(" "),
            })
    }

    /// Execute a single request.
    ///
    /// Returns the command result or an error. Verbatim commands are handed
    /// to the replicator only after they succeed locally.
    pub fn execute(&self, session: &Session, request: &CommandRequest) -> Result<Output> {
        let verb = self.resolve_verb(request.text())?;
        let mut instance = self.registry.create(verb)?;
        debug!(session = %session.id(), command = verb, "parsing command");
        instance.parse(session, request)?;

        let mode = instance.replication();
        let output = instance.execute(session, request.parameters())?;

        if mode == ReplicationMode::Verbatim && self.config.replication.enabled {
            match &self.replicator {
                Some(replicator) => {
                    debug!(command = verb, "replicating verbatim");
                    replicator
                        .replicate(request)
                        .map_err(|e| Error::execution(verb, e))?;
                }
                None => warn!(command = verb, "replication enabled but no replicator attached"),
            }
        }
        Ok(output)
    }

    /// Execute several requests in order.
    ///
    /// Each request runs independently; a failure does not stop later ones.
    pub fn execute_many(&self, session: &Session, requests: Vec<CommandRequest>) -> Vec<Result<Output>> {
        requests
            .iter()
            .map(|request| self.execute(session, request))
            .collect()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Executor::new(core_registry())
    }
}
