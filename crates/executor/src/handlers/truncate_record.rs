//! `TRUNCATE RECORD`: remove raw storage entries by identifier.
//!
//! The command never loads or decodes the targets, so it can remove entries
//! that are too damaged to read. Each identifier is deleted with an untracked
//! version, which skips the optimistic concurrency check, and then evicted
//! from the session's first-level cache.
//!
//! The delete loop stops at the first failure. Identifiers handled before it
//! stay deleted.

use std::collections::BTreeSet;

use orbis_core::{DeleteMode, RecordId, RecordVersion, Value};
use orbis_security::{Permission, Resource};
use tracing::{debug, info};

use crate::command::{CommandExecutor, ReplicationMode};
use crate::context::CommandContext;
use crate::output::Output;
use crate::parser::parse_truncate_record;
use crate::request::{CommandRequest, Parameters};
use crate::session::Session;
use crate::{Error, Result};

/// The `TRUNCATE RECORD` verb.
#[derive(Debug, Default)]
pub struct TruncateRecord {
    records: BTreeSet<String>,
}

impl TruncateRecord {
    /// Registered verb name.
    pub const NAME: &'static str = "TRUNCATE RECORD";

    /// Registry constructor.
    pub fn create() -> std::result::Result<Box<dyn CommandExecutor>, String> {
        Ok(Box::new(TruncateRecord::default()))
    }

    /// Target identifiers in the order they will be deleted.
    pub fn records(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(String::as_str)
    }

    fn add(&mut self, value: Value) -> Result<()> {
        match value {
            Value::List(items) => items.into_iter().try_for_each(|item| self.add(item)),
            other => self.add_one(other),
        }
    }

    fn add_one(&mut self, value: Value) -> Result<()> {
        match value {
            Value::Null => {}
            Value::Link(rid) => {
                self.records.insert(rid.to_string());
            }
            Value::String(text) => {
                // Unparsable text is kept as written and rejected at execute.
                let text = match text.parse::<RecordId>() {
                    Ok(rid) => rid.to_string(),
                    Err(_) => text.trim().to_string(),
                };
                self.records.insert(text);
            }
            other => {
                return Err(Error::Syntax {
                    reason: format!("expected a record id, found {} '{}'", other.type_name(), other),
                    position: None,
                })
            }
        }
        Ok(())
    }
}

impl CommandExecutor for TruncateRecord {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&mut self, session: &Session, request: &CommandRequest) -> Result<()> {
        session.check(&Resource::Command, Permission::Read)?;

        self.records.clear();
        let node = parse_truncate_record(request.text(), session.methods())?;

        if let Some(rid) = node.rid() {
            self.records.insert(rid.to_string());
        }
        if let Some(collection) = node.collection() {
            let ctx = CommandContext::new(request.parameters().clone());
            let value = collection.evaluate(&ctx, None)?;
            if let Err(e) = self.add(value) {
                self.records.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    fn execute(&mut self, session: &Session, _args: &Parameters) -> Result<Output> {
        if self.records.is_empty() {
            return Err(Error::not_parsed(Self::NAME));
        }

        for text in &self.records {
            let rid: RecordId = text.parse().map_err(|e| Error::execution(Self::NAME, e))?;
            let removed = session
                .storage()
                .delete(&rid, RecordVersion::Untracked, DeleteMode::Synchronous, None)
                .map_err(|e| Error::execution(Self::NAME, e))?;
            session
                .cache()
                .evict(&rid)
                .map_err(|e| Error::execution(Self::NAME, e))?;
            debug!(session = %session.id(), %rid, removed, "truncated record");
        }

        info!(
            session = %session.id(),
            user = session.user().name(),
            count = self.records.len(),
            "truncate record finished"
        );
        Ok(Output::Count(self.records.len() as u64))
    }

    fn syntax(&self) -> &'static str {
        "TRUNCATE RECORD <rid>*"
    }

    fn replication(&self) -> ReplicationMode {
        ReplicationMode::Verbatim
    }
}
