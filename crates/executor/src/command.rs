//! The command object contract and its lifecycle wrapper.
//!
//! Every verb is a [`CommandExecutor`]: it parses its own request text into
//! private state, then executes that state. The two steps are separated so
//! the caller can inspect or replicate a parsed command before running it.
//!
//! [`CommandInstance`] owns one boxed executor and enforces the lifecycle
//! generically:
//!
//! ```text
//! Unparsed --parse ok--> Parsed --execute--> (consumed)
//!    |  ^
//!    +--+ parse error
//! ```
//!
//! `execute` takes the instance by value, so an executed instance cannot be
//! executed again.

use std::fmt;

use crate::output::Output;
use crate::request::{CommandRequest, Parameters};
use crate::session::Session;
use crate::{Error, Result};

/// How a command's effect reaches other nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplicationMode {
    /// The effect stays on this node
    #[default]
    Local,
    /// The request is broadcast as-is and re-executed by each peer
    Verbatim,
}

/// One verb's parse and execute steps.
///
/// Implementations must check permissions at the start of `parse`, before
/// reading any data, and must leave no partial state behind when `parse`
/// fails.
pub trait CommandExecutor: Send + fmt::Debug {
    /// Registered verb name, e.g. `TRUNCATE RECORD`.
    fn name(&self) -> &'static str;

    /// Parse `request` into this command's state.
    fn parse(&mut self, session: &Session, request: &CommandRequest) -> Result<()>;

    /// Run the parsed command.
    fn execute(&mut self, session: &Session, args: &Parameters) -> Result<Output>;

    /// Human-readable syntax summary.
    fn syntax(&self) -> &'static str;

    /// Replication behavior; local unless overridden.
    fn replication(&self) -> ReplicationMode {
        ReplicationMode::Local
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unparsed,
    Parsed,
}

/// A created command, owned by the request that created it.
#[derive(Debug)]
pub struct CommandInstance {
    command: Box<dyn CommandExecutor>,
    state: State,
}

impl CommandInstance {
    /// Wrap a freshly constructed command.
    pub fn new(command: Box<dyn CommandExecutor>) -> Self {
        CommandInstance {
            command,
            state: State::Unparsed,
        }
    }

    /// Verb name.
    pub fn name(&self) -> &'static str {
        self.command.name()
    }

    /// Syntax summary.
    pub fn syntax(&self) -> &'static str {
        self.command.syntax()
    }

    /// Replication behavior.
    pub fn replication(&self) -> ReplicationMode {
        self.command.replication()
    }

    /// Whether `parse` has succeeded.
    pub fn is_parsed(&self) -> bool {
        self.state == State::Parsed
    }

    /// Parse the request. A failure leaves the instance unparsed.
    pub fn parse(&mut self, session: &Session, request: &CommandRequest) -> Result<&mut Self> {
        self.state = State::Unparsed;
        self.command.parse(session, request)?;
        self.state = State::Parsed;
        Ok(self)
    }

    /// Execute once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotParsedYet`] if `parse` never succeeded, otherwise
    /// whatever the command reports.
    pub fn execute(mut self, session: &Session, args: &Parameters) -> Result<Output> {
        if self.state != State::Parsed {
            return Err(Error::not_parsed(self.command.name()));
        }
        self.command.execute(session, args)
    }
}
