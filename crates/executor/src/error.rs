//! Error types for command execution.
//!
//! All errors from command creation, parsing and execution are represented
//! by the [`Error`] enum. These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless**: storage faults are carried intact as the `cause` of an
//!   [`Error::ExecutionFailure`]

use orbis_core::OrbisError;
use orbis_security::{Permission, SecurityError};
use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Raised by |
/// |----------|----------|-----------|
/// | Request | `Syntax` | the parser, before any data is read |
/// | Security | `PermissionDenied` | the permission check that opens every `parse` |
/// | Lifecycle | `NotParsedYet` | `execute` on an instance that was never parsed |
/// | Execution | `ExecutionFailure` | any storage, cache or replication fault while executing |
/// | Registry | `UnknownCommand`, `CommandCreation`, `Registration` | command lookup and construction |
/// | Expression | `Parse` | a method converting text to a number |
/// | System | `Config` | loading `orbis.toml` |
///
/// # Example
///
/// ```ignore
/// match executor.execute(&session, &request) {
///     Ok(Output::Count(n)) => println!("{} records truncated", n),
///     Err(Error::PermissionDenied { resource, .. }) => println!("no access to {}", resource),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Request ====================
    /// Malformed request text
    #[error("syntax error{}: {reason}", .position.map(|p| format!(" at {}", p)).unwrap_or_default())]
    Syntax {
        /// What the parser expected
        reason: String,
        /// Byte offset into the request text, when known
        position: Option<usize>,
    },

    // ==================== Security ====================
    /// The session's user lacks a permission
    #[error("permission denied: user '{user}' lacks '{permission}' on '{resource}'")]
    PermissionDenied {
        /// User name
        user: String,
        /// Resource name
        resource: String,
        /// Requested permission
        permission: Permission,
    },

    // ==================== Lifecycle ====================
    /// `execute` called before a successful `parse`
    #[error("cannot execute {command}: the command has not been parsed yet")]
    NotParsedYet {
        /// Verb name
        command: String,
    },

    // ==================== Execution ====================
    /// A fault while executing; earlier effects are not rolled back
    #[error("error executing {command}: {cause}")]
    ExecutionFailure {
        /// Verb name
        command: String,
        /// Underlying fault
        #[source]
        cause: OrbisError,
    },

    // ==================== Registry ====================
    /// No command registered under this name
    #[error("unknown command: {name}")]
    UnknownCommand {
        /// Requested name
        name: String,
    },

    /// The registered constructor failed
    #[error("error creating command {name}: {reason}")]
    CommandCreation {
        /// Verb name
        name: String,
        /// Constructor message
        reason: String,
    },

    /// A name registered twice while building a registry
    #[error("duplicate registration: {name}")]
    Registration {
        /// Duplicated name
        name: String,
    },

    // ==================== Expression ====================
    /// Text could not be converted to a number
    #[error("cannot convert '{input}' to {target}")]
    Parse {
        /// The text that was parsed
        input: String,
        /// Target type name
        target: String,
    },

    // ==================== System ====================
    /// Configuration could not be read, parsed or written
    #[error("config error: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Build an [`Error::Syntax`] at a known position.
    pub fn syntax(reason: impl Into<String>, position: usize) -> Self {
        Error::Syntax {
            reason: reason.into(),
            position: Some(position),
        }
    }

    /// Wrap a storage-level fault raised while executing `command`.
    pub fn execution(command: impl Into<String>, cause: OrbisError) -> Self {
        Error::ExecutionFailure {
            command: command.into(),
            cause,
        }
    }

    /// Build an [`Error::NotParsedYet`].
    pub fn not_parsed(command: impl Into<String>) -> Self {
        Error::NotParsedYet {
            command: command.into(),
        }
    }
}

impl From<SecurityError> for Error {
    fn from(e: SecurityError) -> Self {
        match e {
            SecurityError::Denied {
                user,
                resource,
                permission,
            } => Error::PermissionDenied {
                user,
                resource,
                permission,
            },
        }
    }
}
