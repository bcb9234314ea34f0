//! Evaluation context shared by the expressions of one command.

use std::collections::BTreeMap;

use orbis_core::Value;

use crate::request::{ParameterRef, Parameters};

/// Parameters and variables visible to expression evaluation.
///
/// A context is built per command invocation and read by every expression
/// evaluated for it, row after row.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    parameters: Parameters,
    variables: BTreeMap<String, Value>,
}

impl CommandContext {
    /// Context exposing the given request parameters.
    pub fn new(parameters: Parameters) -> Self {
        CommandContext {
            parameters,
            variables: BTreeMap::new(),
        }
    }

    /// Set a `$variable`.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Look up a bound parameter.
    pub fn parameter(&self, parameter: &ParameterRef) -> Option<&Value> {
        self.parameters.get(parameter)
    }

    /// Look up a variable.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}
