//! Command requests and their bound parameters.
//!
//! A [`CommandRequest`] is the raw request text plus the values bound to its
//! `?` (positional) and `:name` (named) placeholders. The dispatch core never
//! interprets the text itself; it hands it to the parser and keeps the
//! parameters available for expression evaluation and for `execute`.

use std::collections::BTreeMap;
use std::fmt;

use orbis_core::Value;
use serde::{Deserialize, Serialize};

/// A reference to a bound parameter, as written in the request text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterRef {
    /// The n-th `?` placeholder, counting from zero
    Positional(usize),
    /// A `:name` placeholder
    Named(String),
}

impl fmt::Display for ParameterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterRef::Positional(i) => write!(f, "?{}", i),
            ParameterRef::Named(name) => write!(f, ":{}", name),
        }
    }
}

/// Values bound to a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
}

impl Parameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the next positional placeholder.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Bind a named placeholder.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.named.insert(name.into(), value.into());
    }

    /// Look up a bound value.
    pub fn get(&self, parameter: &ParameterRef) -> Option<&Value> {
        match parameter {
            ParameterRef::Positional(i) => self.positional.get(*i),
            ParameterRef::Named(name) => self.named.get(name),
        }
    }

    /// Number of bound values.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Check if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A textual request plus its bound arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    text: String,
    parameters: Parameters,
}

impl CommandRequest {
    /// Create a request with no bound parameters.
    pub fn new(text: impl Into<String>) -> Self {
        CommandRequest {
            text: text.into(),
            parameters: Parameters::new(),
        }
    }

    /// Bind the next positional parameter.
    pub fn with_parameter(mut self, value: impl Into<Value>) -> Self {
        self.parameters.push(value);
        self
    }

    /// Bind a named parameter.
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.bind(name, value);
        self
    }

    /// Raw request text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bound parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}
