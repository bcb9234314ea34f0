//! Records
//!
//! A [`Record`] is what storage hands back on a successful read: its
//! location, its version counter, an optional class name and its fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rid::RecordId;
use crate::value::Value;

/// A stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Location; [`RecordId::unassigned`] until storage places it
    pub rid: RecordId,
    /// Version counter, bumped by every update
    pub version: u64,
    /// Declared class
    pub class_name: Option<String>,
    /// Field values, ordered by name
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an unplaced record of the given class
    pub fn new(class_name: impl Into<String>) -> Self {
        Record {
            rid: RecordId::unassigned(),
            version: 0,
            class_name: Some(class_name.into()),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Read a field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field, returning the previous value
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Remove a field, returning its value
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Class name, or `""` when the record has none
    pub fn class(&self) -> &str {
        self.class_name.as_deref().unwrap_or("")
    }
}
