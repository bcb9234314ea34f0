//! Expression trees evaluated per row.
//!
//! An [`Expression`] is what the parser produces for every value position in
//! a request: a literal, a placeholder, a field of the current row, a
//! collection, or a method applied to another expression. Evaluation is
//! depth-first: a method evaluates its source before applying itself, so a
//! chain such as `price.asFloat().asInteger()` runs left to right.

use std::fmt;

use orbis_core::{Record, Value};

use crate::context::CommandContext;
use crate::methods::MethodNode;
use crate::request::ParameterRef;
use crate::{Error, Result};

/// Field name resolving to the row's own identifier.
pub const FIELD_RID: &str = "@rid";
/// Field name resolving to the row's class.
pub const FIELD_CLASS: &str = "@class";
/// Field name resolving to the row's version counter.
pub const FIELD_VERSION: &str = "@version";

/// A parsed value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A constant
    Literal(Value),
    /// A `?` or `:name` placeholder
    Parameter(ParameterRef),
    /// A `$name` context variable
    Variable(String),
    /// A field of the current row
    Field(String),
    /// `[expr, ...]`
    Collection(Vec<Expression>),
    /// `source.method(args)`
    Method(Box<MethodNode>),
}

impl Expression {
    /// Evaluate against an optional row.
    ///
    /// With no row, fields evaluate to null; constant expressions are
    /// unaffected.
    ///
    /// # Errors
    ///
    /// Fails on an unbound parameter or when a method fails.
    pub fn evaluate(&self, ctx: &CommandContext, row: Option<&Record>) -> Result<Value> {
        match self {
            Expression::Literal(v) => Ok(v.clone()),
            Expression::Parameter(p) => ctx.parameter(p).cloned().ok_or_else(|| Error::Syntax {
                reason: format!("missing parameter {}", p),
                position: None,
            }),
            Expression::Variable(name) => Ok(ctx.variable(name).cloned().unwrap_or(Value::Null)),
            Expression::Field(name) => Ok(row.map(|r| field_of(r, name)).unwrap_or(Value::Null)),
            Expression::Collection(items) => items
                .iter()
                .map(|e| e.evaluate(ctx, row))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            Expression::Method(m) => m.evaluate_now(ctx, row),
        }
    }

    /// True if the expression never reads the current row.
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) | Expression::Parameter(_) | Expression::Variable(_) => true,
            Expression::Field(_) => false,
            Expression::Collection(items) => items.iter().all(Expression::is_constant),
            Expression::Method(m) => m.source().is_constant(),
        }
    }
}

fn field_of(row: &Record, name: &str) -> Value {
    match name {
        FIELD_RID => Value::Link(row.rid),
        FIELD_CLASS => row
            .class_name
            .as_ref()
            .map(|c| Value::String(c.clone()))
            .unwrap_or(Value::Null),
        FIELD_VERSION => Value::Long(row.version as i64),
        _ => row.field(name).cloned().unwrap_or(Value::Null),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(Value::String(s)) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Expression::Literal(v) => write!(f, "{}", v),
            Expression::Parameter(ParameterRef::Positional(_)) => write!(f, "?"),
            Expression::Parameter(p) => write!(f, "{}", p),
            Expression::Variable(name) => write!(f, "${}", name),
            Expression::Field(name) => write!(f, "{}", name),
            Expression::Collection(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Expression::Method(m) => write!(f, "{}", m),
        }
    }
}
