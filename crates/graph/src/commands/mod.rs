//! The four graph verbs.
//!
//! | Verb | Output | Write permission |
//! |------|--------|------------------|
//! | `CREATE VERTEX` | `Record` | create on the vertex class |
//! | `CREATE EDGE` | `Record` | create on the edge class |
//! | `DELETE EDGE` | `Count` | delete on each edge's class |
//! | `DELETE VERTEX` | `Count` | delete on the vertex class |
//!
//! Every verb checks command read access before parsing, like the core
//! verbs do.

mod create_edge;
mod create_vertex;
mod delete_edge;
mod delete_vertex;

pub use create_edge::CreateEdge;
pub use create_vertex::CreateVertex;
pub use delete_edge::DeleteEdge;
pub use delete_vertex::DeleteVertex;

use orbis_core::{RecordId, Value};
use orbis_executor::parser::{parse_statement, Assignment, Statement};
use orbis_executor::{
    CommandContext, CommandRequest, Error, Expression, Permission, Resource, Result, Session,
};

/// Check command access, then parse `request` and pick out one statement kind.
fn parse_verb<T>(
    session: &Session,
    request: &CommandRequest,
    verb: &'static str,
    pick: impl FnOnce(Statement) -> Option<T>,
) -> Result<T> {
    session.check(&Resource::Command, Permission::Read)?;
    let statement = parse_statement(request.text(), session.methods())?;
    let found = statement.verb();
    pick(statement).ok_or_else(|| Error::syntax(format!("expected {}, found {}", verb, found), 0))
}

/// Evaluate an endpoint expression to a record id.
fn evaluate_rid(expr: &Expression, ctx: &CommandContext, verb: &'static str) -> Result<RecordId> {
    match expr.evaluate(ctx, None)? {
        Value::Link(rid) => Ok(rid),
        Value::String(text) => text.parse().map_err(|e| Error::execution(verb, e)),
        other => Err(Error::Syntax {
            reason: format!("expected a record id, found {} '{}'", other.type_name(), other),
            position: None,
        }),
    }
}

/// Evaluate a `SET` clause with no current row.
fn evaluate_fields(assignments: &[Assignment], ctx: &CommandContext) -> Result<Vec<(String, Value)>> {
    assignments
        .iter()
        .map(|(field, expr)| Ok((field.clone(), expr.evaluate(ctx, None)?)))
        .collect()
}
