//! Parsed statements, one per registered verb.

use crate::expression::Expression;

/// A parsed request.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `TRUNCATE RECORD ...`
    TruncateRecord(TruncateRecordStatement),
    /// `CREATE VERTEX ...`
    CreateVertex(CreateVertexStatement),
    /// `CREATE EDGE ...`
    CreateEdge(CreateEdgeStatement),
    /// `DELETE EDGE ...`
    DeleteEdge(DeleteEdgeStatement),
    /// `DELETE VERTEX ...`
    DeleteVertex(DeleteVertexStatement),
}

impl Statement {
    /// The verb this statement was parsed from.
    pub fn verb(&self) -> &'static str {
        match self {
            Statement::TruncateRecord(_) => "TRUNCATE RECORD",
            Statement::CreateVertex(_) => "CREATE VERTEX",
            Statement::CreateEdge(_) => "CREATE EDGE",
            Statement::DeleteEdge(_) => "DELETE EDGE",
            Statement::DeleteVertex(_) => "DELETE VERTEX",
        }
    }
}

/// `TRUNCATE RECORD item (, item)*`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TruncateRecordStatement {
    pub(crate) rid: Option<String>,
    pub(crate) collection: Option<Expression>,
}

impl TruncateRecordStatement {
    /// The bare identifier literal that opened the target list, as written.
    pub fn rid(&self) -> Option<&str> {
        self.rid.as_deref()
    }

    /// Expression producing the remaining identifiers.
    pub fn collection(&self) -> Option<&Expression> {
        self.collection.as_ref()
    }
}

/// A `field = expr` pair from a `SET` clause.
pub type Assignment = (String, Expression);

/// `CREATE VERTEX [class] [SET ...]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateVertexStatement {
    /// Vertex class, `V` when absent
    pub class: Option<String>,
    /// `SET` clause
    pub assignments: Vec<Assignment>,
}

/// `CREATE EDGE [class] FROM expr TO expr [SET ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEdgeStatement {
    /// Edge class, `E` when absent
    pub class: Option<String>,
    /// Outgoing vertex
    pub from: Expression,
    /// Incoming vertex
    pub to: Expression,
    /// `SET` clause
    pub assignments: Vec<Assignment>,
}

/// `DELETE EDGE expr` or `DELETE EDGE FROM expr [TO expr]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteEdgeStatement {
    /// The edge itself
    pub rid: Option<Expression>,
    /// Outgoing vertex filter
    pub from: Option<Expression>,
    /// Incoming vertex filter
    pub to: Option<Expression>,
}

/// `DELETE VERTEX expr`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteVertexStatement {
    /// The vertex
    pub rid: Expression,
}
