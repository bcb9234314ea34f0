//! `CREATE VERTEX [class] [SET field = expr, ...]`

use orbis_executor::parser::{CreateVertexStatement, Statement};
use orbis_executor::{
    CommandContext, CommandExecutor, CommandRequest, Error, Output, Parameters, Permission,
    Resource, Result, Session,
};
use tracing::info;

use super::{evaluate_fields, parse_verb};
use crate::session::{graph_session, VERTEX_CLASS};

/// The `CREATE VERTEX` verb.
#[derive(Debug, Default)]
pub struct CreateVertex {
    statement: Option<CreateVertexStatement>,
}

impl CreateVertex {
    /// Registered verb name.
    pub const NAME: &'static str = "CREATE VERTEX";

    /// Registry constructor.
    pub fn create() -> std::result::Result<Box<dyn CommandExecutor>, String> {
        Ok(Box::new(CreateVertex::default()))
    }
}

impl CommandExecutor for CreateVertex {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&mut self, session: &Session, request: &CommandRequest) -> Result<()> {
        self.statement = None;
        self.statement = Some(parse_verb(session, request, Self::NAME, |s| match s {
            Statement::CreateVertex(node) => Some(node),
            _ => None,
        })?);
        Ok(())
    }

    fn execute(&mut self, session: &Session, args: &Parameters) -> Result<Output> {
        let statement = self
            .statement
            .as_ref()
            .ok_or_else(|| Error::not_parsed(Self::NAME))?;
        let class = statement.class.as_deref().unwrap_or(VERTEX_CLASS);
        session.check(&Resource::Class(class.to_string()), Permission::Create)?;

        let ctx = CommandContext::new(args.clone());
        let fields = evaluate_fields(&statement.assignments, &ctx)?;
        let vertex = graph_session(session)
            .create_vertex(Some(class), fields)
            .map_err(|e| Error::execution(Self::NAME, e))?;
        info!(session = %session.id(), rid = %vertex.rid, class, "vertex created");
        Ok(Output::Record(vertex))
    }

    fn syntax(&self) -> &'static str {
        "CREATE VERTEX [<class>] [SET <field> = <expression>[,]*]"
    }
}
