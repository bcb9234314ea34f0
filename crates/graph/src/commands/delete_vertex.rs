//! `DELETE VERTEX rid`

use orbis_executor::parser::{DeleteVertexStatement, Statement};
use orbis_executor::{
    CommandContext, CommandExecutor, CommandRequest, Error, Output, Parameters, Permission,
    Resource, Result, Session,
};
use tracing::info;

use super::{evaluate_rid, parse_verb};
use crate::session::graph_session;

/// The `DELETE VERTEX` verb.
#[derive(Debug, Default)]
pub struct DeleteVertex {
    statement: Option<DeleteVertexStatement>,
}

impl DeleteVertex {
    /// Registered verb name.
    pub const NAME: &'static str = "DELETE VERTEX";

    /// Registry constructor.
    pub fn create() -> std::result::Result<Box<dyn CommandExecutor>, String> {
        Ok(Box::new(DeleteVertex::default()))
    }
}

impl CommandExecutor for DeleteVertex {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&mut self, session: &Session, request: &CommandRequest) -> Result<()> {
        self.statement = None;
        self.statement = Some(parse_verb(session, request, Self::NAME, |s| match s {
            Statement::DeleteVertex(node) => Some(node),
            _ => None,
        })?);
        Ok(())
    }

    fn execute(&mut self, session: &Session, args: &Parameters) -> Result<Output> {
        let statement = self
            .statement
            .as_ref()
            .ok_or_else(|| Error::not_parsed(Self::NAME))?;
        let ctx = CommandContext::new(args.clone());
        let rid = evaluate_rid(&statement.rid, &ctx, Self::NAME)?;

        let vertex = session
            .load(&rid)
            .map_err(|e| Error::execution(Self::NAME, e))?;
        let Some(vertex) = vertex else {
            return Ok(Output::Count(0));
        };
        session.check(&Resource::Class(vertex.class().to_string()), Permission::Delete)?;

        let removed = graph_session(session)
            .remove_vertex(rid)
            .map_err(|e| Error::execution(Self::NAME, e))?;
        info!(session = %session.id(), %rid, "vertex deleted");
        Ok(Output::Count(u64::from(removed)))
    }

    fn syntax(&self) -> &'static str {
        "DELETE VERTEX <rid>"
    }
}
