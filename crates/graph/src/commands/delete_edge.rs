//! `DELETE EDGE rid` or `DELETE EDGE FROM rid [TO rid]`

use orbis_executor::parser::{DeleteEdgeStatement, Statement};
use orbis_executor::{
    CommandContext, CommandExecutor, CommandRequest, Error, OrbisError, Output, Parameters,
    Permission, Resource, Result, Session,
};
use tracing::info;

use super::{evaluate_rid, parse_verb};
use crate::session::graph_session;

/// The `DELETE EDGE` verb.
#[derive(Debug, Default)]
pub struct DeleteEdge {
    statement: Option<DeleteEdgeStatement>,
}

impl DeleteEdge {
    /// Registered verb name.
    pub const NAME: &'static str = "DELETE EDGE";

    /// Registry constructor.
    pub fn create() -> std::result::Result<Box<dyn CommandExecutor>, String> {
        Ok(Box::new(DeleteEdge::default()))
    }
}

impl CommandExecutor for DeleteEdge {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&mut self, session: &Session, request: &CommandRequest) -> Result<()> {
        self.statement = None;
        self.statement = Some(parse_verb(session, request, Self::NAME, |s| match s {
            Statement::DeleteEdge(node) => Some(node),
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
        let graph = graph_session(session);
        let failed = |e: OrbisError| Error::execution(Self::NAME, e);

        let targets = match (&statement.rid, &statement.from) {
            (Some(rid), _) => vec![evaluate_rid(rid, &ctx, Self::NAME)?],
            (None, Some(from)) => {
                let from = evaluate_rid(from, &ctx, Self::NAME)?;
                let to = statement
                    .to
                    .as_ref()
                    .map(|to| evaluate_rid(to, &ctx, Self::NAME))
                    .transpose()?;
                graph.edges_between(from, to).map_err(failed)?
            }
            (None, None) => return Err(Error::syntax("DELETE EDGE needs a target", 0)),
        };

        let mut removed = 0u64;
        for rid in targets {
            let Some(edge) = session.load(&rid).map_err(failed)? else {
                continue;
            };
            session.check(&Resource::Class(edge.class().to_string()), Permission::Delete)?;
            if graph.remove_edge(rid).map_err(failed)? {
                removed += 1;
            }
        }
        info!(session = %session.id(), removed, "edges deleted");
        Ok(Output::Count(removed))
    }

    fn syntax(&self) -> &'static str {
        "DELETE EDGE <rid> | DELETE EDGE FROM <rid> [TO <rid>]"
    }
}
