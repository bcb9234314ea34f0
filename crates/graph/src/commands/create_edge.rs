//! `CREATE EDGE [class] FROM rid TO rid [SET field = expr, ...]`

use orbis_executor::parser::{CreateEdgeStatement, Statement};
use orbis_executor::{
    CommandContext, CommandExecutor, CommandRequest, Error, Output, Parameters, Permission,
    Resource, Result, Session,
};
use tracing::info;

use super::{evaluate_fields, evaluate_rid, parse_verb};
use crate::session::{graph_session, EDGE_CLASS};

/// The `CREATE EDGE` verb.
#[derive(Debug, Default)]
pub struct CreateEdge {
    statement: Option<CreateEdgeStatement>,
}

impl CreateEdge {
    /// Registered verb name.
    pub const NAME: &'static str = "CREATE EDGE";

    /// Registry constructor.
    pub fn create() -> std::result::Result<Box<dyn CommandExecutor>, String> {
        Ok(Box::new(CreateEdge::default()))
    }
}

impl CommandExecutor for CreateEdge {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&mut self, session: &Session, request: &CommandRequest) -> Result<()> {
        self.statement = None;
        self.statement = Some(parse_verb(session, request, Self::NAME, |s| match s {
            Statement::CreateEdge(node) => Some(node),
            _ => None,
        })?);
        Ok(())
    }

    fn execute(&mut self, session: &Session, args: &Parameters) -> Result<Output> {
        let statement = self
            .statement
            .as_ref()
            .ok_or_else(|| Error::not_parsed(Self::NAME))?;
        let class = statement.class.as_deref().unwrap_or(EDGE_CLASS);
        session.check(&Resource::Class(class.to_string()), Permission::Create)?;

        let ctx = CommandContext::new(args.clone());
        let from = evaluate_rid(&statement.from, &ctx, Self::NAME)?;
        let to = evaluate_rid(&statement.to, &ctx, Self::NAME)?;
        let fields = evaluate_fields(&statement.assignments, &ctx)?;

        let edge = graph_session(session)
            .create_edge(Some(class), from, to, fields)
            .map_err(|e| Error::execution(Self::NAME, e))?;
        info!(session = %session.id(), rid = %edge.rid, %from, %to, class, "edge created");
        Ok(Output::Record(edge))
    }

    fn syntax(&self) -> &'static str {
        "CREATE EDGE [<class>] FROM <rid> TO <rid> [SET <field> = <expression>[,]*]"
    }
}
