//! Recursive-descent parser for command text.
//!
//! ```text
//! statement  := TRUNCATE RECORD item (',' item)*
//!             | CREATE VERTEX [class] [set]
//!             | CREATE EDGE [class] FROM expr TO expr [set]
//!             | DELETE EDGE (expr | FROM expr [TO expr])
//!             | DELETE VERTEX expr
//! set        := SET field '=' expr (',' field '=' expr)*
//! expr       := primary ('.' method '(' [literal (',' literal)*] ')')*
//! primary    := number | string | rid | NULL | TRUE | FALSE
//!             | '?' | ':'name | '$'name | field | '[' [expr (',' expr)*] ']'
//!             | '(' expr ')'
//! ```
//!
//! Keywords are case-insensitive. Every error is an [`Error::Syntax`]
//! carrying the byte offset of the offending token.

mod ast;
mod lexer;

use orbis_core::{RecordId, Value};

use crate::expression::Expression;
use crate::methods::{MethodNode, MethodRegistry};
use crate::request::ParameterRef;
use crate::{Error, Result};

pub use ast::{
    Assignment, CreateEdgeStatement, CreateVertexStatement, DeleteEdgeStatement,
    DeleteVertexStatement, Statement, TruncateRecordStatement,
};
use lexer::{Token, TokenKind};

/// Parse a whole request.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for anything outside the grammar above.
pub fn parse_statement(text: &str, methods: &MethodRegistry) -> Result<Statement> {
    let mut p = Parser::new(text, methods)?;
    let statement = if p.eat_keyword("TRUNCATE") {
        p.expect_keyword("RECORD")?;
        Statement::TruncateRecord(p.truncate_record_body()?)
    } else if p.eat_keyword("CREATE") {
        if p.eat_keyword("VERTEX") {
            Statement::CreateVertex(p.create_vertex_body()?)
        } else {
            p.expect_keyword("EDGE")?;
            Statement::CreateEdge(p.create_edge_body()?)
        }
    } else if p.eat_keyword("DELETE") {
        if p.eat_keyword("VERTEX") {
            Statement::DeleteVertex(DeleteVertexStatement {
                rid: p.parse_expression()?,
            })
        } else {
            p.expect_keyword("EDGE")?;
            Statement::DeleteEdge(p.delete_edge_body()?)
        }
    } else {
        return Err(p.unexpected("a command verb"));
    };
    p.expect_end()?;
    Ok(statement)
}

/// Parse `TRUNCATE RECORD ...`.
///
/// # Errors
///
/// Fails with [`Error::Syntax`] when `text` is not a truncate request.
pub fn parse_truncate_record(text: &str, methods: &MethodRegistry) -> Result<TruncateRecordStatement> {
    match parse_statement(text, methods)? {
        Statement::TruncateRecord(node) => Ok(node),
        other => Err(Error::syntax(
            format!("expected TRUNCATE RECORD, found {}", other.verb()),
            0,
        )),
    }
}

/// Token cursor with the grammar's building blocks.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    cursor: usize,
    methods: &'a MethodRegistry,
    next_positional: usize,
}

impl<'a> Parser<'a> {
    /// Tokenize `text`.
    pub fn new(text: &str, methods: &'a MethodRegistry) -> Result<Self> {
        Ok(Parser {
            tokens: lexer::tokenize(text)?,
            cursor: 0,
            methods,
            next_positional: 0,
        })
    }

    /// Byte offset of the next token.
    pub fn position(&self) -> usize {
        self.peek().pos
    }

    fn peek(&self) -> &Token {
        // The token list always ends with Eof and the cursor never passes it.
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        let token = self.peek();
        Error::syntax(format!("expected {}, found {}", expected, token.kind), token.pos)
    }

    /// Whether the next token is the keyword `kw`.
    pub fn peek_keyword(&self, kw: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(word) if word.eq_ignore_ascii_case(kw))
    }

    /// Consume `kw` if it is next.
    pub fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.peek_keyword(kw) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Consume `kw` or fail.
    pub fn expect_keyword(&mut self, kw: &str) -> Result<()> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            Err(self.unexpected(kw))
        }
    }

    /// Fail unless all input was consumed.
    pub fn expect_end(&self) -> Result<()> {
        match self.peek().kind {
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of input")),
        }
    }

    /// Consume an identifier.
    pub fn parse_identifier(&mut self) -> Result<String> {
        match &self.peek().kind {
            TokenKind::Ident(word) => {
                let word = word.clone();
                self.cursor += 1;
                Ok(word)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    /// Whether a rid literal is next.
    pub fn peek_rid(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Rid(_))
    }

    /// Consume a rid literal.
    pub fn parse_rid(&mut self) -> Result<RecordId> {
        let pos = self.position();
        match self.advance().kind {
            TokenKind::Rid(text) => text
                .parse()
                .map_err(|e: orbis_core::OrbisError| Error::syntax(e.to_string(), pos)),
            other => Err(Error::syntax(format!("expected a record id, found {}", other), pos)),
        }
    }

    /// Consume an expression, including any method suffixes.
    pub fn parse_expression(&mut self) -> Result<Expression> {
        let mut expr = self.parse_primary()?;
        while self.eat(&TokenKind::Dot) {
            let name_pos = self.position();
            let name = self.parse_identifier()?;
            let function = self
                .methods
                .get(&name)
                .ok_or_else(|| Error::syntax(format!("unknown method '{}'", name), name_pos))?;
            self.expect(TokenKind::LParen)?;
            let mut arguments = Vec::new();
            if !self.eat(&TokenKind::RParen) {
                loop {
                    arguments.push(self.parse_literal_argument()?);
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RParen)?;
            }
            if arguments.len() < function.min_args() || arguments.len() > function.max_args() {
                return Err(Error::syntax(
                    format!(
                        "method {} takes {}..={} arguments, got {}",
                        function.name(),
                        function.min_args(),
                        function.max_args(),
                        arguments.len()
                    ),
                    name_pos,
                ));
            }
            expr = Expression::Method(Box::new(
                MethodNode::new(function, expr).with_arguments(arguments),
            ));
        }
        Ok(expr)
    }

    fn parse_literal_argument(&mut self) -> Result<Value> {
        let pos = self.position();
        match self.parse_primary()? {
            Expression::Literal(v) => Ok(v),
            other => Err(Error::syntax(
                format!("method arguments must be literals, found {}", other),
                pos,
            )),
        }
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let pos = self.position();
        let token = self.advance();
        let expr = match token.kind {
            TokenKind::Integer(text) => Expression::Literal(integer(&text, pos)?),
            TokenKind::Decimal(text) => Expression::Literal(Value::Double(
                text.parse()
                    .map_err(|_| Error::syntax(format!("invalid number {}", text), pos))?,
            )),
            TokenKind::Str(s) => Expression::Literal(Value::String(s)),
            TokenKind::Rid(text) => Expression::Literal(Value::Link(
                text.parse()
                    .map_err(|e: orbis_core::OrbisError| Error::syntax(e.to_string(), pos))?,
            )),
            TokenKind::Question => {
                let index = self.next_positional;
                self.next_positional += 1;
                Expression::Parameter(ParameterRef::Positional(index))
            }
            TokenKind::Named(name) => Expression::Parameter(ParameterRef::Named(name)),
            TokenKind::Variable(name) => Expression::Variable(name),
            TokenKind::Ident(word) => keyword_literal(&word)
                .map(Expression::Literal)
                .unwrap_or(Expression::Field(word)),
            TokenKind::LBracket => {
                let mut items = Vec::new();
                if !self.eat(&TokenKind::RBracket) {
                    loop {
                        items.push(self.parse_expression()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(TokenKind::RBracket)?;
                }
                Expression::Collection(items)
            }
            TokenKind::LParen => {
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                inner
            }
            other => {
                return Err(Error::syntax(
                    format!("expected an expression, found {}", other),
                    pos,
                ))
            }
        };
        Ok(expr)
    }

    /// Consume an optional `SET f = expr, ...` clause.
    pub fn parse_assignments(&mut self) -> Result<Vec<Assignment>> {
        let mut assignments = Vec::new();
        if !self.eat_keyword("SET") {
            return Ok(assignments);
        }
        loop {
            let field = self.parse_identifier()?;
            self.expect(TokenKind::Eq)?;
            assignments.push((field, self.parse_expression()?));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(assignments)
    }

    fn parse_class(&mut self, stop: &[&str]) -> Result<Option<String>> {
        let is_class = matches!(self.peek().kind, TokenKind::Ident(_))
            && !stop.iter().any(|kw| self.peek_keyword(kw));
        if is_class {
            self.parse_identifier().map(Some)
        } else {
            Ok(None)
        }
    }

    fn truncate_record_body(&mut self) -> Result<TruncateRecordStatement> {
        let mut node = TruncateRecordStatement::default();
        if self.peek_rid() {
            let bare = self.tokens.get(self.cursor + 1).map(|t| &t.kind) != Some(&TokenKind::Dot);
            if bare {
                node.rid = Some(self.parse_rid()?.to_string());
                if !self.eat(&TokenKind::Comma) {
                    return Ok(node);
                }
            }
        }
        let mut items = Vec::new();
        loop {
            items.push(self.parse_expression()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        node.collection = Some(if items.len() == 1 && node.rid.is_none() {
            items.remove(0)
        } else {
            Expression::Collection(items)
        });
        Ok(node)
    }

    fn create_vertex_body(&mut self) -> Result<CreateVertexStatement> {
        Ok(CreateVertexStatement {
            class: self.parse_class(&["SET"])?,
            assignments: self.parse_assignments()?,
        })
    }

    fn create_edge_body(&mut self) -> Result<CreateEdgeStatement> {
        let class = self.parse_class(&["FROM"])?;
        self.expect_keyword("FROM")?;
        let from = self.parse_expression()?;
        self.expect_keyword("TO")?;
        let to = self.parse_expression()?;
        Ok(CreateEdgeStatement {
            class,
            from,
            to,
            assignments: self.parse_assignments()?,
        })
    }

    fn delete_edge_body(&mut self) -> Result<DeleteEdgeStatement> {
        if !self.eat_keyword("FROM") {
            return Ok(DeleteEdgeStatement {
                rid: Some(self.parse_expression()?),
                ..Default::default()
            });
        }
        let from = self.parse_expression()?;
        let to = if self.eat_keyword("TO") {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(DeleteEdgeStatement {
            rid: None,
            from: Some(from),
            to,
        })
    }
}

fn integer(text: &str, pos: usize) -> Result<Value> {
    let n: i64 = text
        .parse()
        .map_err(|_| Error::syntax(format!("integer out of range: {}", text), pos))?;
    Ok(i32::try_from(n).map(Value::Integer).unwrap_or(Value::Long(n)))
}

fn keyword_literal(word: &str) -> Option<Value> {
    if word.eq_ignore_ascii_case("NULL") {
        Some(Value::Null)
    } else if word.eq_ignore_ascii_case("TRUE") {
        Some(Value::Bool(true))
    } else if word.eq_ignore_ascii_case("FALSE") {
        Some(Value::Bool(false))
    } else {
        None
    }
}
