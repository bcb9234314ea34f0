//! Per-row expression methods.
//!
//! A method is a named function written as a suffix of another expression
//! (`price.asFloat()`). The parser resolves the name against a
//! [`MethodRegistry`] and wraps the preceding expression in a [`MethodNode`];
//! evaluation applies the method's [`MethodFunction`] to whatever the source
//! produced.

mod numeric;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use orbis_core::{Record, Value};
use tracing::trace;

use crate::context::CommandContext;
use crate::expression::Expression;
use crate::{Error, Result};

pub use numeric::{NumericCoercion, NumericTarget};

/// The transform behind a method name.
///
/// Implementations receive the already-evaluated upstream value. A null
/// upstream value must produce null, never an error.
pub trait MethodFunction: Send + Sync + fmt::Debug {
    /// Canonical name, as registered.
    fn name(&self) -> &'static str;

    /// Fewest arguments accepted.
    fn min_args(&self) -> usize {
        0
    }

    /// Most arguments accepted.
    fn max_args(&self) -> usize {
        0
    }

    /// Apply the method to `value`.
    fn apply(
        &self,
        ctx: &CommandContext,
        row: Option<&Record>,
        value: Value,
        args: &[Value],
    ) -> Result<Value>;
}

/// One method application inside an expression tree.
///
/// Cloning a node (see [`MethodNode::copy`]) yields an independent tree: the
/// argument list is a fresh container, so binding or mutating the clone's
/// arguments leaves the original untouched.
#[derive(Debug)]
pub struct MethodNode {
    name: String,
    function: Arc<dyn MethodFunction>,
    arguments: Vec<Value>,
    alias: Option<String>,
    source: Box<Expression>,
}

impl MethodNode {
    /// Apply `function` to `source`, with no arguments.
    pub fn new(function: Arc<dyn MethodFunction>, source: Expression) -> Self {
        MethodNode {
            name: function.name().to_string(),
            function,
            arguments: Vec::new(),
            alias: None,
            source: Box::new(source),
        }
    }

    /// Replace the argument list.
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Method name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered arguments.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Mutable access to the arguments of this node only.
    pub fn arguments_mut(&mut self) -> &mut Vec<Value> {
        &mut self.arguments
    }

    /// Projection alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Set or clear the projection alias.
    pub fn set_alias(&mut self, alias: Option<String>) {
        self.alias = alias;
    }

    /// The expression this method is applied to.
    pub fn source(&self) -> &Expression {
        &self.source
    }

    /// Evaluate the source against `row`, then apply this method.
    pub fn evaluate_now(&self, ctx: &CommandContext, row: Option<&Record>) -> Result<Value> {
        let upstream = self.source.evaluate(ctx, row)?;
        trace!(method = %self.name, upstream = upstream.type_name(), "applying method");
        self.function.apply(ctx, row, upstream, &self.arguments)
    }

    /// Defer evaluation until the value is first asked for.
    ///
    /// The result is computed at most once.
    pub fn defer<'a>(&'a self, ctx: &'a CommandContext, row: Option<&'a Record>) -> Deferred<'a> {
        Deferred {
            node: self,
            ctx,
            row,
            cell: OnceCell::new(),
        }
    }

    /// Structurally independent clone.
    pub fn copy(&self) -> MethodNode {
        MethodNode {
            name: self.name.clone(),
            function: Arc::clone(&self.function),
            arguments: self.arguments.iter().cloned().collect(),
            alias: self.alias.clone(),
            source: Box::new((*self.source).clone()),
        }
    }
}

impl Clone for MethodNode {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for MethodNode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.arguments == other.arguments
            && self.alias == other.alias
            && self.source == other.source
    }
}

impl fmt::Display for MethodNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.source, self.name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", Expression::Literal(arg.clone()))?;
        }
        write!(f, ")")?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

/// A method application that has not run yet.
pub struct Deferred<'a> {
    node: &'a MethodNode,
    ctx: &'a CommandContext,
    row: Option<&'a Record>,
    cell: OnceCell<Result<Value>>,
}

impl<'a> Deferred<'a> {
    /// Evaluate on first call; later calls return the cached outcome.
    pub fn get(&self) -> Result<&Value> {
        self.cell
            .get_or_init(|| self.node.evaluate_now(self.ctx, self.row))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether the value has been computed.
    pub fn is_evaluated(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Case-insensitive lookup of method functions by name.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    functions: BTreeMap<String, Arc<dyn MethodFunction>>,
}

static BUILTIN: Lazy<Arc<MethodRegistry>> = Lazy::new(|| {
    let mut registry = MethodRegistry::default();
    for function in numeric::builtin() {
        // Builtin names are distinct by construction.
        let _ = registry.register(function);
    }
    Arc::new(registry)
});

impl MethodRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry holding the builtin methods.
    pub fn builtin() -> Arc<MethodRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Register a function under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Registration`] if the name is taken.
    pub fn register(&mut self, function: Arc<dyn MethodFunction>) -> Result<()> {
        let key = function.name().to_ascii_lowercase();
        if self.functions.contains_key(&key) {
            return Err(Error::Registration {
                name: function.name().to_string(),
            });
        }
        self.functions.insert(key, function);
        Ok(())
    }

    /// Look up a function, ignoring case.
    pub fn get(&self, name: &str) -> Option<Arc<dyn MethodFunction>> {
        self.functions.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Canonical names of all registered functions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.values().map(|f| f.name())
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if no function is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
