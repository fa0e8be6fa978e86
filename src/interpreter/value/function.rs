use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::Expr,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Flow},
        value::core::Value,
    },
    span::Span,
};

/// A single bound parameter of a callable.
///
/// The default, when present, is a finished [`Value`]: user-defined
/// functions evaluate their default expressions exactly once, at definition
/// time, in the defining scope. There is no shared "no default" sentinel;
/// absence is represented by `None`.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// The parameter name, bound in the call environment.
    pub name:    String,
    /// The default value filling in for an omitted argument.
    pub default: Option<Value>,
}

/// A user-defined function value.
///
/// Owns its AST body and the environment captured at definition time. The
/// captured environment — not the caller's — becomes the parent of every
/// call environment, which is what gives the language lexical closures.
#[derive(Clone)]
pub struct Function {
    /// The function name; `None` for anonymous functions.
    pub name:        Option<String>,
    /// Declared parameters, defaults already evaluated.
    pub params:      Vec<Parameter>,
    /// The body expression or block.
    pub body:        Expr,
    /// Whether the body's own value is implicitly returned.
    pub auto_return: bool,
    /// The environment captured at definition time.
    pub env:         Rc<RefCell<Environment>>,
}

impl Function {
    /// The name shown in diagnostics and tracebacks.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

impl std::fmt::Debug for Function {
    // The captured environment may (and for globals, does) contain this
    // very function; printing it would recurse forever.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<function {}>", self.display_name())
    }
}

/// The native callback behind a built-in function.
///
/// The callback receives the populated call environment — its arguments are
/// already bound under their parameter names — and the call-site span for
/// error attribution. It returns the same result-with-signal as evaluating
/// a user-defined function body.
pub type HostCallback = fn(&Rc<RefCell<Environment>>, Span) -> EvalResult<Flow>;

/// A built-in function registered with the interpreter.
///
/// This is the host-function contract: a name, a positional parameter list
/// (each optionally defaulted) and a native callback. Built-ins participate
/// in the call protocol identically to user-defined functions: the same
/// argument-count checks, the same binding, the same traceback frames.
pub struct HostFunction {
    /// The name the function is registered under.
    pub name:   String,
    /// Declared parameters, with optional default values.
    pub params: Vec<Parameter>,
    /// The native implementation.
    pub call:   HostCallback,
}

impl std::fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<built-in function {}>", self.name)
    }
}
