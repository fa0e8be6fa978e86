use crate::{
    ast::{Expr, LiteralValue, Statement},
    error::{RuntimeError, RuntimeErrorKind, TraceFrame},
    interpreter::{
        environment::{EnvRef, Environment},
        value::core::Value,
    },
    span::Span,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Maximum number of iterations a single loop may run before it is aborted
/// with a runtime error.
pub const LOOP_ITERATION_LIMIT: usize = 10_000;
/// Maximum depth of nested function calls.
pub const CALL_DEPTH_LIMIT: usize = 256;

/// The outcome of evaluating one node: a plain value, or one of the
/// non-local control-flow signals.
///
/// Signals replace host exceptions entirely: `return`, `break` and
/// `continue` travel through this enum, and every composite evaluation
/// checks for them after each sub-evaluation and propagates them without
/// further work.
#[derive(Debug, Clone)]
pub enum Flow {
    /// An ordinary value.
    Value(Value),
    /// A `return` unwinding to the nearest function call.
    Return(Value),
    /// A `break` unwinding to the nearest loop.
    Break,
    /// A `continue` unwinding to the nearest loop.
    Continue,
}

/// Unwraps the plain value out of a [`Flow`], propagating any signal to the
/// caller unchanged.
///
/// This is the single explicit propagation point the evaluator uses after
/// every sub-evaluation.
macro_rules! flow {
    ($result:expr) => {
        match $result {
            $crate::interpreter::evaluator::core::Flow::Value(value) => value,
            other => return Ok(other),
        }
    };
}
pub(crate) use flow;

/// One entry of the interpreter's call stack, used only for diagnostics.
pub(crate) struct Frame {
    /// Display name of the active callable.
    pub display:    String,
    /// 0-based line of the call site that entered this frame.
    pub entry_line: usize,
}

/// The tree-walking evaluator.
///
/// Holds the global environment (pre-populated with the built-in library
/// and the `true`/`false`/`null` constants) and the call stack used to
/// build tracebacks. One `Interpreter` is created per program run and, in
/// the REPL, reused across inputs so globals persist.
pub struct Interpreter {
    pub(crate) globals: EnvRef,
    pub(crate) frames:  Vec<Frame>,
}

#[allow(clippy::new_without_default)]
impl Interpreter {
    /// Creates an interpreter with a fresh global environment.
    #[must_use]
    pub fn new() -> Self {
        let globals = Environment::new().into_ref();
        super::builtins::register(&globals);
        Self { globals,
               frames: vec![Frame { display:    "<program>".to_string(),
                                    entry_line: 0, }], }
    }

    /// The global environment, for host code that wants to pre-define
    /// variables or register additional built-ins.
    #[must_use]
    pub fn globals(&self) -> &EnvRef {
        &self.globals
    }

    /// Evaluates a whole program against the global environment.
    ///
    /// Returns the value of the last evaluated statement, or `None` for an
    /// empty program. `return`, `break` and `continue` are not meaningful
    /// at the top level and are reported as errors.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised; evaluation stops there.
    ///
    /// # Example
    /// ```
    /// use moss::{
    ///     interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::core::parse},
    ///     span::Source,
    /// };
    ///
    /// let source = Source::new("<test>", "var x = 2\nx * 21");
    /// let tokens = tokenize(&source).unwrap();
    /// let program = parse(&tokens).unwrap();
    ///
    /// let mut interpreter = Interpreter::new();
    /// let result = interpreter.evaluate(&program).unwrap();
    ///
    /// assert_eq!(result.unwrap().to_string(), "42");
    /// ```
    pub fn evaluate(&mut self, program: &[Statement]) -> EvalResult<Option<Value>> {
        let globals = self.globals.clone();
        let mut result = None;

        for statement in program {
            match self.eval_statement(statement, &globals)? {
                Flow::Value(value) => result = Some(value),
                Flow::Return(_) => {
                    return Err(self.misplaced_control("return", statement.span()));
                },
                Flow::Break => {
                    return Err(self.misplaced_control("break", statement.span()));
                },
                Flow::Continue => {
                    return Err(self.misplaced_control("continue", statement.span()));
                },
            }
        }

        Ok(result)
    }

    /// Evaluates a single statement.
    pub fn eval_statement(&mut self, statement: &Statement, env: &EnvRef) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expr, .. } => self.eval(expr, env),
            Statement::Return { value, .. } => {
                let result = match value {
                    Some(expr) => flow!(self.eval(expr, env)?),
                    None => Value::null(),
                };
                Ok(Flow::Return(result))
            },
            Statement::Break { .. } => Ok(Flow::Break),
            Statement::Continue { .. } => Ok(Flow::Continue),
        }
    }

    /// Evaluates an expression and returns the resulting flow.
    ///
    /// This is the main dispatch point: one arm per node kind. It is also
    /// where a fresh `RuntimeError` gets its traceback stamped, while the
    /// call stack that produced it is still intact.
    pub fn eval(&mut self, expr: &Expr, env: &EnvRef) -> EvalResult<Flow> {
        let result = match expr {
            Expr::Literal { value, span } => self.eval_literal(value, *span, env),
            Expr::ListLiteral { elements, .. } => self.eval_list_literal(elements, env),
            Expr::Variable { name, span } => Self::eval_variable(name, *span, env),
            Expr::Assign { name, value, .. } => self.eval_assignment(name, value, env),
            Expr::UnaryOp { op, expr, span } => self.eval_unary_op(*op, expr, *span, env),
            Expr::BinaryOp { left, op, right, span } => {
                self.eval_binary_op(left, *op, right, *span, env)
            },
            Expr::If { cases, else_case, .. } => self.eval_if(cases, else_case.as_deref(), env),
            Expr::ForCounted { var,
                               start,
                               end,
                               step,
                               body,
                               span, } => {
                self.eval_for_counted(var, start, end, step.as_deref(), body, *span, env)
            },
            Expr::ForIn { var,
                          iterable,
                          body,
                          span, } => self.eval_for_in(var, iterable, body, *span, env),
            Expr::While { condition, body, span } => self.eval_while(condition, body, *span, env),
            Expr::FuncDef { def, .. } => self.eval_func_def(def, env),
            Expr::Call { callee, arguments, span } => {
                self.eval_call(callee, arguments, *span, env)
            },
            Expr::Index { target, index, span } => self.eval_index(target, index, *span, env),
            Expr::Slice { target,
                          start,
                          end,
                          span, } => {
                self.eval_slice(target, start.as_deref(), end.as_deref(), *span, env)
            },
            Expr::Block { statements, .. } => self.eval_block(statements, env),
        };

        match result {
            Err(mut error) => {
                if error.trace.is_empty() {
                    error.trace = self.capture_trace(error.span);
                }
                Err(error)
            },
            ok => ok,
        }
    }

    /// Evaluates a literal expression.
    ///
    /// Numbers convert directly; string literals go through interpolation
    /// expansion.
    fn eval_literal(&mut self, value: &LiteralValue, span: Span, env: &EnvRef) -> EvalResult<Flow> {
        match value {
            LiteralValue::Int(value) => Ok(Flow::Value(Value::Int(*value))),
            LiteralValue::Float(value) => Ok(Flow::Value(Value::Float(*value))),
            LiteralValue::Str(value) => self.eval_str(value, span, env),
        }
    }

    /// Evaluates a list literal by evaluating each element in order.
    fn eval_list_literal(&mut self, elements: &[Expr], env: &EnvRef) -> EvalResult<Flow> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(flow!(self.eval(element, env)?));
        }
        Ok(Flow::Value(Value::List(values)))
    }

    /// Looks up a variable.
    ///
    /// The environment returns an independent copy of the binding
    /// (copy-on-read); the copy is attributed to this access site through
    /// the spans the surrounding operations carry.
    fn eval_variable(name: &str, span: Span, env: &EnvRef) -> EvalResult<Flow> {
        env.borrow()
           .get(name)
           .map(Flow::Value)
           .ok_or_else(|| {
               RuntimeError::new(RuntimeErrorKind::UnknownVariable { name: name.to_string() },
                                 span)
           })
    }

    /// Evaluates an assignment; the bound value is also the expression's
    /// value, so assignments chain.
    fn eval_assignment(&mut self, name: &str, value: &Expr, env: &EnvRef) -> EvalResult<Flow> {
        let value = flow!(self.eval(value, env)?);
        env.borrow_mut().set(name, value.clone());
        Ok(Flow::Value(value))
    }

    /// Evaluates an `if`/`elif`/`else` chain.
    ///
    /// Conditions are checked in order and evaluation short-circuits at the
    /// first true one; no branch true and no `else` yields null.
    fn eval_if(&mut self,
               cases: &[(Expr, Expr)],
               else_case: Option<&Expr>,
               env: &EnvRef)
               -> EvalResult<Flow> {
        for (condition, body) in cases {
            let value = flow!(self.eval(condition, env)?);
            if value.is_true() {
                return self.eval(body, env);
            }
        }

        match else_case {
            Some(body) => self.eval(body, env),
            None => Ok(Flow::Value(Value::null())),
        }
    }

    /// Evaluates a block of statements.
    ///
    /// Blocks do not open a new scope — only function calls do — and their
    /// value is the last statement's value, null when empty.
    fn eval_block(&mut self, statements: &[Statement], env: &EnvRef) -> EvalResult<Flow> {
        let mut last = Value::null();
        for statement in statements {
            last = flow!(self.eval_statement(statement, env)?);
        }
        Ok(Flow::Value(last))
    }

    /// Builds the misplaced-control error for `return`/`break`/`continue`
    /// escaping to the top level.
    fn misplaced_control(&self, keyword: &str, span: Span) -> RuntimeError {
        let mut error =
            RuntimeError::new(RuntimeErrorKind::MisplacedControl { keyword: keyword.to_string() },
                              span);
        error.trace = self.capture_trace(span);
        error
    }

    /// Captures the current call chain, oldest frame first.
    ///
    /// Each frame is reported at the line where control had moved on to the
    /// next frame; the innermost frame is reported at the failure span
    /// itself. This mirrors a native stack unwind without relying on one.
    pub(crate) fn capture_trace(&self, span: Span) -> Vec<TraceFrame> {
        let mut trace = Vec::with_capacity(self.frames.len());
        for (index, frame) in self.frames.iter().enumerate() {
            let line = self.frames
                           .get(index + 1)
                           .map_or(span.start.line, |next| next.entry_line);
            trace.push(TraceFrame { name: frame.display.clone(),
                                    line });
        }
        trace
    }
}
