use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDef},
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        environment::{EnvRef, Environment},
        evaluator::core::{CALL_DEPTH_LIMIT, EvalResult, Flow, Frame, Interpreter, flow},
        value::{
            core::Value,
            function::{Function, HostFunction, Parameter},
        },
    },
    span::Span,
};

impl Interpreter {
    /// Evaluates a function definition into a [`Function`] value.
    ///
    /// The current environment is captured as the closure environment, and
    /// every default-value expression is evaluated here — once, eagerly, in
    /// the defining scope — so later calls reuse the finished values. A
    /// named definition also binds itself in the current scope.
    pub(crate) fn eval_func_def(&mut self, def: &FunctionDef, env: &EnvRef) -> EvalResult<Flow> {
        let mut params = Vec::with_capacity(def.params.len());
        for param in &def.params {
            let default = match &param.default {
                Some(expr) => Some(flow!(self.eval(expr, env)?)),
                None => None,
            };
            params.push(Parameter { name: param.name.clone(),
                                    default });
        }

        let function = Rc::new(Function { name: def.name.clone(),
                                          params,
                                          body: (*def.body).clone(),
                                          auto_return: def.auto_return,
                                          env: env.clone() });
        let value = Value::Function(function);

        if let Some(name) = &def.name {
            env.borrow_mut().set(name, value.clone());
        }

        Ok(Flow::Value(value))
    }

    /// Evaluates a call expression.
    ///
    /// The callee and all arguments are evaluated first; dispatch then
    /// depends on whether the callee is a user-defined function or a
    /// built-in. Anything else is not callable.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            span: Span,
                            env: &EnvRef)
                            -> EvalResult<Flow> {
        let callee_value = flow!(self.eval(callee, env)?);

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(flow!(self.eval(argument, env)?));
        }

        match callee_value {
            Value::Function(function) => self.call_function(&function, args, span),
            Value::Builtin(builtin) => self.call_builtin(&builtin, args, span),
            other => {
                Err(RuntimeError::new(RuntimeErrorKind::NotCallable { type_name: other.type_name().to_string(), },
                                      span))
            },
        }
    }

    /// Calls a user-defined function.
    ///
    /// A fresh call environment is chained to the environment captured at
    /// definition time (not the caller's), arguments are bound with
    /// defaults filling the tail, and the body's flow decides the result:
    /// a `return` payload, the body value for auto-return bodies, or null.
    pub(crate) fn call_function(&mut self,
                                function: &Function,
                                args: Vec<Value>,
                                span: Span)
                                -> EvalResult<Flow> {
        self.check_call_depth(span)?;
        check_arguments(function.display_name(), &function.params, &args, span)?;

        let call_env = Environment::with_parent(function.env.clone()).into_ref();
        bind_arguments(&function.params, args, &call_env);

        self.frames.push(Frame { display:    function.display_name().to_string(),
                                 entry_line: span.start.line, });
        let result = self.eval(&function.body, &call_env);
        self.frames.pop();

        match result? {
            Flow::Return(value) => Ok(Flow::Value(value)),
            Flow::Value(value) if function.auto_return => Ok(Flow::Value(value)),
            Flow::Value(_) => Ok(Flow::Value(Value::null())),
            Flow::Break => Err(self.control_escaped("break", span)),
            Flow::Continue => Err(self.control_escaped("continue", span)),
        }
    }

    /// Calls a built-in through the host-function contract.
    ///
    /// Built-ins go through the same argument checks, binding and traceback
    /// frames as user-defined functions; only the body differs. Their call
    /// environment chains to the global scope.
    pub(crate) fn call_builtin(&mut self,
                               builtin: &HostFunction,
                               args: Vec<Value>,
                               span: Span)
                               -> EvalResult<Flow> {
        self.check_call_depth(span)?;
        check_arguments(&builtin.name, &builtin.params, &args, span)?;

        let call_env = Environment::with_parent(self.globals.clone()).into_ref();
        bind_arguments(&builtin.params, args, &call_env);

        self.frames.push(Frame { display:    builtin.name.clone(),
                                 entry_line: span.start.line, });
        let result = match (builtin.call)(&call_env, span) {
            Err(mut error) => {
                // Native callbacks bypass the eval dispatch, so their
                // errors are stamped here, before the frame pops.
                if error.trace.is_empty() {
                    error.trace = self.capture_trace(error.span);
                }
                Err(error)
            },
            ok => ok,
        };
        self.frames.pop();

        match result? {
            Flow::Return(value) | Flow::Value(value) => Ok(Flow::Value(value)),
            Flow::Break => Err(self.control_escaped("break", span)),
            Flow::Continue => Err(self.control_escaped("continue", span)),
        }
    }

    /// Rejects calls nested deeper than the safety cap.
    fn check_call_depth(&self, span: Span) -> EvalResult<()> {
        if self.frames.len() > CALL_DEPTH_LIMIT {
            return Err(RuntimeError::new(RuntimeErrorKind::RecursionLimitExceeded { limit: CALL_DEPTH_LIMIT, },
                                         span));
        }
        Ok(())
    }

    /// Builds the error for a loop signal escaping through a call boundary.
    fn control_escaped(&self, keyword: &str, span: Span) -> RuntimeError {
        let mut error =
            RuntimeError::new(RuntimeErrorKind::MisplacedControl { keyword: keyword.to_string() },
                              span);
        error.trace = self.capture_trace(span);
        error
    }
}

/// Checks the argument count against the parameter list.
///
/// The count must lie between the number of parameters without defaults and
/// the total parameter count; both violations name the function.
fn check_arguments(name: &str, params: &[Parameter], args: &[Value], span: Span) -> EvalResult<()> {
    let required = params.iter().filter(|param| param.default.is_none()).count();

    if args.len() < required {
        return Err(RuntimeError::new(RuntimeErrorKind::TooFewArguments { name:   name.to_string(),
                                                                         needed: required,
                                                                         given:  args.len(), },
                                     span));
    }
    if args.len() > params.len() {
        return Err(RuntimeError::new(RuntimeErrorKind::TooManyArguments { name:   name.to_string(),
                                                                          needed: params.len(),
                                                                          given:  args.len(), },
                                     span));
    }

    Ok(())
}

/// Binds arguments into a call environment, left to right, with parameter
/// defaults filling in for omitted trailing arguments.
fn bind_arguments(params: &[Parameter], args: Vec<Value>, call_env: &EnvRef) {
    let mut args = args.into_iter();
    let mut env = call_env.borrow_mut();

    for param in params {
        let value = args.next().or_else(|| param.default.clone());
        if let Some(value) = value {
            env.set(&param.name, value);
        }
    }
}
