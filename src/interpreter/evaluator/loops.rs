use crate::{
    ast::Expr,
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        environment::EnvRef,
        evaluator::core::{EvalResult, Flow, Interpreter, LOOP_ITERATION_LIMIT, flow},
        value::core::Value,
    },
    span::Span,
};

/// Tracks how many times a single loop node has iterated, and aborts the
/// loop once the safety cap is exceeded.
///
/// The cap turns a runaway loop into a reported runtime error instead of a
/// hang; it is never a silent cutoff.
struct IterationGuard {
    count: usize,
    span:  Span,
}

impl IterationGuard {
    const fn new(span: Span) -> Self {
        Self { count: 0, span }
    }

    fn tick(&mut self) -> EvalResult<()> {
        self.count += 1;
        if self.count > LOOP_ITERATION_LIMIT {
            return Err(RuntimeError::new(RuntimeErrorKind::IterationLimitExceeded { limit: LOOP_ITERATION_LIMIT, },
                                         self.span));
        }
        Ok(())
    }
}

impl Interpreter {
    /// Evaluates a counted loop: `for var = start to end [step s] { body }`.
    ///
    /// Bounds and step must be numbers. The step defaults to `1`, or `-1`
    /// when the range runs downhill; the end bound is exclusive. The loop's
    /// own value is the list of per-iteration body values; `break` stops
    /// and keeps what was accumulated so far, `continue` skips only that
    /// iteration's value.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn eval_for_counted(&mut self,
                                   var: &str,
                                   start: &Expr,
                                   end: &Expr,
                                   step: Option<&Expr>,
                                   body: &Expr,
                                   span: Span,
                                   env: &EnvRef)
                                   -> EvalResult<Flow> {
        let start_value = flow!(self.eval(start, env)?);
        let end_value = flow!(self.eval(end, env)?);
        let step_value = match step {
            Some(expr) => Some(flow!(self.eval(expr, env)?)),
            None => None,
        };

        for value in [&start_value, &end_value].into_iter().chain(step_value.as_ref()) {
            if !value.is_number() {
                return Err(RuntimeError::new(RuntimeErrorKind::TypeError { details: format!("for-loop bounds must be numbers, found {}",
                                                                                            value.type_name()), },
                                             span));
            }
        }

        let all_int = start_value.is_int()
                      && end_value.is_int()
                      && step_value.as_ref().is_none_or(Value::is_int);

        if all_int {
            self.run_counted_int(var, &start_value, &end_value, step_value.as_ref(), body, span, env)
        } else {
            self.run_counted_float(var, &start_value, &end_value, step_value.as_ref(), body, span, env)
        }
    }

    /// The integer path of the counted loop; the loop variable stays INT.
    #[allow(clippy::too_many_arguments)]
    fn run_counted_int(&mut self,
                       var: &str,
                       start: &Value,
                       end: &Value,
                       step: Option<&Value>,
                       body: &Expr,
                       span: Span,
                       env: &EnvRef)
                       -> EvalResult<Flow> {
        let (Value::Int(start), Value::Int(end)) = (start, end) else {
            unreachable!("caller checked the bounds");
        };
        let step = match step {
            Some(Value::Int(step)) => *step,
            Some(_) => unreachable!("caller checked the step"),
            None if start < end => 1,
            None => -1,
        };

        let mut guard = IterationGuard::new(span);
        let mut elements = Vec::new();
        let mut current = *start;

        loop {
            let keep_going = if step >= 0 { current < *end } else { current > *end };
            if !keep_going {
                break;
            }
            guard.tick()?;

            env.borrow_mut().set(var, Value::Int(current));
            current = current.checked_add(step)
                             .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::Overflow, span))?;

            match self.eval(body, env)? {
                Flow::Value(value) => elements.push(value),
                Flow::Break => break,
                Flow::Continue => {},
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }

        Ok(Flow::Value(Value::List(elements)))
    }

    /// The float path of the counted loop; the loop variable is FLOAT.
    #[allow(clippy::too_many_arguments)]
    fn run_counted_float(&mut self,
                         var: &str,
                         start: &Value,
                         end: &Value,
                         step: Option<&Value>,
                         body: &Expr,
                         span: Span,
                         env: &EnvRef)
                         -> EvalResult<Flow> {
        let start = start.as_float(span)?;
        let end = end.as_float(span)?;
        let step = match step {
            Some(value) => value.as_float(span)?,
            None if start < end => 1.0,
            None => -1.0,
        };

        let mut guard = IterationGuard::new(span);
        let mut elements = Vec::new();
        let mut current = start;

        loop {
            let keep_going = if step >= 0.0 { current < end } else { current > end };
            if !keep_going {
                break;
            }
            guard.tick()?;

            env.borrow_mut().set(var, Value::Float(current));
            current += step;

            match self.eval(body, env)? {
                Flow::Value(value) => elements.push(value),
                Flow::Break => break,
                Flow::Continue => {},
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }

        Ok(Flow::Value(Value::List(elements)))
    }

    /// Evaluates an iterator loop: `for var in iterable { body }`.
    ///
    /// Lists yield their elements, strings yield one-character strings.
    pub(crate) fn eval_for_in(&mut self,
                              var: &str,
                              iterable: &Expr,
                              body: &Expr,
                              span: Span,
                              env: &EnvRef)
                              -> EvalResult<Flow> {
        let iterable_value = flow!(self.eval(iterable, env)?);
        let items: Vec<Value> = match &iterable_value {
            Value::List(elements) => elements.clone(),
            Value::Str(text) => {
                text.chars()
                    .map(|character| Value::Str(character.to_string()))
                    .collect()
            },
            other => {
                return Err(RuntimeError::new(RuntimeErrorKind::TypeError { details: format!("for-in expects LIST or STRING, found {}",
                                                                                            other.type_name()), },
                                             span));
            },
        };

        let mut guard = IterationGuard::new(span);
        let mut elements = Vec::new();

        for item in items {
            guard.tick()?;
            env.borrow_mut().set(var, item);

            match self.eval(body, env)? {
                Flow::Value(value) => elements.push(value),
                Flow::Break => break,
                Flow::Continue => {},
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }

        Ok(Flow::Value(Value::List(elements)))
    }

    /// Evaluates a conditional loop: `while condition { body }`.
    pub(crate) fn eval_while(&mut self,
                             condition: &Expr,
                             body: &Expr,
                             span: Span,
                             env: &EnvRef)
                             -> EvalResult<Flow> {
        let mut guard = IterationGuard::new(span);
        let mut elements = Vec::new();

        loop {
            let condition_value = flow!(self.eval(condition, env)?);
            if !condition_value.is_true() {
                break;
            }
            guard.tick()?;

            match self.eval(body, env)? {
                Flow::Value(value) => elements.push(value),
                Flow::Break => break,
                Flow::Continue => {},
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }

        Ok(Flow::Value(Value::List(elements)))
    }
}
