use crate::{
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        environment::EnvRef,
        evaluator::core::{EvalResult, Flow, Interpreter},
        lexer::{Token, tokenize},
        parser::core::parse_expression,
        value::core::Value,
    },
    span::Span,
};

impl Interpreter {
    /// Evaluates a string literal, expanding `{...}` interpolations.
    ///
    /// Each interpolation segment is re-lexed, re-parsed and re-evaluated
    /// against the current environment — a recursive mini-invocation of the
    /// whole pipeline. `{{` and `}}` escape literal braces; an unmatched
    /// `{` or `}` is a reported diagnostic, never an unhandled fault.
    pub(crate) fn eval_str(&mut self, text: &str, span: Span, env: &EnvRef) -> EvalResult<Flow> {
        if !text.contains(['{', '}']) {
            return Ok(Flow::Value(Value::Str(text.to_string())));
        }

        let mut result = String::new();
        let mut chars = text.chars().peekable();

        while let Some(character) = chars.next() {
            match character {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    result.push('{');
                },
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    result.push('}');
                },
                '}' => {
                    return Err(interpolation_error("single '}' without a matching '{'", span));
                },
                '{' => {
                    let mut inner = String::new();
                    let mut depth = 1usize;
                    loop {
                        match chars.next() {
                            None => {
                                return Err(interpolation_error("'{' is never closed", span));
                            },
                            Some('{') => {
                                depth += 1;
                                inner.push('{');
                            },
                            Some('}') => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                                inner.push('}');
                            },
                            Some(other) => inner.push(other),
                        }
                    }
                    result.push_str(&self.eval_interpolation(&inner, span, env)?);
                },
                other => result.push(other),
            }
        }

        Ok(Flow::Value(Value::Str(result)))
    }

    /// Runs one interpolation segment through the pipeline and renders its
    /// value.
    ///
    /// Parse failures inside the segment surface as interpolation
    /// diagnostics; runtime failures keep their own kind but are attributed
    /// to the string literal's span, since the segment has no spans of its
    /// own in the enclosing source.
    fn eval_interpolation(&mut self, text: &str, span: Span, env: &EnvRef) -> EvalResult<String> {
        let source = crate::span::Source::new("<interpolation>", text);
        let tokens =
            tokenize(&source).map_err(|error| interpolation_error(&error.to_string(), span))?;

        let mut iter = tokens.iter().peekable();
        let expr =
            parse_expression(&mut iter).map_err(|error| {
                                           interpolation_error(&error.to_string(), span)
                                       })?;
        if !matches!(iter.peek(), None | Some((Token::Eof, _))) {
            return Err(interpolation_error("trailing tokens after the expression", span));
        }

        match self.eval(&expr, env)
                  .map_err(|error| RuntimeError::new(error.kind, span))?
        {
            Flow::Value(value) => Ok(value.to_string()),
            _ => Err(interpolation_error("interpolation must be a plain expression", span)),
        }
    }
}

/// Builds an invalid-interpolation diagnostic.
fn interpolation_error(details: &str, span: Span) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::InvalidInterpolation { details: details.to_string() },
                      span)
}
