use std::rc::Rc;

use crate::{
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        environment::EnvRef,
        evaluator::core::{EvalResult, Flow},
        value::{
            core::Value,
            function::{HostCallback, HostFunction, Parameter},
        },
    },
    span::Span,
    util::num::{f64_to_i64_checked, i64_to_f64_checked, usize_to_i64_checked},
};

/// Registers the built-in library and the global constants into an
/// environment.
///
/// `true`, `false` and `null` are ordinary global bindings, not keywords.
/// Every built-in goes through the [`HostFunction`] contract, so it takes
/// part in the call protocol — argument checks, binding, tracebacks —
/// exactly like a user-defined function.
pub fn register(globals: &EnvRef) {
    let mut env = globals.borrow_mut();

    env.set("null", Value::null());
    env.set("true", Value::boolean(true));
    env.set("false", Value::boolean(false));

    env.set("print", host("print", &[("value", None)], builtin_print));
    env.set("string", host("string", &[("value", None)], builtin_string));
    env.set("int", host("int", &[("value", None)], builtin_int));
    env.set("float", host("float", &[("value", None)], builtin_float));
    env.set("is_int", host("is_int", &[("value", None)], builtin_is_int));
    env.set("is_float", host("is_float", &[("value", None)], builtin_is_float));
    env.set("is_string", host("is_string", &[("value", None)], builtin_is_string));
    env.set("is_list", host("is_list", &[("value", None)], builtin_is_list));
    env.set("is_function",
            host("is_function", &[("value", None)], builtin_is_function));
    env.set("len", host("len", &[("value", None)], builtin_len));
    env.set("sqrt", host("sqrt", &[("value", None)], builtin_sqrt));
    env.set("append",
            host("append", &[("list", None), ("value", None)], builtin_append));
    env.set("pop",
            host("pop",
                 &[("list", None), ("index", Some(Value::Int(-1)))],
                 builtin_pop));
    env.set("extend",
            host("extend", &[("list1", None), ("list2", None)], builtin_extend));
    env.set("sum", host("sum", &[("list", None)], builtin_sum));
    env.set("assert", host("assert", &[("value", None)], builtin_assert));
}

/// Builds one registered built-in from its name, parameter table and
/// callback.
fn host(name: &str, params: &[(&str, Option<Value>)], call: HostCallback) -> Value {
    let params = params.iter()
                       .map(|(name, default)| {
                           Parameter { name:    (*name).to_string(),
                                       default: default.clone(), }
                       })
                       .collect();
    Value::Builtin(Rc::new(HostFunction { name: name.to_string(),
                                          params,
                                          call }))
}

/// Fetches a bound argument out of the populated call environment.
fn argument(env: &EnvRef, name: &str, span: Span) -> EvalResult<Value> {
    env.borrow().get(name).ok_or_else(|| {
                              type_error(format!("missing argument '{name}'"), span)
                          })
}

fn type_error(details: String, span: Span) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::TypeError { details }, span)
}

fn value_flow(value: Value) -> EvalResult<Flow> {
    Ok(Flow::Value(value))
}

/// `print(value)`: writes the value and a newline to standard output.
fn builtin_print(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    println!("{value}");
    value_flow(Value::null())
}

/// `string(value)`: the display form of any value.
fn builtin_string(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    value_flow(Value::Str(value.to_string()))
}

/// `int(value)`: converts numbers (truncating), strings and booleans to
/// INT.
fn builtin_int(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    let converted = match &value {
        Value::Int(value) => *value,
        Value::Float(value) => {
            f64_to_i64_checked(value.trunc(),
                               type_error(format!("cannot convert {value} to INT"), span))?
        },
        Value::Str(text) => {
            text.trim()
                .parse()
                .map_err(|_| type_error(format!("cannot convert \"{text}\" to INT"), span))?
        },
        Value::Boolean(Some(value)) => i64::from(*value),
        other => {
            return Err(type_error(format!("cannot convert {} to INT", other.type_name()), span));
        },
    };
    value_flow(Value::Int(converted))
}

/// `float(value)`: converts numbers, strings and booleans to FLOAT.
fn builtin_float(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    let converted = match &value {
        Value::Float(value) => *value,
        Value::Int(value) => {
            i64_to_f64_checked(*value,
                               RuntimeError::new(RuntimeErrorKind::LiteralTooLarge, span))?
        },
        Value::Str(text) => {
            text.trim()
                .parse()
                .map_err(|_| type_error(format!("cannot convert \"{text}\" to FLOAT"), span))?
        },
        Value::Boolean(Some(value)) => f64::from(*value),
        other => {
            return Err(type_error(format!("cannot convert {} to FLOAT", other.type_name()),
                                  span));
        },
    };
    value_flow(Value::Float(converted))
}

/// `is_int(value)`: whether the value is an INT.
fn builtin_is_int(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    value_flow(Value::boolean(matches!(value, Value::Int(_))))
}

/// `is_float(value)`: whether the value is a FLOAT.
fn builtin_is_float(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    value_flow(Value::boolean(matches!(value, Value::Float(_))))
}

/// `is_string(value)`: whether the value is a STRING.
fn builtin_is_string(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    value_flow(Value::boolean(matches!(value, Value::Str(_))))
}

/// `is_list(value)`: whether the value is a LIST.
fn builtin_is_list(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    value_flow(Value::boolean(matches!(value, Value::List(_))))
}

/// `is_function(value)`: whether the value is callable.
fn builtin_is_function(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    value_flow(Value::boolean(matches!(value, Value::Function(_) | Value::Builtin(_))))
}

/// `len(value)`: the length of a string (in characters) or list.
fn builtin_len(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    let length = match &value {
        Value::Str(text) => text.chars().count(),
        Value::List(elements) => elements.len(),
        other => {
            return Err(type_error(format!("argument must be LIST or STRING, found {}",
                                          other.type_name()),
                                  span));
        },
    };
    let length = usize_to_i64_checked(length, RuntimeError::new(RuntimeErrorKind::Overflow, span))?;
    value_flow(Value::Int(length))
}

/// `sqrt(value)`: the square root of a non-negative number, as FLOAT.
fn builtin_sqrt(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    if !value.is_number() {
        return Err(type_error(format!("first argument must be INT or FLOAT, found {}",
                                      value.type_name()),
                              span));
    }
    let value = value.as_float(span)?;
    if value < 0.0 {
        return Err(type_error("math domain error: positive number expected".to_string(), span));
    }
    value_flow(Value::Float(value.sqrt()))
}

/// `append(list, value)`: the list with the value appended.
///
/// Arguments arrive as copies (copy-on-read), so the extended list is
/// returned rather than mutated in place.
fn builtin_append(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let list = argument(env, "list", span)?;
    let value = argument(env, "value", span)?;
    let mut elements = match list {
        Value::List(elements) => elements,
        other => {
            return Err(type_error(format!("first argument must be LIST, found {}",
                                          other.type_name()),
                                  span));
        },
    };
    elements.push(value);
    value_flow(Value::List(elements))
}

/// `pop(list, index = -1)`: the element removed from the given position.
fn builtin_pop(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let list = argument(env, "list", span)?;
    let index = argument(env, "index", span)?;
    let mut elements = match list {
        Value::List(elements) => elements,
        other => {
            return Err(type_error(format!("first argument must be LIST, found {}",
                                          other.type_name()),
                                  span));
        },
    };
    let Value::Int(requested) = index else {
        return Err(type_error(format!("second argument must be INT, found {}", index.type_name()),
                              span));
    };

    let length = elements.len();
    let adjusted = if requested < 0 {
        requested + usize_to_i64_checked(length, RuntimeError::new(RuntimeErrorKind::Overflow, span))?
    } else {
        requested
    };
    let position = usize::try_from(adjusted)
        .ok()
        .filter(|position| *position < length)
        .ok_or_else(|| {
            RuntimeError::new(RuntimeErrorKind::IndexOutOfRange { index: requested,
                                                                  length, },
                              span)
        })?;

    value_flow(elements.remove(position))
}

/// `extend(list1, list2)`: the concatenation of two lists.
fn builtin_extend(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let first = argument(env, "list1", span)?;
    let second = argument(env, "list2", span)?;
    let mut elements = match first {
        Value::List(elements) => elements,
        other => {
            return Err(type_error(format!("first argument must be LIST, found {}",
                                          other.type_name()),
                                  span));
        },
    };
    let more = match second {
        Value::List(more) => more,
        other => {
            return Err(type_error(format!("second argument must be LIST, found {}",
                                          other.type_name()),
                                  span));
        },
    };
    elements.extend(more);
    value_flow(Value::List(elements))
}

/// `sum(list)`: the numeric sum of a list's elements; INT unless a FLOAT is
/// involved.
fn builtin_sum(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let list = argument(env, "list", span)?;
    let elements = match list {
        Value::List(elements) => elements,
        other => {
            return Err(type_error(format!("argument must be LIST, found {}", other.type_name()),
                                  span));
        },
    };

    let mut total = Value::Int(0);
    for element in &elements {
        if !element.is_number() {
            return Err(type_error(format!("elements of list must be INT or FLOAT, found {}",
                                          element.type_name()),
                                  span));
        }
        total = total.add(element, span)?;
    }
    value_flow(total)
}

/// `assert(value)`: null when the value is truthy, an assertion failure
/// otherwise.
fn builtin_assert(env: &EnvRef, span: Span) -> EvalResult<Flow> {
    let value = argument(env, "value", span)?;
    if value.is_true() {
        value_flow(Value::null())
    } else {
        Err(RuntimeError::new(RuntimeErrorKind::AssertionFailed, span))
    }
}
