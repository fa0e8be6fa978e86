use crate::{
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    span::Span,
    util::num::i64_to_f64_checked,
};

/// Builds the diagnostic for an operator applied to operands that do not
/// support it.
fn illegal_operation(op: &str, left: &Value, right: &Value, span: Span) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::IllegalOperation { details: format!("cannot apply '{op}' to {} and {}",
                                                                            left.type_name(),
                                                                            right.type_name()), },
                      span)
}

/// Builds the diagnostic for a unary operator on an unsupported operand.
fn illegal_unary(op: &str, value: &Value, span: Span) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::IllegalOperation { details: format!("cannot apply '{op}' to {}",
                                                                            value.type_name()), },
                      span)
}

/// Repeats a sequence length, treating non-positive counts as zero.
fn repeat_count(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

impl Value {
    /// Converts the value to an `f64`, or reports an error if not numeric.
    ///
    /// Integers convert only when exactly representable, following the
    /// interpreter-wide rule that float arithmetic never silently loses
    /// integer precision.
    pub fn as_float(&self, span: Span) -> EvalResult<f64> {
        match self {
            Self::Float(value) => Ok(*value),
            Self::Int(value) => {
                i64_to_f64_checked(*value, RuntimeError::new(RuntimeErrorKind::LiteralTooLarge, span))
            },
            _ => Err(RuntimeError::new(RuntimeErrorKind::TypeError { details: format!("expected a number, found {}",
                                                                                      self.type_name()), },
                                       span)),
        }
    }

    /// Addition: numbers add, strings concatenate, lists concatenate
    /// (copy-then-extend).
    pub fn add(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => {
                a.checked_add(*b)
                 .map(Self::Int)
                 .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::Overflow, span))
            },
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::Float(self.as_float(span)? + other.as_float(span)?))
            },
            (Self::Str(a), Self::Str(b)) => Ok(Self::Str(format!("{a}{b}"))),
            (Self::List(a), Self::List(b)) => {
                let mut elements = a.clone();
                elements.extend(b.iter().cloned());
                Ok(Self::List(elements))
            },
            _ => Err(illegal_operation("+", self, other, span)),
        }
    }

    /// Subtraction; defined for numbers only.
    pub fn subtract(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => {
                a.checked_sub(*b)
                 .map(Self::Int)
                 .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::Overflow, span))
            },
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::Float(self.as_float(span)? - other.as_float(span)?))
            },
            _ => Err(illegal_operation("-", self, other, span)),
        }
    }

    /// Multiplication: numbers multiply, a string or list times an integer
    /// repeats its contents.
    pub fn multiply(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => {
                a.checked_mul(*b)
                 .map(Self::Int)
                 .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::Overflow, span))
            },
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::Float(self.as_float(span)? * other.as_float(span)?))
            },
            (Self::Str(text), Self::Int(count)) => {
                Ok(Self::Str(text.repeat(repeat_count(*count))))
            },
            (Self::List(elements), Self::Int(count)) => {
                let mut repeated =
                    Vec::with_capacity(elements.len().saturating_mul(repeat_count(*count)));
                for _ in 0..repeat_count(*count) {
                    repeated.extend(elements.iter().cloned());
                }
                Ok(Self::List(repeated))
            },
            _ => Err(illegal_operation("*", self, other, span)),
        }
    }

    /// True division; the result is always a float, and a zero divisor is a
    /// runtime error rather than an illegal operation.
    pub fn divide(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                let divisor = other.as_float(span)?;
                if divisor == 0.0 {
                    return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, span));
                }
                Ok(Self::Float(self.as_float(span)? / divisor))
            },
            _ => Err(illegal_operation("/", self, other, span)),
        }
    }

    /// Floored modulo, matching the original host's `%`: the result takes
    /// the sign of the divisor.
    pub fn modulo(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => {
                if *b == 0 {
                    return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, span));
                }
                let remainder = a.checked_rem(*b)
                                 .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::Overflow, span))?;
                if remainder != 0 && (remainder < 0) != (*b < 0) {
                    Ok(Self::Int(remainder + b))
                } else {
                    Ok(Self::Int(remainder))
                }
            },
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                let divisor = other.as_float(span)?;
                if divisor == 0.0 {
                    return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, span));
                }
                let remainder = self.as_float(span)? % divisor;
                if remainder != 0.0 && (remainder < 0.0) != (divisor < 0.0) {
                    Ok(Self::Float(remainder + divisor))
                } else {
                    Ok(Self::Float(remainder))
                }
            },
            _ => Err(illegal_operation("%", self, other, span)),
        }
    }

    /// Floor quotient (`//`); integers stay integers, anything involving a
    /// float floors to a float.
    pub fn quotient(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => {
                if *b == 0 {
                    return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, span));
                }
                let quotient = a.checked_div(*b)
                                .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::Overflow, span))?;
                if a % b != 0 && (*a < 0) != (*b < 0) {
                    Ok(Self::Int(quotient - 1))
                } else {
                    Ok(Self::Int(quotient))
                }
            },
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                let divisor = other.as_float(span)?;
                if divisor == 0.0 {
                    return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, span));
                }
                Ok(Self::Float((self.as_float(span)? / divisor).floor()))
            },
            _ => Err(illegal_operation("//", self, other, span)),
        }
    }

    /// Exponentiation (`**`). Two integers with a non-negative exponent stay
    /// an integer; a negative exponent or any float operand yields a float.
    pub fn power(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(base), Self::Int(exponent)) if *exponent >= 0 => {
                let exponent = u32::try_from(*exponent)
                    .map_err(|_| RuntimeError::new(RuntimeErrorKind::Overflow, span))?;
                base.checked_pow(exponent)
                    .map(Self::Int)
                    .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::Overflow, span))
            },
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::Float(self.as_float(span)?.powf(other.as_float(span)?)))
            },
            _ => Err(illegal_operation("**", self, other, span)),
        }
    }

    /// Arithmetic negation; defined for numbers only.
    pub fn negate(&self, span: Span) -> EvalResult<Self> {
        match self {
            Self::Int(value) => {
                value.checked_neg()
                     .map(Self::Int)
                     .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::Overflow, span))
            },
            Self::Float(value) => Ok(Self::Float(-value)),
            _ => Err(illegal_unary("-", self, span)),
        }
    }

    /// Raw equality between two values of comparable types.
    ///
    /// Numbers compare across Int/Float; strings compare to strings;
    /// booleans (including `null`) compare to booleans. Everything else is
    /// an illegal operation, so mistakes like `1 == "1"` are rejected
    /// rather than silently false.
    fn equals_raw(&self, other: &Self, span: Span) -> EvalResult<bool> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ok(a == b),
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(self.as_float(span)? == other.as_float(span)?)
            },
            (Self::Str(a), Self::Str(b)) => Ok(a == b),
            (Self::Boolean(a), Self::Boolean(b)) => Ok(a == b),
            _ => Err(illegal_operation("==", self, other, span)),
        }
    }

    /// Equality comparison (`==`).
    pub fn equals(&self, other: &Self, span: Span) -> EvalResult<Self> {
        Ok(Self::boolean(self.equals_raw(other, span)?))
    }

    /// Inequality comparison (`!=`).
    pub fn not_equals(&self, other: &Self, span: Span) -> EvalResult<Self> {
        Ok(Self::boolean(!self.equals_raw(other, span)?))
    }

    /// Less-than comparison (`<`); numbers and strings.
    pub fn less_than(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ok(Self::boolean(a < b)),
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::boolean(self.as_float(span)? < other.as_float(span)?))
            },
            (Self::Str(a), Self::Str(b)) => Ok(Self::boolean(a < b)),
            _ => Err(illegal_operation("<", self, other, span)),
        }
    }

    /// Greater-than comparison (`>`); numbers and strings.
    pub fn greater_than(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ok(Self::boolean(a > b)),
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::boolean(self.as_float(span)? > other.as_float(span)?))
            },
            (Self::Str(a), Self::Str(b)) => Ok(Self::boolean(a > b)),
            _ => Err(illegal_operation(">", self, other, span)),
        }
    }

    /// Less-than-or-equal comparison (`<=`); numbers and strings.
    pub fn less_equal(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ok(Self::boolean(a <= b)),
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::boolean(self.as_float(span)? <= other.as_float(span)?))
            },
            (Self::Str(a), Self::Str(b)) => Ok(Self::boolean(a <= b)),
            _ => Err(illegal_operation("<=", self, other, span)),
        }
    }

    /// Greater-than-or-equal comparison (`>=`); numbers and strings.
    pub fn greater_equal(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ok(Self::boolean(a >= b)),
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::boolean(self.as_float(span)? >= other.as_float(span)?))
            },
            (Self::Str(a), Self::Str(b)) => Ok(Self::boolean(a >= b)),
            _ => Err(illegal_operation(">=", self, other, span)),
        }
    }

    /// Logical and (`&&`).
    ///
    /// Between booleans the falsier operand wins, so `null && true` stays
    /// null. Between numbers the result is the boolean of both
    /// truthinesses. Other combinations are illegal.
    pub fn and(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => {
                if a.unwrap_or(false) {
                    Ok(Self::Boolean(*b))
                } else {
                    Ok(Self::Boolean(*a))
                }
            },
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::boolean(self.is_true() && other.is_true()))
            },
            _ => Err(illegal_operation("&&", self, other, span)),
        }
    }

    /// Logical or (`||`); the mirror of [`Value::and`].
    pub fn or(&self, other: &Self, span: Span) -> EvalResult<Self> {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => {
                if a.unwrap_or(false) {
                    Ok(Self::Boolean(*a))
                } else {
                    Ok(Self::Boolean(*b))
                }
            },
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                Ok(Self::boolean(self.is_true() || other.is_true()))
            },
            _ => Err(illegal_operation("||", self, other, span)),
        }
    }

    /// Logical not (`!`); booleans and numbers.
    pub fn not(&self, span: Span) -> EvalResult<Self> {
        match self {
            Self::Boolean(_) | Self::Int(_) | Self::Float(_) => Ok(Self::boolean(!self.is_true())),
            _ => Err(illegal_unary("!", self, span)),
        }
    }

    /// Single-element indexing on strings and lists.
    ///
    /// Negative indices count from the end; anything out of range after
    /// that adjustment is a runtime error, not a silent null.
    pub fn index(&self, index: &Self, span: Span) -> EvalResult<Self> {
        let Self::Int(requested) = index else {
            return Err(RuntimeError::new(RuntimeErrorKind::TypeError { details: format!("index must be INT, found {}",
                                                                                        index.type_name()), },
                                         span));
        };

        match self {
            Self::Str(text) => {
                let length = text.chars().count();
                let position = resolve_index(*requested, length, span)?;
                let character = text.chars().nth(position).ok_or_else(|| {
                                    RuntimeError::new(RuntimeErrorKind::IndexOutOfRange { index:  *requested,
                                                                                          length, },
                                                      span)
                                })?;
                Ok(Self::Str(character.to_string()))
            },
            Self::List(elements) => {
                let position = resolve_index(*requested, elements.len(), span)?;
                Ok(elements[position].clone())
            },
            _ => Err(illegal_unary("indexing", self, span)),
        }
    }

    /// Two-sided slicing on strings and lists.
    ///
    /// Omitted bounds default to the full extent; bounds beyond the extent
    /// clamp, and an inverted range yields an empty result. Strings slice
    /// by characters, not bytes.
    pub fn slice(&self, start: Option<&Self>, end: Option<&Self>, span: Span) -> EvalResult<Self> {
        match self {
            Self::Str(text) => {
                let characters: Vec<char> = text.chars().collect();
                let (from, until) = resolve_slice_bounds(start, end, characters.len(), span)?;
                Ok(Self::Str(characters[from..until].iter().collect()))
            },
            Self::List(elements) => {
                let (from, until) = resolve_slice_bounds(start, end, elements.len(), span)?;
                Ok(Self::List(elements[from..until].to_vec()))
            },
            _ => Err(illegal_unary("slicing", self, span)),
        }
    }
}

/// Adjusts a possibly-negative index against a length, erroring when the
/// result is out of range.
fn resolve_index(requested: i64, length: usize, span: Span) -> EvalResult<usize> {
    let adjusted = if requested < 0 {
        requested + i64::try_from(length).unwrap_or(i64::MAX)
    } else {
        requested
    };

    usize::try_from(adjusted)
        .ok()
        .filter(|position| *position < length)
        .ok_or_else(|| {
            RuntimeError::new(RuntimeErrorKind::IndexOutOfRange { index: requested,
                                                                  length, },
                              span)
        })
}

/// Resolves optional slice bounds to a clamped `from..until` range.
fn resolve_slice_bounds(start: Option<&Value>,
                        end: Option<&Value>,
                        length: usize,
                        span: Span)
                        -> EvalResult<(usize, usize)> {
    let from = match start {
        None => 0,
        Some(value) => resolve_slice_bound(value, length, span)?,
    };
    let until = match end {
        None => length,
        Some(value) => resolve_slice_bound(value, length, span)?,
    };

    Ok((from.min(until), until))
}

/// Resolves one slice bound: negative counts from the end, and the result
/// clamps into `0..=length`.
fn resolve_slice_bound(value: &Value, length: usize, span: Span) -> EvalResult<usize> {
    let Value::Int(requested) = value else {
        return Err(RuntimeError::new(RuntimeErrorKind::TypeError { details: format!("slice bound must be INT, found {}",
                                                                                    value.type_name()), },
                                     span));
    };

    let adjusted = if *requested < 0 {
        requested + i64::try_from(length).unwrap_or(i64::MAX)
    } else {
        *requested
    };

    Ok(usize::try_from(adjusted.max(0)).unwrap_or(0).min(length))
}
