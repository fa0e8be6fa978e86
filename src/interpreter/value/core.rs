use std::rc::Rc;

use crate::interpreter::value::function::{Function, HostFunction};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. The set is
/// closed: every operator is an exhaustive match over these variants, so
/// adding a variant is a compile-time-checked exercise across the whole
/// capability set.
#[derive(Debug, Clone)]
pub enum Value {
    /// An integer value (64-bit signed).
    Int(i64),
    /// A floating-point value (double precision).
    ///
    /// Integers and floats are stored distinctly so that `3` and `3.0`
    /// remain different values end to end.
    Float(f64),
    /// A string value.
    Str(String),
    /// The boolean-like unit type: `true`, `false`, or the single `null`
    /// instance (`None`).
    Boolean(Option<bool>),
    /// An ordered, growable sequence of values.
    List(Vec<Value>),
    /// A user-defined function.
    Function(Rc<Function>),
    /// A built-in function, dispatched through the host-function contract.
    Builtin(Rc<HostFunction>),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(Some(value))
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl Value {
    /// The single null instance.
    #[must_use]
    pub const fn null() -> Self {
        Self::Boolean(None)
    }

    /// Wraps a Rust `bool` as a language boolean.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Boolean(Some(value))
    }

    /// The display name of the value's type, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "INT",
            Self::Float(_) => "FLOAT",
            Self::Str(_) => "STRING",
            Self::Boolean(_) => "BOOLEAN",
            Self::List(_) => "LIST",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILT-IN FUNCTION",
        }
    }

    /// The truthiness of the value.
    ///
    /// Numbers are true iff nonzero, strings and lists iff nonempty,
    /// booleans are their own value, `null` is false, and functions are
    /// always true.
    #[must_use]
    pub fn is_true(&self) -> bool {
        match self {
            Self::Int(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::Str(value) => !value.is_empty(),
            Self::Boolean(value) => value.unwrap_or(false),
            Self::List(elements) => !elements.is_empty(),
            Self::Function(_) | Self::Builtin(_) => true,
        }
    }

    /// Returns `true` if the value is [`Int`](Self::Int).
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(..))
    }

    /// Returns `true` if the value is a number of either kind.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(..) | Self::Float(..))
    }

    /// The REPL-facing representation: like `Display`, but with strings
    /// quoted.
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Str(value) => format!("\"{value}\""),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => {
                // Keep the decimal point so floats never read as integers.
                if value.is_finite() && value.fract() == 0.0 {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            },
            Self::Str(value) => write!(f, "{value}"),
            Self::Boolean(Some(value)) => write!(f, "{value}"),
            Self::Boolean(None) => write!(f, "null"),
            Self::List(elements) => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element.repr())?;
                }
                write!(f, "]")
            },
            Self::Function(function) => write!(f, "<function {}>", function.display_name()),
            Self::Builtin(builtin) => write!(f, "<built-in function {}>", builtin.name),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality for data values; identity for functions.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
