use crate::span::Span;

/// One entry of a captured call chain: which function was active, and the
/// line being executed when control left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    /// The display name of the active function (`<program>` for the top
    /// level).
    pub name: String,
    /// The 0-based line being executed in that frame.
    pub line: usize,
}

/// Represents all error kinds that can occur during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    /// Tried to read a variable that is not defined in any enclosing scope.
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// An operator was applied to operands that do not support it.
    IllegalOperation {
        /// Which operator met which operand types.
        details: String,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
    /// Attempted division (or modulo, or floor quotient) by zero.
    DivisionByZero,
    /// Tried to access a string or list element outside the valid range.
    IndexOutOfRange {
        /// The index that was requested.
        index:  i64,
        /// The length of the indexed value.
        length: usize,
    },
    /// Integer arithmetic overflowed.
    Overflow,
    /// An integer was too large to be represented exactly as a float.
    LiteralTooLarge,
    /// Tried to call a value that is not a function.
    NotCallable {
        /// The type that was called.
        type_name: String,
    },
    /// Fewer arguments than required parameters.
    TooFewArguments {
        /// The display name of the function.
        name:   String,
        /// The number of parameters without defaults.
        needed: usize,
        /// The number of arguments supplied.
        given:  usize,
    },
    /// More arguments than declared parameters.
    TooManyArguments {
        /// The display name of the function.
        name:   String,
        /// The total number of declared parameters.
        needed: usize,
        /// The number of arguments supplied.
        given:  usize,
    },
    /// A single loop ran more iterations than the safety cap allows.
    IterationLimitExceeded {
        /// The configured cap.
        limit: usize,
    },
    /// Function calls nested deeper than the safety cap allows.
    RecursionLimitExceeded {
        /// The configured cap.
        limit: usize,
    },
    /// `return` outside a function, or `break`/`continue` outside a loop.
    MisplacedControl {
        /// The keyword that appeared in the wrong place.
        keyword: String,
    },
    /// A `{...}` interpolation segment inside a string failed to parse.
    InvalidInterpolation {
        /// What went wrong inside the segment.
        details: String,
    },
    /// An `assert(...)` call received a falsy value.
    AssertionFailed,
}

impl std::fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name } => write!(f, "'{name}' is not defined"),
            Self::IllegalOperation { details } => write!(f, "Illegal operation: {details}"),
            Self::TypeError { details } => write!(f, "Type error: {details}"),
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::IndexOutOfRange { index, length } => {
                write!(f, "Index {index} out of range for length {length}")
            },
            Self::Overflow => write!(f, "Integer overflow while computing result"),
            Self::LiteralTooLarge => {
                write!(f, "Integer is too large to be used in float arithmetic")
            },
            Self::NotCallable { type_name } => write!(f, "Value of type {type_name} is not callable"),
            Self::TooFewArguments { name, needed, given } => {
                write!(f, "Too few args passed into '{name}': needed {needed}, given {given}")
            },
            Self::TooManyArguments { name, needed, given } => {
                write!(f, "Too many args passed into '{name}': needed {needed}, given {given}")
            },
            Self::IterationLimitExceeded { limit } => {
                write!(f, "Loop exceeded the maximum of {limit} iterations")
            },
            Self::RecursionLimitExceeded { limit } => {
                write!(f, "Calls nested deeper than the maximum of {limit}")
            },
            Self::MisplacedControl { keyword } => {
                write!(f, "'{keyword}' is not valid in this position")
            },
            Self::InvalidInterpolation { details } => {
                write!(f, "Invalid interpolation: {details}")
            },
            Self::AssertionFailed => write!(f, "Assertion failed"),
        }
    }
}

/// Represents an error raised during evaluation, together with the source
/// region it points at and the call chain that was active when it was
/// raised.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    /// What went wrong.
    pub kind:  RuntimeErrorKind,
    /// The source region where it went wrong.
    pub span:  Span,
    /// The call chain, oldest frame first. Filled in by the interpreter at
    /// the failure point; empty until then.
    pub trace: Vec<TraceFrame>,
}

impl RuntimeError {
    /// Creates an error with no captured call chain yet.
    #[must_use]
    pub const fn new(kind: RuntimeErrorKind, span: Span) -> Self {
        Self { kind,
               span,
               trace: Vec::new() }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Runtime Error on line {}: {}.",
               self.span.start.line + 1,
               self.kind)
    }
}

impl std::error::Error for RuntimeError {}
