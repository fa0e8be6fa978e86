/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of
/// source code. Parse errors include illegal characters, unterminated
/// strings and comments, and unexpected tokens, each carrying the source
/// span it points at.
pub mod parse_error;
/// Diagnostic rendering.
///
/// Turns errors into human-readable strings: the offending source line(s)
/// with a caret underline, and for runtime errors a traceback of the call
/// chain. Rendering is the only place that needs the source text back.
pub mod render;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include division by zero, type mismatches, invalid operations and
/// out-of-range accesses, and carry the call chain active at the failure
/// point.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::{RuntimeError, RuntimeErrorKind, TraceFrame};

/// Either family of diagnostic the pipeline can produce.
///
/// Lexing and parsing yield [`ParseError`]; evaluation yields
/// [`RuntimeError`]. Both render through [`Error::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A lexical or syntax error.
    Parse(ParseError),
    /// An evaluation error, with traceback.
    Runtime(RuntimeError),
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(error) => error.fmt(f),
            Self::Runtime(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for Error {}
