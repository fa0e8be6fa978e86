//! # moss
//!
//! moss is a small, dynamically typed scripting language implemented as a
//! tree-walking interpreter. The crate turns source text into tokens,
//! tokens into an abstract syntax tree, and the tree into a computed
//! result, with full positional error reporting and call-stack tracebacks.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::core::parse},
    span::Source,
};

pub use crate::interpreter::value::core::Value;

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The
/// AST is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source spans to AST nodes for error reporting.
/// - Enables extensible and robust handling of parsed code.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing,
/// parsing, or evaluating code. It standardizes error reporting and
/// carries detailed information about failures, including error kinds,
/// descriptions, and source spans for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches spans, detailed messages and tracebacks for context.
/// - Renders diagnostics with caret-underlined source excerpts.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, environments, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Source positions and spans.
///
/// Tracks byte index, line and column, and maps them back to the source
/// text for diagnostics.
pub mod span;
/// General utilities for safe numeric conversion.
pub mod util;

/// Runs a source through the whole pipeline against an existing
/// interpreter.
///
/// Returns the value of the last evaluated statement, or `None` for an
/// empty program. Reusing the interpreter keeps its global environment, so
/// a REPL can feed inputs one by one and still share state.
///
/// # Errors
/// Returns the first diagnostic any stage produces; later stages do not
/// run.
pub fn run(source: &Source, interpreter: &mut Interpreter) -> Result<Option<Value>, Error> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;
    Ok(interpreter.evaluate(&program)?)
}

/// Returns the final evaluation result after execution.
///
/// This function parses and executes all statements in the provided source
/// string against a fresh interpreter. If execution succeeds, it returns
/// `Ok(())`, printing the last value when `auto_print` is set; otherwise,
/// it returns an error with details about the failure.
///
/// # Errors
/// Returns an error if parsing or evaluation fails, or if any runtime
/// error occurs.
///
/// # Examples
/// ```
/// use moss::get_result;
///
/// // Simple expression: the result will be calculated and no error should occur.
/// let source = "var result = 2 + 2";
/// let res = get_result(source, false);
/// assert!(res.is_ok());
///
/// // Example with an intentional error (unknown variable).
/// let source = "var y = x + 1"; // 'x' is not defined
/// let res = get_result(source, false);
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = Source::new("<script>", source);
    let mut interpreter = Interpreter::new();

    match run(&source, &mut interpreter) {
        Ok(value) => {
            if auto_print && let Some(value) = value {
                println!("{value}");
            }
            Ok(())
        },
        Err(error) => Err(Box::new(error)),
    }
}
