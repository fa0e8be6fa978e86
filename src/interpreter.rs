/// Lexically-chained variable scopes.
///
/// The environment maps names to values and links to an optional parent;
/// lookup walks outward, assignment writes locally, and reads hand out
/// independent copies of the stored values.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// manages variable state, threads the control-flow signals through every
/// node kind, and produces results. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, closures and control flow.
/// - Reports runtime errors such as division by zero or invalid
///   operations, with full traceback context.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with full spans.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of expressions
/// and statements, via recursive descent with explicit precedence tiers and
/// one token of lookahead.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
/// - Supports arithmetic, control constructs, function definitions, calls,
///   assignments, and more.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation:
/// integers, floats, strings, the boolean/null unit type, lists and
/// functions. It also implements the operator capability set every value
/// answers to, with well-defined rejection for unsupported combinations.
pub mod value;
