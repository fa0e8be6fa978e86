/// Binary, unary, index and slice evaluation.
///
/// Evaluates both operands (propagating signals first), then dispatches to
/// the left operand's operator method by operator kind.
pub mod binary;
/// The built-in function library.
///
/// Registers the standard catalog (`print`, `len`, `sqrt`, list helpers,
/// conversions, introspection, `assert`) and the `true`/`false`/`null`
/// globals through the host-function contract.
pub mod builtins;
/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, the `Flow` signal type, the per-node
/// dispatch, statements, blocks, conditionals and traceback capture.
pub mod core;
/// Function definition and call evaluation.
///
/// Definition-time default evaluation and closure capture; call-time
/// argument checking, binding, call frames and result interpretation for
/// both user-defined functions and built-ins.
pub mod function;
/// Loop evaluation.
///
/// The counted, iterator and conditional loops: per-iteration result
/// accumulation, `break`/`continue` handling and the iteration safety cap.
pub mod loops;
/// String literal evaluation.
///
/// Expands `{...}` interpolation segments by re-lexing, re-parsing and
/// re-evaluating them against the current environment.
pub mod strings;
