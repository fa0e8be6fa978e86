/// Binary operator tiers.
///
/// One parsing function per precedence level, from logic down to
/// multiplication, all built on a shared left-fold combinator
/// parameterized by the allowed operator set.
pub mod binary;
/// Brace-delimited blocks and statement sequences.
///
/// Shared between `{ ... }` bodies and the top level of a program.
pub mod block;
/// Parser entry points.
///
/// `parse` for whole programs, `parse_expression` for single expressions
/// (also used by string interpolation), and the `if`/`elif`/`else` grammar.
pub mod core;
/// Statements and assignment forms.
///
/// `return`/`break`/`continue`, `var` declarations, bare assignments, and
/// the desugaring of the compound assignment operators.
pub mod statement;
/// Atoms, unary operators and postfix operators.
///
/// Literals, variables, grouping, list literals, loops, function
/// definitions, calls, indexing and slicing, plus the sign and power
/// tiers that sit between them and the binary tiers.
pub mod unary;
/// Small parsing helpers shared across the parser.
pub mod utils;
