use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{current_span, parse_identifier},
        },
    },
    span::Span,
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `return` with an optional result expression,
/// - a `break` or `continue`,
/// - an expression used as a statement.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    match tokens.peek() {
        Some((Token::Return, span)) => {
            let span = *span;
            tokens.next();

            // A bare `return` at the end of a line returns null.
            let value = match tokens.peek() {
                Some((Token::NewLine | Token::RBrace | Token::Eof, _)) | None => None,
                _ => Some(parse_expression(tokens)?),
            };
            let span = value.as_ref().map_or(span, |expr| span.to(expr.span()));
            Ok(Statement::Return { value, span })
        },
        Some((Token::Break, span)) => {
            let span = *span;
            tokens.next();
            Ok(Statement::Break { span })
        },
        Some((Token::Continue, span)) => {
            let span = *span;
            tokens.next();
            Ok(Statement::Continue { span })
        },
        _ => {
            let expr = parse_expression(tokens)?;
            let span = expr.span();
            Ok(Statement::Expression { expr, span })
        },
    }
}

/// Parses a `var` declaration or a compound form of one.
///
/// Supported forms:
///
/// - `var name = expression`
/// - `var name += expression` (and `-=`, `*=`, `/=`)
/// - `var name ++` / `var name --`
///
/// Compound operators desugar into an ordinary binary operation over a
/// synthesized read of the same name, so `var x += e` parses identically to
/// `var x = x + e`; the increment forms need no right-hand expression.
pub(in crate::interpreter::parser) fn parse_var_assignment<'a, I>(tokens: &mut Peekable<I>)
                                                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let var_span = current_span(tokens);
    tokens.next(); // consume 'var'

    let (name, name_span) = parse_identifier(tokens)?;
    parse_assignment_tail(tokens, name, name_span, var_span)
}

/// Attempts to parse a bare assignment (`name = expr` and the compound
/// forms, without `var`).
///
/// Performs a limited lookahead on a clone of the stream: only an
/// identifier directly followed by an assignment operator commits to this
/// path, so expressions like `x == 1` or a plain `x` fall through to the
/// ordinary expression grammar untouched.
///
/// # Returns
/// - `Ok(Some(expr))` if an assignment was parsed,
/// - `Ok(None)` if no assignment is present (no tokens consumed).
pub(in crate::interpreter::parser) fn parse_bare_assignment<'a, I>(tokens: &mut Peekable<I>)
                                                                   -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::Equals
                     | Token::PlusEquals
                     | Token::MinusEquals
                     | Token::StarEquals
                     | Token::SlashEquals
                     | Token::PlusPlus
                     | Token::MinusMinus,
                     _)) = lookahead.peek()
        {
            let (name, name_span) = parse_identifier(tokens)?;
            return parse_assignment_tail(tokens, name, name_span, name_span).map(Some);
        }
    }
    Ok(None)
}

/// Parses the operator and right-hand side shared by both assignment forms,
/// desugaring the compound operators.
fn parse_assignment_tail<'a, I>(tokens: &mut Peekable<I>,
                                name: String,
                                name_span: Span,
                                start_span: Span)
                                -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let (value, end_span) = match tokens.next() {
        Some((Token::Equals, _)) => {
            let value = parse_expression(tokens)?;
            let span = value.span();
            (value, span)
        },
        Some((Token::PlusEquals, _)) => compound(tokens, &name, name_span, BinaryOperator::Add)?,
        Some((Token::MinusEquals, _)) => compound(tokens, &name, name_span, BinaryOperator::Sub)?,
        Some((Token::StarEquals, _)) => compound(tokens, &name, name_span, BinaryOperator::Mul)?,
        Some((Token::SlashEquals, _)) => compound(tokens, &name, name_span, BinaryOperator::Div)?,
        Some((Token::PlusPlus, span)) => increment(&name, name_span, *span, BinaryOperator::Add),
        Some((Token::MinusMinus, span)) => increment(&name, name_span, *span, BinaryOperator::Sub),
        Some((token, span)) => {
            return Err(ParseError::InvalidSyntax { details: format!("Expected '=', '+=', '-=', '*=', '/=', '++' or '--', found {token:?}"),
                                                   span:    *span, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { span: name_span }),
    };

    Ok(Expr::Assign { name,
                      value: Box::new(value),
                      span: start_span.to(end_span) })
}

/// Desugars `name <op>= rhs` into `name <op> rhs`.
fn compound<'a, I>(tokens: &mut Peekable<I>,
                   name: &str,
                   name_span: Span,
                   op: BinaryOperator)
                   -> ParseResult<(Expr, Span)>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let rhs = parse_expression(tokens)?;
    let span = name_span.to(rhs.span());
    let read = Expr::Variable { name: name.to_string(),
                                span: name_span };
    Ok((Expr::BinaryOp { left: Box::new(read),
                         op,
                         right: Box::new(rhs),
                         span },
        span))
}

/// Desugars `name ++` / `name --` into `name <op> 1`.
fn increment(name: &str, name_span: Span, op_span: Span, op: BinaryOperator) -> (Expr, Span) {
    let span = name_span.to(op_span);
    let read = Expr::Variable { name: name.to_string(),
                                span: name_span };
    let one = Expr::Literal { value: LiteralValue::Int(1),
                              span:  op_span, };
    (Expr::BinaryOp { left: Box::new(read),
                      op,
                      right: Box::new(one),
                      span },
     span)
}
