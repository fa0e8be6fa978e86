use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement, utils::skip_separators},
    },
    span::Span,
};

/// Parses a block expression delimited by braces.
///
/// A block consists of zero or more statements, optionally separated by
/// newlines or `;`, terminated by `}`. Leading and trailing separators
/// inside the block are ignored.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Errors
/// Returns a `ParseError` if the opening `{` is missing, a statement fails
/// to parse, or the input ends before the closing `}`.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let open_span = match tokens.next() {
        Some((Token::LBrace, span)) => *span,
        Some((token, span)) => {
            return Err(ParseError::InvalidSyntax { details: format!("Expected '{{', found {token:?}"),
                                                   span:    *span, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
    };

    let (statements, close_span) = parse_statements(tokens, Some(&Token::RBrace))?;

    Ok(Expr::Block { statements,
                     span: open_span.to(close_span) })
}

/// Parses a statement sequence up to a terminator.
///
/// With `closing` set, the sequence ends at (and consumes) that token; with
/// `closing` absent, it ends at `Eof`, which is left in the stream so the
/// caller can verify the stream is exhausted. Separators between statements
/// are optional — `var x = 5 while x > 0 { x = x - 1 }` is two statements —
/// and blank lines anywhere in the sequence are skipped.
///
/// # Returns
/// The statements together with the span of the terminator.
pub(in crate::interpreter::parser) fn parse_statements<'a, I>(
    tokens: &mut Peekable<I>,
    closing: Option<&Token>)
    -> ParseResult<(Vec<Statement>, Span)>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut statements = Vec::new();

    loop {
        skip_separators(tokens);
        if let Some(span) = at_terminator(tokens, closing) {
            return Ok((statements, span));
        }
        statements.push(parse_statement(tokens)?);
    }
}

/// Checks for the terminator and consumes it when it is a real token.
///
/// Returns the terminator's span on a hit. `Eof` as terminator is never
/// consumed.
fn at_terminator<'a, I>(tokens: &mut Peekable<I>, closing: Option<&Token>) -> Option<Span>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match (tokens.peek(), closing) {
        (Some((token, span)), Some(closing)) if token == closing => {
            let span = *span;
            tokens.next();
            Some(span)
        },
        (Some((Token::Eof, span)), None) => Some(*span),
        (None, None) => Some(Span::default()),
        _ => None,
    }
}
