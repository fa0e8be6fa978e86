use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
    span::Span,
};

/// Returns the span of the next token without consuming it.
///
/// The stream always ends with `Eof`, so a missing token only happens on a
/// stream that was never tokenized; a default span keeps that case from
/// panicking.
pub(in crate::interpreter::parser) fn current_span<'a, I>(tokens: &mut Peekable<I>) -> Span
    where I: Iterator<Item = &'a (Token, Span)>
{
    tokens.peek().map_or_else(Span::default, |(_, span)| *span)
}

/// Consumes statement separators (newlines and `;`) and returns how many
/// were skipped.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a (Token, Span)>
{
    let mut count = 0;
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
        count += 1;
    }
    count
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals and call argument lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either a
/// comma, to continue the list, or the specified closing token, to end it.
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Returns
/// The parsed items together with the span of the consumed closing token.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<(Vec<T>, Span)>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut items = Vec::new();

    if let Some((token, span)) = tokens.peek()
       && token == closing
    {
        let span = *span;
        tokens.next();
        return Ok((items, span));
    }

    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((token, span)) if token == closing => {
                let span = *span;
                tokens.next();
                return Ok((items, span));
            },
            Some((token, span)) => {
                return Err(ParseError::InvalidSyntax { details: format!("Expected ',' or {closing:?}, found {token:?}"),
                                                       span:    *span, });
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { span: Span::default() });
            },
        }
    }
}

/// Parses a plain identifier and returns its name and span.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Span)>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((Token::Identifier(name), span)) => Ok((name.clone(), *span)),
        Some((token, span)) => {
            Err(ParseError::InvalidSyntax { details: format!("Expected IDENTIFIER, found {token:?}"),
                                            span:    *span, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
    }
}
