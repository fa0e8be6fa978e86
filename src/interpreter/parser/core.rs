use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logic,
            block::{parse_block, parse_statements},
            statement::{parse_bare_assignment, parse_var_assignment},
            utils::current_span,
        },
    },
    span::Span,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token stream into a program.
///
/// The program is a newline/`;`-separated statement sequence; trailing
/// blank lines are fine, but any leftover tokens after the last statement
/// are a syntax error. The parser never partially succeeds: the first error
/// aborts the parse.
///
/// # Errors
/// Returns the first `ParseError` encountered.
///
/// # Example
/// ```
/// use moss::{
///     interpreter::{lexer::tokenize, parser::core::parse},
///     span::Source,
/// };
///
/// let source = Source::new("<test>", "var x = 1\nx + 2");
/// let tokens = tokenize(&source).unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert_eq!(program.len(), 2);
/// ```
pub fn parse(tokens: &[(Token, Span)]) -> Result<Vec<Statement>, ParseError> {
    let mut iter = tokens.iter().peekable();
    let (statements, _) = parse_statements(&mut iter, None)?;

    match iter.peek() {
        Some((Token::Eof, _)) | None => Ok(statements),
        Some((token, span)) => {
            Err(ParseError::InvalidSyntax { details: format!("Token {token:?} cannot appear after the end of the program"),
                                            span:    *span, })
        },
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. Assignment is the
/// lowest-precedence tier: a `var` declaration or a bare
/// `name = expression` is recognized first, and everything else descends
/// into the logical-operator tier.
///
/// Grammar:
/// ```text
///     expression := "var" IDENTIFIER assign_op expression?
///                 | IDENTIFIER assign_op expression?
///                 | logic
/// ```
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    if let Some((Token::Var, _)) = tokens.peek() {
        return parse_var_assignment(tokens);
    }
    if let Some(assignment) = parse_bare_assignment(tokens)? {
        return Ok(assignment);
    }
    parse_logic(tokens)
}

/// Parses an `if` expression with optional `else` and chained `elif` arms.
///
/// Syntax:
/// ```text
///     if <condition> { <body> }
///     elif <condition> { <body> }
///     else { <body> }
/// ```
/// Arms may be separated by newlines; the lookahead that checks for `elif`
/// and `else` only commits once it actually finds one, so a statement
/// starting on the next line is left alone.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let if_span = current_span(tokens);
    tokens.next(); // consume 'if'

    let mut cases = Vec::new();
    let condition = parse_expression(tokens)?;
    let body = parse_block(tokens)?;
    let mut end_span = body.span();
    cases.push((condition, body));

    let mut else_case = None;

    loop {
        // Peek past separators on a clone; only commit when an arm
        // actually follows.
        let mut lookahead = tokens.clone();
        while let Some((Token::NewLine, _)) = lookahead.peek() {
            lookahead.next();
        }

        match lookahead.peek() {
            Some((Token::Elif, _)) => {
                lookahead.next();
                *tokens = lookahead;
                let condition = parse_expression(tokens)?;
                let body = parse_block(tokens)?;
                end_span = body.span();
                cases.push((condition, body));
            },
            Some((Token::Else, _)) => {
                lookahead.next();
                *tokens = lookahead;
                let body = parse_block(tokens)?;
                end_span = body.span();
                else_case = Some(Box::new(body));
                break;
            },
            _ => break,
        }
    }

    Ok(Expr::If { cases,
                  else_case,
                  span: if_span.to(end_span) })
}
