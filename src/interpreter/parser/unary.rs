use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, FunctionDef, LiteralValue, ParamDef, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression, parse_if},
            utils::{current_span, parse_comma_separated, parse_identifier},
        },
    },
    span::Span,
};

/// Parses a signed factor.
///
/// The unary sign operators are prefix and right-associative, and bind
/// looser than `**`, so `-2 ** 2` is `-(2 ** 2)`. A unary `+` is the
/// identity and produces no node of its own.
///
/// Grammar:
/// ```text
///     factor := ("+" | "-") factor
///             | power
/// ```
pub(crate) fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    match tokens.peek() {
        Some((Token::Minus, span)) => {
            let span = *span;
            tokens.next();
            let operand = parse_factor(tokens)?;
            let span = span.to(operand.span());
            Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                               expr: Box::new(operand),
                               span })
        },
        Some((Token::Plus, _)) => {
            tokens.next();
            parse_factor(tokens)
        },
        _ => parse_power(tokens),
    }
}

/// Parses exponentiation.
///
/// `**` is right-associative: the right operand re-enters at the factor
/// tier, so `2 ** 3 ** 2` is `2 ** (3 ** 2)` and `2 ** -1` parses without
/// parentheses.
///
/// Grammar: `power := call ("**" factor)*`
fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut left = parse_call(tokens)?;

    while let Some((Token::StarStar, _)) = tokens.peek() {
        tokens.next();
        let right = parse_factor(tokens)?;
        let span = left.span().to(right.span());
        left = Expr::BinaryOp { left: Box::new(left),
                                op: BinaryOperator::Pow,
                                right: Box::new(right),
                                span };
    }

    Ok(left)
}

/// Parses an atom followed by its postfix operators.
///
/// Two postfix constructs chain freely after any atom:
///
/// 1. **Calls**: `expr(arg1, arg2, ...)`
/// 2. **Indexing and slicing**: `expr[i]`, `expr[a:b]`, `expr[:b]`,
///    `expr[a:]`, `expr[:]`
///
/// Grammar:
/// ```text
///     call := atom postfix*
///     postfix := "(" arguments ")"
///              | "[" expression? (":" expression?)? "]"
/// ```
fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut node = parse_atom(tokens)?;

    loop {
        match tokens.peek() {
            Some((Token::LParen, _)) => {
                tokens.next();
                let (arguments, close_span) =
                    parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                let span = node.span().to(close_span);
                node = Expr::Call { callee: Box::new(node),
                                    arguments,
                                    span };
            },
            Some((Token::LBracket, _)) => {
                node = parse_subscript(tokens, node)?;
            },
            _ => break,
        }
    }

    Ok(node)
}

/// Parses one `[...]` suffix into an index or slice node.
///
/// A `:` anywhere inside the brackets makes it a slice; either bound may be
/// omitted to mean "from the start" / "to the end".
fn parse_subscript<'a, I>(tokens: &mut Peekable<I>, target: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    tokens.next(); // consume '['

    // "[:"  or  "[expr"
    let start = match tokens.peek() {
        Some((Token::Colon, _)) => None,
        _ => Some(Box::new(parse_expression(tokens)?)),
    };

    match tokens.next() {
        Some((Token::RBracket, close_span)) => match start {
            Some(index) => {
                let span = target.span().to(*close_span);
                Ok(Expr::Index { target: Box::new(target),
                                 index,
                                 span })
            },
            // "[]" without an index is not a valid access.
            None => {
                Err(ParseError::InvalidSyntax { details: "Expected an index or slice expression"
                                                             .to_string(),
                                                span:    *close_span, })
            },
        },
        Some((Token::Colon, _)) => {
            let end = match tokens.peek() {
                Some((Token::RBracket, _)) => None,
                _ => Some(Box::new(parse_expression(tokens)?)),
            };
            match tokens.next() {
                Some((Token::RBracket, close_span)) => {
                    let span = target.span().to(*close_span);
                    Ok(Expr::Slice { target: Box::new(target),
                                     start,
                                     end,
                                     span })
                },
                Some((token, span)) => {
                    Err(ParseError::InvalidSyntax { details: format!("Expected ']', found {token:?}"),
                                                    span:    *span, })
                },
                None => Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
            }
        },
        Some((token, span)) => {
            Err(ParseError::InvalidSyntax { details: format!("Expected ']' or ':', found {token:?}"),
                                            span:    *span, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include
/// literals, identifiers, parenthesized expressions, list literals and the
/// control constructs that are themselves expressions (`if`, `for`,
/// `while`, `func`).
fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let Some((token, span)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { span: Span::default() });
    };
    let span = *span;

    match token {
        Token::Int(value) => {
            let value = *value;
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Int(value),
                               span })
        },
        Token::Float(value) => {
            let value = *value;
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Float(value),
                               span })
        },
        Token::Str(value) => {
            let value = value.clone();
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Str(value),
                               span })
        },
        Token::Identifier(name) => {
            let name = name.clone();
            tokens.next();
            Ok(Expr::Variable { name, span })
        },
        Token::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(expr),
                Some((token, span)) => {
                    Err(ParseError::InvalidSyntax { details: format!("Expected ')', found {token:?}"),
                                                    span:    *span, })
                },
                None => Err(ParseError::UnexpectedEndOfInput { span }),
            }
        },
        Token::LBracket => {
            tokens.next();
            let (elements, close_span) =
                parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Expr::ListLiteral { elements,
                                   span: span.to(close_span) })
        },
        Token::If => parse_if(tokens),
        Token::For => parse_for(tokens),
        Token::While => parse_while(tokens),
        Token::Func => parse_func_def(tokens),
        Token::Eof => Err(ParseError::UnexpectedEndOfInput { span }),
        token => {
            Err(ParseError::InvalidSyntax { details: format!("Expected INT, FLOAT, STRING, IDENTIFIER, '+', '-', '!', '(', '[', 'if', 'for', 'while' or 'func', found {token:?}"),
                                            span })
        },
    }
}

/// Parses a `for` loop, in either of its two forms.
///
/// Counted: `for name = start to end [step s] { body }` — the loop counts
/// from `start` (inclusive) to `end` (exclusive).
/// Iterator: `for name in iterable { body }`.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let for_span = current_span(tokens);
    tokens.next(); // consume 'for'

    let (var, _) = parse_identifier(tokens)?;

    match tokens.next() {
        Some((Token::Equals, _)) => {
            let start = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::To, _)) => {},
                Some((token, span)) => {
                    return Err(ParseError::InvalidSyntax { details: format!("Expected 'to', found {token:?}"),
                                                           span:    *span, });
                },
                None => return Err(ParseError::UnexpectedEndOfInput { span: for_span }),
            }
            let end = parse_expression(tokens)?;

            let step = if let Some((Token::Step, _)) = tokens.peek() {
                tokens.next();
                Some(Box::new(parse_expression(tokens)?))
            } else {
                None
            };

            let body = parse_block(tokens)?;
            let span = for_span.to(body.span());
            Ok(Expr::ForCounted { var,
                                  start: Box::new(start),
                                  end: Box::new(end),
                                  step,
                                  body: Box::new(body),
                                  span })
        },
        Some((Token::In, _)) => {
            let iterable = parse_expression(tokens)?;
            let body = parse_block(tokens)?;
            let span = for_span.to(body.span());
            Ok(Expr::ForIn { var,
                             iterable: Box::new(iterable),
                             body: Box::new(body),
                             span })
        },
        Some((token, span)) => {
            Err(ParseError::InvalidSyntax { details: format!("Expected '=' or 'in' after the loop variable, found {token:?}"),
                                            span:    *span, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { span: for_span }),
    }
}

/// Parses a `while` loop: `while condition { body }`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let while_span = current_span(tokens);
    tokens.next(); // consume 'while'

    let condition = parse_expression(tokens)?;
    let body = parse_block(tokens)?;
    let span = while_span.to(body.span());

    Ok(Expr::While { condition: Box::new(condition),
                     body: Box::new(body),
                     span })
}

/// Parses a function definition.
///
/// Forms:
/// ```text
///     func name(params) { body }     // block body, explicit return
///     func name(params): expression  // auto-return body
///     func (params) { body }         // anonymous, either body kind
/// ```
/// Parameters may carry `= expr` defaults; a parameter without a default
/// may not follow one with a default, since arguments bind left to right.
fn parse_func_def<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let func_span = current_span(tokens);
    tokens.next(); // consume 'func'

    let name = if let Some((Token::Identifier(name), _)) = tokens.peek() {
        let name = name.clone();
        tokens.next();
        Some(name)
    } else {
        None
    };

    match tokens.next() {
        Some((Token::LParen, _)) => {},
        Some((token, span)) => {
            let expected = if name.is_some() { "'('" } else { "IDENTIFIER or '('" };
            return Err(ParseError::InvalidSyntax { details: format!("Expected {expected}, found {token:?}"),
                                                   span:    *span, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { span: func_span }),
    }

    let params = parse_params(tokens)?;

    match tokens.peek() {
        Some((Token::Colon, _)) => {
            tokens.next();
            let body = parse_expression(tokens)?;
            let span = func_span.to(body.span());
            Ok(Expr::FuncDef { def: FunctionDef { name,
                                                  params,
                                                  body: Box::new(body),
                                                  auto_return: true },
                               span })
        },
        Some((Token::LBrace, _)) => {
            let body = parse_block(tokens)?;
            let span = func_span.to(body.span());
            Ok(Expr::FuncDef { def: FunctionDef { name,
                                                  params,
                                                  body: Box::new(body),
                                                  auto_return: false },
                               span })
        },
        Some((token, span)) => {
            Err(ParseError::InvalidSyntax { details: format!("Expected ':' or '{{' after the parameter list, found {token:?}"),
                                            span:    *span, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { span: func_span }),
    }
}

/// Parses the parameter list of a function definition, enforcing that
/// defaulted parameters trail the required ones.
fn parse_params<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<ParamDef>>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut params: Vec<ParamDef> = Vec::new();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(params);
    }

    loop {
        let (name, name_span) = parse_identifier(tokens)?;

        let default = if let Some((Token::Equals, _)) = tokens.peek() {
            tokens.next();
            Some(parse_expression(tokens)?)
        } else {
            if params.iter().any(|param| param.default.is_some()) {
                return Err(ParseError::InvalidSyntax { details: format!("Parameter '{name}' without a default cannot follow defaulted parameters"),
                                                       span:    name_span, });
            }
            None
        };

        params.push(ParamDef { name, default });

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => break,
            Some((token, span)) => {
                return Err(ParseError::InvalidSyntax { details: format!("Expected ',' or ')', found {token:?}"),
                                                       span:    *span, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { span: name_span }),
        }
    }

    Ok(params)
}
