use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_factor},
    },
    span::Span,
};

/// Parses logical expressions, the lowest non-assignment tier.
///
/// Handles left-associative chains of `&&` and `||`.
///
/// Grammar: `logic := not (("&&" | "||") not)*`
pub fn parse_logic<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_binary_tier(tokens,
                      &[BinaryOperator::And, BinaryOperator::Or],
                      parse_not)
}

/// Parses logical negation.
///
/// `!` is prefix, right-associative and self-recursive, and binds looser
/// than the comparison operators: `!a == b` negates the comparison.
///
/// Grammar: `not := "!" not | comparison`
pub fn parse_not<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    if let Some((Token::Bang, span)) = tokens.peek() {
        let span = *span;
        tokens.next();
        let operand = parse_not(tokens)?;
        let span = span.to(operand.span());
        return Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                                  expr: Box::new(operand),
                                  span });
    }
    parse_comparison(tokens)
}

/// Parses comparison expressions.
///
/// Handles `==`, `!=`, `<`, `>`, `<=` and `>=` as a left fold; chains like
/// `a < b < c` therefore compare the boolean result of the first
/// comparison, they are not range checks.
///
/// Grammar: `comparison := additive (compare_op additive)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_binary_tier(tokens,
                      &[BinaryOperator::Equal,
                        BinaryOperator::NotEqual,
                        BinaryOperator::Less,
                        BinaryOperator::Greater,
                        BinaryOperator::LessEqual,
                        BinaryOperator::GreaterEqual],
                      parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `additive := term (("+" | "-") term)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_binary_tier(tokens,
                      &[BinaryOperator::Add, BinaryOperator::Sub],
                      parse_term)
}

/// Parses multiplication-level expressions: `*`, `/`, `%` and `//`.
///
/// Grammar: `term := factor (("*" | "/" | "%" | "//") factor)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_binary_tier(tokens,
                      &[BinaryOperator::Mul,
                        BinaryOperator::Div,
                        BinaryOperator::Mod,
                        BinaryOperator::Quo],
                      parse_factor)
}

/// The generic left-fold all binary tiers share.
///
/// Folds `sub_parser (op sub_parser)*` into a left-leaning tree, accepting
/// only the operators in `allowed`. The node span covers both operands.
pub(in crate::interpreter::parser) fn parse_binary_tier<'a, I>(
    tokens: &mut Peekable<I>,
    allowed: &[BinaryOperator],
    sub_parser: impl Fn(&mut Peekable<I>) -> ParseResult<Expr>)
    -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut left = sub_parser(tokens)?;

    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && allowed.contains(&op)
        {
            tokens.next();
            let right = sub_parser(tokens)?;
            let span = left.span().to(right.span());
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    span };
            continue;
        }
        break;
    }

    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not binary operators.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::SlashSlash => Some(BinaryOperator::Quo),
        Token::StarStar => Some(BinaryOperator::Pow),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::AmpAmp => Some(BinaryOperator::And),
        Token::PipePipe => Some(BinaryOperator::Or),
        _ => None,
    }
}
