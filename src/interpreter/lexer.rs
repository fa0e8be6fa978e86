use logos::{FilterResult, Logos};

use crate::{
    error::ParseError,
    span::{Source, Span},
};

/// Errors raised while scanning, before any token can be produced.
///
/// These are internal to the lexer; [`tokenize`] converts them into
/// [`ParseError`] values carrying full spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexError {
    /// A character outside every recognized class.
    #[default]
    IllegalCharacter,
    /// A string literal ran into the end of the input.
    UnterminatedString,
    /// A `/*` block comment was never closed with `*/`.
    UnterminatedComment,
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Int(i64),
    /// Floating-point literal tokens, such as `3.14` or `2.`.
    ///
    /// At most one decimal point belongs to the literal; a second `.` ends
    /// it early instead of raising an error.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    Float(f64),
    /// String literal tokens, delimited by `"` or `'`.
    ///
    /// Escape sequences: `\n`, `\t`; any other escaped character stands for
    /// itself (so `\\` and `\"` work as expected).
    #[token("\"", scan_string)]
    #[token("'", scan_string)]
    Str(String),
    /// `var`
    #[token("var")]
    Var,
    /// `if`
    #[token("if")]
    If,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `to`
    #[token("to")]
    To,
    /// `step`
    #[token("step")]
    Step,
    /// `in`
    #[token("in")]
    In,
    /// `while`
    #[token("while")]
    While,
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `**`
    #[token("**")]
    StarStar,
    /// `//`
    #[token("//")]
    SlashSlash,
    /// `=`
    #[token("=")]
    Equals,
    /// `+=`
    #[token("+=")]
    PlusEquals,
    /// `-=`
    #[token("-=")]
    MinusEquals,
    /// `*=`
    #[token("*=")]
    StarEquals,
    /// `/=`
    #[token("/=")]
    SlashEquals,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `!`
    #[token("!")]
    Bang,
    /// `&&`
    #[token("&&")]
    AmpAmp,
    /// `||`
    #[token("||")]
    PipePipe,
    /// A lone `&`; always reported as an expected-character error, since
    /// only `&&` is a valid operator.
    #[token("&")]
    Ampersand,
    /// A lone `|`; always reported as an expected-character error, since
    /// only `||` is a valid operator.
    #[token("|")]
    Pipe,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// Statement separators: a line break or `;`.
    ///
    /// Separators are real tokens, not discarded whitespace, because the
    /// parser is newline-sensitive at the statement level.
    #[token("\n")]
    #[token(";")]
    NewLine,
    /// End of the token stream; appended once by [`tokenize`].
    Eof,
    /// `# Comments.`
    #[regex(r"#[^\n\r]*", logos::skip)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[token("/*", scan_block_comment)]
    MultiLineComment,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the literal does not fit into an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a floating-point literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Scans the remainder of a string literal after its opening quote.
///
/// The literal ends at the first unescaped quote of the same kind it was
/// opened with. `\n` and `\t` translate to their control characters; any
/// other escaped character is taken literally. Line breaks inside the
/// literal are allowed.
///
/// # Returns
/// - `Ok(String)`: The unescaped contents of the literal.
/// - `Err(LexError::UnterminatedString)`: If the input ends first.
fn scan_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexError> {
    let quote = lex.slice().as_bytes()[0] as char;
    let mut value = String::new();
    let mut escaped = false;

    for (offset, character) in lex.remainder().char_indices() {
        if escaped {
            match character {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                other => value.push(other),
            }
            escaped = false;
        } else if character == '\\' {
            escaped = true;
        } else if character == quote {
            lex.bump(offset + character.len_utf8());
            return Ok(value);
        } else {
            value.push(character);
        }
    }

    Err(LexError::UnterminatedString)
}

/// Skips a `/* ... */` block comment, newlines included.
///
/// The comment terminates on the first `*/`. Reaching the end of the input
/// without one is a lexical error.
fn scan_block_comment(lex: &mut logos::Lexer<Token>) -> FilterResult<(), LexError> {
    match lex.remainder().find("*/") {
        Some(length) => {
            lex.bump(length + 2);
            FilterResult::Skip
        },
        None => FilterResult::Error(LexError::UnterminatedComment),
    }
}

/// Tokenizes an entire source into `(Token, Span)` pairs.
///
/// Lexing stops at the first error; on success the stream always ends with
/// a single [`Token::Eof`].
///
/// # Errors
/// Returns a [`ParseError`] for an illegal character (reported together
/// with its code point), a lone `&` or `|`, or an unterminated string or
/// block comment.
///
/// # Example
/// ```
/// use moss::{interpreter::lexer::{Token, tokenize}, span::Source};
///
/// let source = Source::new("<test>", "var x = 1");
/// let tokens = tokenize(&source).unwrap();
///
/// assert_eq!(tokens[0].0, Token::Var);
/// assert_eq!(tokens[3].0, Token::Int(1));
/// assert_eq!(tokens.last().unwrap().0, Token::Eof);
/// ```
pub fn tokenize(source: &Source) -> Result<Vec<(Token, Span)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source.text());

    while let Some(result) = lexer.next() {
        let span = source.span(lexer.span());
        match result {
            Ok(Token::Ampersand) => {
                return Err(ParseError::ExpectedCharacter { details: "'&' (after '&')".to_string(),
                                                           span });
            },
            Ok(Token::Pipe) => {
                return Err(ParseError::ExpectedCharacter { details: "'|' (after '|')".to_string(),
                                                           span });
            },
            Ok(token) => tokens.push((token, span)),
            Err(LexError::UnterminatedString) => {
                return Err(ParseError::UnterminatedString { span });
            },
            Err(LexError::UnterminatedComment) => {
                return Err(ParseError::UnterminatedComment { span });
            },
            Err(LexError::IllegalCharacter) => {
                let character = source.text()[lexer.span()].chars().next().unwrap_or('\0');
                return Err(ParseError::IllegalCharacter { character, span });
            },
        }
    }

    let end = source.position(source.text().len());
    tokens.push((Token::Eof, Span { start: end, end }));

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<Token> {
        let source = Source::new("<test>", text);
        tokenize(&source).unwrap()
                         .into_iter()
                         .map(|(token, _)| token)
                         .collect()
    }

    #[test]
    fn numbers_keep_their_kind() {
        assert_eq!(kinds("3")[0], Token::Int(3));
        assert_eq!(kinds("3.0")[0], Token::Float(3.0));
        assert_eq!(kinds("2.")[0], Token::Float(2.0));
    }

    #[test]
    fn compound_operators_win_over_single_ones() {
        assert_eq!(kinds("**")[0], Token::StarStar);
        assert_eq!(kinds("//")[0], Token::SlashSlash);
        assert_eq!(kinds("+=")[0], Token::PlusEquals);
        assert_eq!(kinds("++")[0], Token::PlusPlus);
        assert_eq!(kinds("==")[0], Token::EqualEqual);
    }

    #[test]
    fn strings_unescape_and_accept_both_quotes() {
        assert_eq!(kinds(r#""a\tb""#)[0], Token::Str("a\tb".to_string()));
        assert_eq!(kinds(r"'it\'s'")[0], Token::Str("it's".to_string()));
    }

    #[test]
    fn lone_ampersand_is_an_expected_character_error() {
        let source = Source::new("<test>", "1 & 2");
        assert!(matches!(tokenize(&source),
                         Err(ParseError::ExpectedCharacter { .. })));
    }

    #[test]
    fn illegal_characters_are_reported() {
        let source = Source::new("<test>", "1 $ 2");
        assert!(matches!(tokenize(&source),
                         Err(ParseError::IllegalCharacter { character: '$', .. })));
    }

    #[test]
    fn block_comments_tolerate_newlines() {
        let tokens = kinds("1 /* a\nb */ 2");
        assert_eq!(tokens[0], Token::Int(1));
        assert_eq!(tokens[1], Token::Int(2));
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        let source = Source::new("<test>", "1 /* never closed");
        assert!(matches!(tokenize(&source),
                         Err(ParseError::UnterminatedComment { .. })));
    }
}
