use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// A character outside every recognized class.
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// The source region where the error occurred.
        span:      Span,
    },
    /// A character that must be doubled (`&&`, `||`) appeared alone.
    ExpectedCharacter {
        /// Which character was expected, and after what.
        details: String,
        /// The source region where the error occurred.
        span:    Span,
    },
    /// A string literal ran into the end of the input.
    UnterminatedString {
        /// The source region of the opening quote.
        span: Span,
    },
    /// A `/*` block comment was never closed.
    UnterminatedComment {
        /// The source region of the opening `/*`.
        span: Span,
    },
    /// Found an unexpected token while parsing.
    InvalidSyntax {
        /// What the parser expected at this point.
        details: String,
        /// The source region where the error occurred.
        span:    Span,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// The source region at the end of the input.
        span: Span,
    },
}

impl ParseError {
    /// The source region this error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::IllegalCharacter { span, .. }
            | Self::ExpectedCharacter { span, .. }
            | Self::UnterminatedString { span }
            | Self::UnterminatedComment { span }
            | Self::InvalidSyntax { span, .. }
            | Self::UnexpectedEndOfInput { span } => *span,
        }
    }

    /// The diagnostic family name shown in rendered output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IllegalCharacter { .. } => "Illegal Character",
            Self::ExpectedCharacter { .. } => "Expected Character",
            Self::UnterminatedString { .. } => "Unterminated String",
            Self::UnterminatedComment { .. } => "Unterminated Comment",
            Self::InvalidSyntax { .. } => "Invalid Syntax",
            Self::UnexpectedEndOfInput { .. } => "Invalid Syntax",
        }
    }

    /// The detail text shown after the family name.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::IllegalCharacter { character, .. } => {
                format!("'{character}' - code point: {}", *character as u32)
            },
            Self::ExpectedCharacter { details, .. } => details.clone(),
            Self::UnterminatedString { .. } => "string literal is never closed".to_string(),
            Self::UnterminatedComment { .. } => "block comment is never closed".to_string(),
            Self::InvalidSyntax { details, .. } => details.clone(),
            Self::UnexpectedEndOfInput { .. } => "unexpected end of input".to_string(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "{} on line {}: {}.",
               self.name(),
               self.span().start.line + 1,
               self.details())
    }
}

impl std::error::Error for ParseError {}
