use crate::{
    error::{Error, ParseError, RuntimeError},
    span::{Source, Span},
};

/// Reproduces the source line(s) a span covers, with a `^` underline
/// aligned to the column range.
///
/// Multi-line spans underline the tail of the first line, every full middle
/// line, and the head of the last line. Tabs are widened to single spaces
/// so the caret column stays aligned.
#[must_use]
pub fn underline(source: &Source, span: Span) -> String {
    let mut result = String::new();
    let line_count = span.end.line - span.start.line + 1;

    for offset in 0..line_count {
        let line_number = span.start.line + offset;
        let line = source.line(line_number).replace('\t', " ");

        let column_start = if offset == 0 { span.start.column } else { 0 };
        let column_end = if offset == line_count - 1 {
            span.end.column
        } else {
            line.chars().count()
        };
        let width = column_end.saturating_sub(column_start).max(1);

        result.push_str(&line);
        result.push('\n');
        result.push_str(&" ".repeat(column_start));
        result.push_str(&"^".repeat(width));
        result.push('\n');
    }

    result
}

impl ParseError {
    /// Renders the error as a complete, human-readable diagnostic:
    /// the message, the file/line header and the underlined source excerpt.
    ///
    /// The core never prints; callers decide where the string goes.
    #[must_use]
    pub fn render(&self, source: &Source) -> String {
        let span = self.span();
        format!("{}: {}\nFile {}, line {}\n\n{}",
                self.name(),
                self.details(),
                source.name(),
                span.start.line + 1,
                underline(source, span))
    }
}

impl RuntimeError {
    /// Renders the error with its traceback, oldest call first, followed by
    /// the underlined source excerpt of the failure point.
    #[must_use]
    pub fn render(&self, source: &Source) -> String {
        let mut result = String::from("Traceback (most recent call last):\n");

        for frame in &self.trace {
            result.push_str(&format!("  File {}, line {}, in {}\n",
                                     source.name(),
                                     frame.line + 1,
                                     frame.name));
        }

        result.push_str(&format!("Runtime Error: {}\n\n", self.kind));
        result.push_str(&underline(source, self.span));
        result
    }
}

impl Error {
    /// Renders either error family through its own renderer.
    #[must_use]
    pub fn render(&self, source: &Source) -> String {
        match self {
            Self::Parse(error) => error.render(source),
            Self::Runtime(error) => error.render(source),
        }
    }
}
