/// A location in a piece of source text.
///
/// Positions are plain byte/line/column triples and are deliberately small
/// and `Copy`: tokens, AST nodes and diagnostics all carry them by value.
/// Lines and columns are 0-based internally; rendered diagnostics add 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset into the source text.
    pub index:  usize,
    /// 0-based line number.
    pub line:   usize,
    /// 0-based column number within the line.
    pub column: usize,
}

/// A contiguous region of source text, as a start/end position pair.
///
/// Every token and every AST node carries a span; diagnostics reuse them to
/// underline the offending region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// The first position covered by the span.
    pub start: Position,
    /// The position one past the last covered character.
    pub end:   Position,
}

impl Span {
    /// Combines two spans into one covering both.
    ///
    /// # Example
    /// ```
    /// use moss::span::Source;
    ///
    /// let source = Source::new("<test>", "ab cd");
    /// let left = source.span(0..2);
    /// let right = source.span(3..5);
    ///
    /// assert_eq!(left.to(right), source.span(0..5));
    /// ```
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self { start: self.start,
               end:   other.end, }
    }
}

/// A named piece of source text together with its line index.
///
/// The lexer produces spans against a `Source`, and the diagnostic renderer
/// reads the text back out of it. Keeping the text here (rather than inside
/// every position) keeps positions `Copy` while still letting diagnostics
/// quote the offending line.
pub struct Source {
    name:        String,
    text:        String,
    line_starts: Vec<usize>,
}

impl Source {
    /// Creates a source from a display name and its text, precomputing the
    /// byte offset at which every line starts.
    #[must_use]
    pub fn new(name: &str, text: &str) -> Self {
        let mut line_starts = vec![0];
        for (index, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(index + 1);
            }
        }
        Self { name: name.to_string(),
               text: text.to_string(),
               line_starts }
    }

    /// The display name of the source (a file path, `<stdin>`, ...).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Resolves a byte offset to a full [`Position`].
    ///
    /// Offsets past the end of the text resolve onto the last line.
    #[must_use]
    pub fn position(&self, index: usize) -> Position {
        let line = match self.line_starts.binary_search(&index) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        Position { index,
                   line,
                   column: index - self.line_starts[line] }
    }

    /// Resolves a byte range to a [`Span`].
    #[must_use]
    pub fn span(&self, range: std::ops::Range<usize>) -> Span {
        Span { start: self.position(range.start),
               end:   self.position(range.end), }
    }

    /// Returns the text of the given 0-based line, without its newline.
    ///
    /// Out-of-range lines yield an empty string so the renderer never
    /// panics on a stale span.
    #[must_use]
    pub fn line(&self, line: usize) -> &str {
        let Some(&start) = self.line_starts.get(line) else {
            return "";
        };
        let end = self.line_starts
                      .get(line + 1)
                      .map_or(self.text.len(), |next| next - 1);
        &self.text[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_track_lines_and_columns() {
        let source = Source::new("<test>", "ab\ncde\nf");

        assert_eq!(source.position(0),
                   Position { index:  0,
                              line:   0,
                              column: 0, });
        assert_eq!(source.position(4),
                   Position { index:  4,
                              line:   1,
                              column: 1, });
        assert_eq!(source.position(7).line, 2);
    }

    #[test]
    fn lines_are_extracted_without_newlines() {
        let source = Source::new("<test>", "ab\ncde\nf");

        assert_eq!(source.line(0), "ab");
        assert_eq!(source.line(1), "cde");
        assert_eq!(source.line(2), "f");
        assert_eq!(source.line(9), "");
    }
}
