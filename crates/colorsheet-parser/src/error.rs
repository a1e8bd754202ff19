//! Parse error type.

use std::fmt;

/// A position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Span {
    /// Computes line and column for a byte offset into `source`.
    pub fn locate(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Error returned when source text does not match the grammar.
///
/// The reported position is the furthest point any alternative reached
/// before failing, which is almost always where the actual mistake is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{span}: expected {expected}, found {found}")]
pub struct ParseError {
    pub span: Span,
    /// Human readable description of the construct that was expected.
    pub expected: String,
    /// Excerpt of the input at the failure position.
    pub found: String,
}

impl ParseError {
    pub(crate) fn new(source: &str, offset: usize, expected: impl Into<String>) -> Self {
        Self {
            span: Span::locate(source, offset),
            expected: expected.into(),
            found: excerpt(&source[offset.min(source.len())..]),
        }
    }
}

fn excerpt(rest: &str) -> String {
    match rest.chars().next() {
        None => "end of input".to_string(),
        Some('\n') => "line break".to_string(),
        Some(_) => {
            let line = rest.lines().next().unwrap_or_default();
            let snippet: String = line.chars().take(16).collect();
            if line.chars().count() > 16 {
                format!("'{}...'", snippet)
            } else {
                format!("'{}'", snippet)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_line() {
        let span = Span::locate("abc", 2);
        assert_eq!((span.line, span.column), (1, 3));
    }

    #[test]
    fn test_locate_after_newlines() {
        let span = Span::locate("a\nbc\nd", 5);
        assert_eq!((span.line, span.column), (3, 1));
    }

    #[test]
    fn test_display_includes_position_and_expectation() {
        let err = ParseError::new("a: #zz", 4, "hex color");
        assert_eq!(err.to_string(), "1:5: expected hex color, found 'zz'");
    }

    #[test]
    fn test_found_end_of_input() {
        let err = ParseError::new("a", 1, "':'");
        assert_eq!(err.found, "end of input");
    }
}
