#![doc = include_str!("../README.md")]

use crate::spanned::{Line, LineReader, Span};
use std::fmt::{Display, Formatter};

pub mod spanned;
pub mod token;

/// An error with a location
#[derive(Debug, thiserror::Error)]
pub struct SpannedError<E> {
    error: E,
    location: Option<Location>,
}

impl<E> SpannedError<E> {
    pub fn new(error: E, location: impl Into<Option<Location>>) -> Self {
        Self {
            error,
            location: location.into(),
        }
    }

    /// Gets the inner error
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Gets where in the source this error occurred, if known
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn into_inner(self) -> E {
        self.error
    }
}

impl<E: Display> Display for SpannedError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.error)?;
        if let Some(location) = &self.location {
            writeln!(f, "  -> {}:{}", location.line, location.col + 1)?;
            let width = location
                .excerpt
                .iter()
                .map(|line| line.line)
                .max()
                .unwrap_or(0)
                .to_string()
                .len();
            for line in &location.excerpt {
                writeln!(f, "{:width$} | {}", line.line, line.src.trim_end())?;
                if line.line == location.line {
                    if location.width > 0 {
                        writeln!(
                            f,
                            "{}{}{}",
                            " ".repeat(width + 3),
                            " ".repeat(line.col),
                            "~".repeat(location.width)
                        )?;
                    } else {
                        writeln!(f, "{}{}^", " ".repeat(width + 3), "-".repeat(line.col))?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// A resolved position in some source text, with a few lines of context around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    span: Span,
    line: usize,
    col: usize,
    /// How many chars of the source the span covers
    width: usize,
    excerpt: Vec<Line>,
}

impl Location {
    /// Resolves a span against the source text it was created from
    pub fn resolve(source: &str, span: Span) -> Self {
        let (excerpt, line) = LineReader::new(2, 2).lines(source, &span);
        let (_, col) = span.line_col(source);
        let start = span.offset().min(source.len());
        let end = (span.offset() + span.len()).min(source.len());
        let width = source
            .get(start..end)
            .map_or(span.len(), |text| text.chars().count());
        Self {
            span,
            line,
            col,
            width,
            excerpt,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The 1-based line
    pub fn line(&self) -> usize {
        self.line
    }

    /// The 0-based column
    pub fn col(&self) -> usize {
        self.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[derive(Debug, thiserror::Error)]
    #[error("bad thing")]
    struct BadThing;

    #[test]
    fn test_display_spanned_error() {
        let src = "program p\nbegin\n  x := 12a\nend.";
        let offset = src.find("12a").unwrap();
        let error = SpannedError::new(BadThing, Location::resolve(src, Span::new(offset, 3)));
        let rendered = error.to_string();
        assert!(rendered.starts_with("bad thing\n  -> 3:8\n"), "{rendered}");
        assert!(rendered.contains("3 |   x := 12a\n"), "{rendered}");
        assert!(rendered.contains(&format!("{}~~~\n", " ".repeat(4 + 7))), "{rendered}");
    }

    #[test]
    fn test_underline_counts_chars() {
        let src = "x := café";
        let offset = src.find('é').unwrap();
        let error = SpannedError::new(BadThing, Location::resolve(src, Span::new(offset, 2)));
        let rendered = error.to_string();
        assert!(rendered.ends_with(&format!("1 | x := café\n{}~\n", " ".repeat(4 + 8))), "{rendered}");
    }

    #[test]
    fn test_display_without_location() {
        let error = SpannedError::new(BadThing, None);
        assert_eq!(error.to_string(), "bad thing\n");
    }
}
