//! A trait that can provide the [Span] of a token, along with helpers for getting the source
//! lines around a span

/// A trait that can provide the [Span] of the complete context of some item
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A byte range within a source text
#[derive(Debug, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Span {
    offset: usize,
    len: usize,
}

impl Span {
    /// Creates a new span
    pub const fn new(start: usize, len: usize) -> Self {
        Self { offset: start, len }
    }

    /// Gets a span directly after this span
    pub const fn end(&self) -> Self {
        Self {
            offset: self.offset + self.len,
            len: 0,
        }
    }

    /// Gets the 1-based line and 0-based column (in chars) of this span within `source`
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = floor_char_boundary(source, self.offset);
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let col = before
            .rfind('\n')
            .map(|nl| &before[nl + 1..])
            .unwrap_or(before)
            .chars()
            .count();
        (line, col)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// A line reader struct that's responsible for getting lines from a span
#[derive(Debug, Default)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a span and `after` number
    /// of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Gets the lines of `source` around a given span, plus the base line index
    pub fn lines(&self, source: &str, span: &Span) -> (Vec<Line>, usize) {
        let (base_line, base_col) = span.line_col(source);
        let range = base_line.saturating_sub(self.before)..=base_line.saturating_add(self.after);

        let mut lines = vec![];
        for (idx, src) in source.split('\n').enumerate() {
            let line_n = idx + 1;
            if range.contains(&line_n) {
                lines.push(Line {
                    line: line_n,
                    col: if line_n == base_line { base_col } else { 0 },
                    src: src.to_string(),
                });
            }
        }

        (lines, base_line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub line: usize,
    pub col: usize,
    pub src: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_span_end() {
        let p = Span::new(0, 5).end();
        assert_eq!(p.offset, 5);
        assert_eq!(p.len, 0);
    }

    #[test]
    fn test_line_col() {
        let src = "program p\nbegin\n  x := 1\nend.";
        let x = src.find('x').unwrap();
        assert_eq!(Span::new(x, 1).line_col(src), (3, 2));
        assert_eq!(Span::new(0, 7).line_col(src), (1, 0));
        assert_eq!(Span::new(src.len(), 0).line_col(src), (4, 4));
    }

    #[test]
    fn test_line_reader() {
        let src = "a\nb\nc\nd\ne\nf";
        let span = Span::new(src.find('d').unwrap(), 1);
        let (lines, base) = LineReader::new(1, 1).lines(src, &span);
        assert_eq!(base, 4);
        assert_eq!(
            lines.iter().map(|l| l.src.as_str()).collect::<Vec<_>>(),
            vec!["c", "d", "e"]
        );
        assert_eq!(lines[1].col, 0);
        assert_eq!(lines[0].line, 3);
    }
}
