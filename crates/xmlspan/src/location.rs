//! Lazy location views over scanned spans.

use crate::span::{SourceSpan, SpanKind};
use std::fmt;
use xmlspan_source_map::{LineIndex, Position, Range};

/// Where a node sits in its source document.
///
/// A `Location` borrows the span, the line table and the source text from
/// the annotator that produced it and computes everything on demand. Lines
/// and columns are 1-based; offsets are 0-based byte offsets.
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    span: &'a SourceSpan,
    lines: &'a LineIndex,
    source: &'a str,
}

impl<'a> Location<'a> {
    pub fn new(span: &'a SourceSpan, lines: &'a LineIndex, source: &'a str) -> Self {
        Self {
            span,
            lines,
            source,
        }
    }

    pub fn start_line(&self) -> usize {
        self.lines.line_of(self.start_offset()) + 1
    }

    pub fn start_column(&self) -> usize {
        self.lines.column_of(self.start_offset()) + 1
    }

    pub fn start_offset(&self) -> usize {
        self.span.start
    }

    pub fn end_line(&self) -> usize {
        self.lines.line_of(self.end_offset()) + 1
    }

    pub fn end_column(&self) -> usize {
        self.lines.column_of(self.end_offset()) + 1
    }

    /// Offset just past the node; the end of the document if the node was
    /// never terminated.
    pub fn end_offset(&self) -> usize {
        self.span.end_or(self.source.len())
    }

    /// The source text of the node.
    ///
    /// With `head_only`, an element yields just its open tag (`<a x="1">`);
    /// other nodes always yield their full text.
    ///
    /// ```rust
    /// use xmlspan::Annotator;
    ///
    /// let annotator = Annotator::scan_only("<Foo a=\"1\">\n  <Bar/>\n</Foo>").unwrap();
    /// let foo = annotator.span_location(0).unwrap();
    /// assert_eq!(foo.text(true), "<Foo a=\"1\">");
    /// assert_eq!(foo.text(false), "<Foo a=\"1\">\n  <Bar/>\n</Foo>");
    /// ```
    pub fn text(&self, head_only: bool) -> &'a str {
        let doc_len = self.source.len();
        let end = if head_only {
            self.span.head_end_or(doc_len)
        } else {
            self.span.end_or(doc_len)
        };
        &self.source[self.span.start..end]
    }

    pub fn kind(&self) -> SpanKind {
        self.span.kind
    }

    pub fn span(&self) -> &'a SourceSpan {
        self.span
    }

    /// Start as a 0-based [`Position`].
    pub fn start(&self) -> Position {
        self.lines.position(self.start_offset())
    }

    /// End as a 0-based [`Position`].
    pub fn end(&self) -> Position {
        self.lines.position(self.end_offset())
    }

    pub fn range(&self) -> Range {
        Range {
            start: self.start(),
            end: self.end(),
        }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.start_line(), self.start_column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    #[test]
    fn test_one_based_lines_and_columns() {
        let source = "<a>\n  <b/>\n</a>";
        let out = scan(source).unwrap();

        let b = out
            .spans
            .iter()
            .find(|s| s.kind == SpanKind::Element && s.start == 6)
            .unwrap();
        let loc = Location::new(b, &out.lines, source);
        assert_eq!((loc.start_line(), loc.start_column()), (2, 3));
        assert_eq!((loc.end_line(), loc.end_column()), (2, 7));
        assert_eq!(loc.text(false), "<b/>");
        assert_eq!(loc.text(true), "<b/>");
        assert_eq!(loc.to_string(), "line 2, column 3");
        assert_eq!(loc.span(), b);
        assert_eq!(loc.span().head_end, Some(10));
    }

    #[test]
    fn test_zero_based_positions() {
        let source = "<a>\n  <b/>\n</a>";
        let out = scan(source).unwrap();
        let loc = Location::new(&out.spans[0], &out.lines, source);

        assert_eq!(loc.start(), Position { offset: 0, row: 0, column: 0 });
        assert_eq!(
            loc.end(),
            Position {
                offset: source.len(),
                row: 2,
                column: 4
            }
        );
        assert_eq!(loc.range().len(), source.len());
    }

    #[test]
    fn test_unterminated_span_runs_to_end() {
        let source = "<a/><!-- open\nstill open";
        let out = scan(source).unwrap();
        let loc = Location::new(&out.spans[1], &out.lines, source);

        assert_eq!(loc.end_offset(), source.len());
        assert_eq!(loc.text(true), "<!-- open\nstill open");
        assert_eq!(loc.end_line(), 2);
    }
}
