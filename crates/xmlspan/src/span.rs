//! Source spans recorded by the scanner.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of markup construct a [`SourceSpan`] covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanKind {
    /// `<tag ...>...</tag>` or `<tag .../>`
    Element,
    /// `<?target ...?>`
    ProcessingInstruction,
    /// `<!-- ... -->`
    Comment,
    /// `<![CDATA[ ... ]]>`
    CdataSection,
    /// A run of character data between two markup constructs.
    Text,
    /// `<!NAME ...>` other than a comment or CDATA section, e.g. `<!DOCTYPE>`.
    Declaration,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Element => "element",
            SpanKind::ProcessingInstruction => "processing-instruction",
            SpanKind::Comment => "comment",
            SpanKind::CdataSection => "cdata",
            SpanKind::Text => "text",
            SpanKind::Declaration => "declaration",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The byte range of one markup construct in the source text.
///
/// `start <= head_end <= end <= source.len()` whenever the optional
/// offsets are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Rank in scan order.
    pub sequence: usize,

    pub kind: SpanKind,

    /// Offset of the construct's first character (`<` for markup).
    pub start: usize,

    /// For elements, the offset just past the `>` (or `/>`) that ends the
    /// open-tag head. Always `None` for other kinds.
    pub head_end: Option<usize>,

    /// Offset just past the construct's closing point. `None` means the
    /// construct runs to the end of the document.
    pub end: Option<usize>,
}

impl SourceSpan {
    pub(crate) fn open(sequence: usize, kind: SpanKind, start: usize) -> Self {
        Self {
            sequence,
            kind,
            start,
            head_end: None,
            end: None,
        }
    }

    /// True for an element written as `<tag/>`.
    pub fn is_self_closing(&self) -> bool {
        self.kind == SpanKind::Element && self.head_end.is_some() && self.head_end == self.end
    }

    /// End offset, falling back to `doc_len` when the construct is unterminated.
    pub fn end_or(&self, doc_len: usize) -> usize {
        self.end.unwrap_or(doc_len)
    }

    /// End of the open-tag head, falling back to the end of the construct.
    pub fn head_end_or(&self, doc_len: usize) -> usize {
        self.head_end.unwrap_or_else(|| self.end_or(doc_len))
    }

    /// Whether `offset` lies within `[start, end)`.
    pub fn encloses(&self, offset: usize, doc_len: usize) -> bool {
        self.start <= offset && offset < self.end_or(doc_len)
    }
}
