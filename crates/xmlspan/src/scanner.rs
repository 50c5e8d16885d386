//! Single-pass boundary scanner.
//!
//! The scanner does not parse XML. It walks the raw text once, finds where
//! every tag, comment, CDATA section, processing instruction, declaration and
//! text run begins and ends, and records the offset of every line start on
//! the way. The text is assumed to be well-formed; it has normally been
//! accepted by a real parser before it gets here.

use crate::error::{Error, Result};
use crate::span::{SourceSpan, SpanKind};
use memchr::{memchr2, memchr3, memmem};
use tracing::{debug, trace};
use xmlspan_source_map::LineIndex;

/// Everything recorded by one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutput {
    /// Spans in scan order, which is pre-order by start offset.
    pub spans: Vec<SourceSpan>,

    /// Line table of the scanned text.
    pub lines: LineIndex,
}

/// Scan `source` and record the span of every markup construct.
///
/// # Example
///
/// ```rust
/// use xmlspan::{scan, SpanKind};
///
/// let out = scan("<A><B/></A>").unwrap();
/// assert_eq!(out.spans.len(), 2);
/// assert_eq!(out.spans[1].kind, SpanKind::Element);
/// assert_eq!(out.spans[1].start, 3);
/// ```
///
/// # Errors
///
/// Fails on a close tag with no open element to close, or on an element
/// that is still open when the text ends.
pub fn scan(source: &str) -> Result<ScanOutput> {
    Scanner::new(source).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside `<tag ...` or `<!DECL ...`, before its `>`.
    OpenTagHead,
    CloseTag,
    SingleQuoted,
    DoubleQuoted,
    Comment,
    CdataSection,
    /// Inside `<?target ...`, before its `?>`.
    ProcessingInstruction,
}

/// Stack of open elements (indices into the span list).
///
/// The bottom entry is a sentinel meaning "no enclosing element"; it is never
/// removed.
#[derive(Debug)]
struct OpenStack {
    entries: Vec<Option<usize>>,
}

impl OpenStack {
    fn new() -> Self {
        Self {
            entries: vec![None],
        }
    }

    fn push(&mut self, index: usize) {
        self.entries.push(Some(index));
    }

    /// Remove and return the innermost open element, or `None` if only the
    /// sentinel is left.
    fn pop(&mut self) -> Option<usize> {
        if self.is_balanced() {
            return None;
        }
        self.entries.pop().flatten()
    }

    /// The innermost open element, without removing it.
    fn peek(&self) -> Option<usize> {
        self.entries.last().copied().flatten()
    }

    fn is_balanced(&self) -> bool {
        self.entries.len() == 1
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: ScanState,

    /// Start of the pending text run.
    text_start: usize,

    /// Offset of the `<` that opened the construct being scanned.
    markup_start: usize,

    /// Span whose head or body is being scanned (not set for close tags).
    current: Option<usize>,

    /// `[` nesting inside a declaration's internal subset.
    subset_depth: usize,

    open: OpenStack,
    spans: Vec<SourceSpan>,
    line_starts: Vec<usize>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
            state: ScanState::Normal,
            text_start: 0,
            markup_start: 0,
            current: None,
            subset_depth: 0,
            open: OpenStack::new(),
            spans: Vec::new(),
            line_starts: vec![0],
        }
    }

    fn run(mut self) -> Result<ScanOutput> {
        while self.skip_inert() {
            match self.bytes[self.pos] {
                b'\n' => {
                    self.pos += 1;
                    self.line_starts.push(self.pos);
                }
                b'\r' => {
                    self.pos += 1;
                    if self.peek(0) == Some(b'\n') {
                        self.pos += 1;
                    }
                    self.line_starts.push(self.pos);
                }
                byte => self.step(byte)?,
            }
        }
        self.finish()
    }

    /// Advance to the next byte that can change state in the current state.
    /// Returns false once the end of the input is reached.
    fn skip_inert(&mut self) -> bool {
        let rest = &self.bytes[self.pos..];
        let found = match self.state {
            ScanState::Normal => memchr3(b'<', b'\n', b'\r', rest),
            ScanState::Comment => memchr3(b'-', b'\n', b'\r', rest),
            ScanState::CdataSection => memchr3(b']', b'\n', b'\r', rest),
            ScanState::ProcessingInstruction => memchr3(b'?', b'\n', b'\r', rest),
            ScanState::SingleQuoted => memchr3(b'\'', b'\n', b'\r', rest),
            ScanState::DoubleQuoted => memchr3(b'"', b'\n', b'\r', rest),
            ScanState::OpenTagHead | ScanState::CloseTag => return !rest.is_empty(),
        };
        match found {
            Some(skip) => {
                self.pos += skip;
                true
            }
            None => {
                self.pos = self.bytes.len();
                false
            }
        }
    }

    fn step(&mut self, byte: u8) -> Result<()> {
        match (self.state, byte) {
            (ScanState::Normal, b'<') => self.begin_markup(),

            (ScanState::OpenTagHead, b'"') => self.shift(ScanState::DoubleQuoted),
            (ScanState::OpenTagHead, b'\'') => self.shift(ScanState::SingleQuoted),
            (ScanState::DoubleQuoted, b'"') | (ScanState::SingleQuoted, b'\'') => {
                self.shift(ScanState::OpenTagHead)
            }

            // <tag a="1"/>
            (ScanState::OpenTagHead, b'/')
                if self.current_kind() == Some(SpanKind::Element) && self.peek(1) == Some(b'>') =>
            {
                self.close_empty_element()
            }

            // <!DOCTYPE r [ ... ]>
            (ScanState::OpenTagHead, b'[') if self.current_kind() == Some(SpanKind::Declaration) => {
                self.subset_depth += 1;
                self.pos += 1;
            }
            (ScanState::OpenTagHead, b']') if self.current_kind() == Some(SpanKind::Declaration) => {
                self.subset_depth = self.subset_depth.saturating_sub(1);
                self.pos += 1;
            }
            (ScanState::OpenTagHead, b'<') if self.subset_depth > 0 => self.skip_subset_markup(),

            (ScanState::OpenTagHead, b'>') if self.subset_depth == 0 => self.end_head(),
            (ScanState::CloseTag, b'>') => self.end_close_tag()?,

            (ScanState::Comment, b'-') if self.lookahead(b"-->") => self.end_construct(3),
            (ScanState::CdataSection, b']') if self.lookahead(b"]]>") => self.end_construct(3),
            (ScanState::ProcessingInstruction, b'?') if self.lookahead(b"?>") => {
                self.end_construct(2)
            }

            _ => self.pos += 1,
        }
        Ok(())
    }

    /// Handle a `<` in content.
    fn begin_markup(&mut self) {
        let start = self.pos;
        if start > self.text_start {
            let index = self.push_span(SpanKind::Text, self.text_start);
            self.spans[index].end = Some(start);
        }
        self.markup_start = start;

        let rest = &self.bytes[start + 1..];
        if rest.first() == Some(&b'/') {
            self.state = ScanState::CloseTag;
            self.pos += 2;
            return;
        }

        let (kind, state, prefix_len) = if rest.first() == Some(&b'?') {
            (SpanKind::ProcessingInstruction, ScanState::ProcessingInstruction, "<?".len())
        } else if rest.starts_with(b"!--") {
            (SpanKind::Comment, ScanState::Comment, "<!--".len())
        } else if rest.starts_with(b"![CDATA[") {
            (SpanKind::CdataSection, ScanState::CdataSection, "<![CDATA[".len())
        } else if rest.first() == Some(&b'!') {
            (SpanKind::Declaration, ScanState::OpenTagHead, "<!".len())
        } else {
            (SpanKind::Element, ScanState::OpenTagHead, "<".len())
        };

        self.current = Some(self.push_span(kind, start));
        self.subset_depth = 0;
        self.state = state;
        self.pos += prefix_len;
    }

    /// Handle the `>` that ends an open-tag head or declaration.
    fn end_head(&mut self) {
        self.pos += 1;
        let end = self.pos;
        self.return_to_content();

        if let Some(index) = self.current.take() {
            let span = &mut self.spans[index];
            if span.kind == SpanKind::Element {
                span.head_end = Some(end);
                self.open.push(index);
            } else {
                span.end = Some(end);
            }
        }
    }

    fn close_empty_element(&mut self) {
        self.pos += "/>".len();
        let end = self.pos;
        self.return_to_content();

        if let Some(index) = self.current.take() {
            let span = &mut self.spans[index];
            span.head_end = Some(end);
            span.end = Some(end);
        }
    }

    fn end_close_tag(&mut self) -> Result<()> {
        self.pos += 1;
        let Some(index) = self.open.pop() else {
            return Err(self.unmatched_close(self.markup_start));
        };
        self.spans[index].end = Some(self.pos);
        trace!(element = index, end = self.pos, "closed element");
        self.return_to_content();
        Ok(())
    }

    /// Close a comment, CDATA section or processing instruction whose
    /// terminator starts at `pos`.
    fn end_construct(&mut self, terminator_len: usize) {
        self.pos += terminator_len;
        let end = self.pos;
        self.return_to_content();

        if let Some(index) = self.current.take() {
            self.spans[index].end = Some(end);
        }
    }

    fn finish(self) -> Result<ScanOutput> {
        // An element head or a declaration still waiting for its `>`
        let head_in_progress = match self.state {
            ScanState::OpenTagHead | ScanState::SingleQuoted | ScanState::DoubleQuoted => {
                self.current
            }
            _ => None,
        };

        if self.state == ScanState::CloseTag && self.open.is_balanced() {
            return Err(self.unmatched_close(self.markup_start));
        }

        let lines = LineIndex::from_line_starts(self.line_starts, self.bytes.len());

        if let Some(index) =
            head_in_progress.filter(|&index| self.spans[index].kind == SpanKind::Declaration)
        {
            let offset = self.spans[index].start;
            return Err(Error::UnterminatedDeclaration {
                offset,
                line: lines.line_of(offset) + 1,
                column: lines.column_of(offset) + 1,
            });
        }

        if let Some(index) = head_in_progress.or_else(|| self.open.peek()) {
            let offset = self.spans[index].start;
            return Err(Error::UnterminatedElement {
                offset,
                line: lines.line_of(offset) + 1,
                column: lines.column_of(offset) + 1,
            });
        }

        debug!(
            spans = self.spans.len(),
            lines = lines.line_count(),
            bytes = self.bytes.len(),
            "scanned source"
        );

        Ok(ScanOutput {
            spans: self.spans,
            lines,
        })
    }

    fn push_span(&mut self, kind: SpanKind, start: usize) -> usize {
        let index = self.spans.len();
        trace!(sequence = index, %kind, start, "span");
        self.spans.push(SourceSpan::open(index, kind, start));
        index
    }

    fn return_to_content(&mut self) {
        self.state = ScanState::Normal;
        self.text_start = self.pos;
    }

    fn shift(&mut self, state: ScanState) {
        self.state = state;
        self.pos += 1;
    }

    fn current_kind(&self) -> Option<SpanKind> {
        self.current.map(|index| self.spans[index].kind)
    }

    /// Skip a comment or processing instruction inside a declaration's
    /// internal subset. Its quotes and brackets are plain text.
    fn skip_subset_markup(&mut self) {
        let (prefix_len, terminator): (usize, &[u8]) = if self.lookahead(b"<!--") {
            (4, b"-->")
        } else if self.lookahead(b"<?") {
            (2, b"?>")
        } else {
            self.pos += 1;
            return;
        };

        let from = self.pos + prefix_len;
        let target = memmem::find(&self.bytes[from..], terminator)
            .map_or(self.bytes.len(), |found| from + found + terminator.len());
        self.skip_to(target);
    }

    /// Jump forward to `target`, recording the line starts passed on the way.
    fn skip_to(&mut self, target: usize) {
        let mut pos = self.pos;
        while let Some(found) = memchr2(b'\n', b'\r', &self.bytes[pos..target]) {
            pos += found + 1;
            if self.bytes[pos - 1] == b'\r' && self.bytes.get(pos) == Some(&b'\n') {
                pos += 1;
            }
            self.line_starts.push(pos);
        }
        self.pos = pos.max(target);
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn lookahead(&self, pattern: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(pattern)
    }

    fn unmatched_close(&self, offset: usize) -> Error {
        // Every line start before `offset` has been recorded by now.
        let lines = LineIndex::from_line_starts(self.line_starts.clone(), self.bytes.len());
        Error::UnmatchedCloseTag {
            offset,
            line: lines.line_of(offset) + 1,
            column: lines.column_of(offset) + 1,
        }
    }
}
