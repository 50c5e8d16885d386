//! The annotator: scan once, correlate once, answer location queries.

use crate::correlate::{CorrelationMap, correlate};
use crate::error::Result;
use crate::location::Location;
use crate::node::SourceNode;
use crate::scanner::{ScanOutput, scan};
use crate::span::SourceSpan;
use std::collections::HashMap;
use std::hash::Hash;
use std::io;
use tracing::debug;
use xmlspan_source_map::LineIndex;

/// Source locations for the nodes of one parsed XML document.
///
/// Built from the raw text and the tree some XML parser produced from it.
/// Construction scans the text, then binds tree nodes to spans; after that
/// the annotator is read-only and every query is a lookup plus a binary
/// search in the line table.
///
/// `K` is the tree's node identity type ([`SourceNode::Id`]).
#[derive(Debug, Clone)]
pub struct Annotator<K = usize> {
    source: String,
    spans: Vec<SourceSpan>,
    lines: LineIndex,
    bindings: CorrelationMap<K>,
}

impl Annotator {
    /// Scan `source` without binding any tree.
    ///
    /// Only span-level queries ([`Annotator::spans`],
    /// [`Annotator::span_location`]) return anything.
    pub fn scan_only(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let ScanOutput { spans, lines } = scan(&source)?;
        Ok(Self {
            source,
            spans,
            lines,
            bindings: HashMap::new(),
        })
    }
}

impl<K: Copy + Eq + Hash> Annotator<K> {
    /// Scan `source` and bind the nodes of `root`'s tree to their spans.
    ///
    /// # Errors
    ///
    /// Fails if the text has a close tag with nothing to close or an element
    /// that is never closed. Nodes that cannot be bound are not an error;
    /// they just have no location.
    pub fn new<N>(source: impl Into<String>, root: &N) -> Result<Self>
    where
        N: SourceNode<Id = K>,
    {
        let source = source.into();
        let ScanOutput { spans, lines } = scan(&source)?;
        let bindings = correlate(root, &spans);
        debug!(
            spans = spans.len(),
            bound = bindings.len(),
            "annotated document"
        );

        Ok(Self {
            source,
            spans,
            lines,
            bindings,
        })
    }

    /// Location of `node`, or `None` if it could not be bound to a span.
    pub fn location<N>(&self, node: &N) -> Option<Location<'_>>
    where
        N: SourceNode<Id = K>,
    {
        self.location_by_id(node.node_id())
    }

    pub fn location_by_id(&self, id: K) -> Option<Location<'_>> {
        let index = *self.bindings.get(&id)?;
        self.span_location(index)
    }

    /// Whether `id` was bound to a span.
    pub fn is_bound(&self, id: K) -> bool {
        self.bindings.contains_key(&id)
    }

    pub fn bound_count(&self) -> usize {
        self.bindings.len()
    }
}

impl<K> Annotator<K> {
    /// Location of the span at `index` in scan order.
    pub fn span_location(&self, index: usize) -> Option<Location<'_>> {
        let span = self.spans.get(index)?;
        Some(Location::new(span, &self.lines, &self.source))
    }

    /// Every scanned span, in scan order.
    pub fn spans(&self) -> &[SourceSpan] {
        &self.spans
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Write one line per scanned span: sequence, kind, start position and
    /// the head text with control characters escaped.
    pub fn write_listing<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for index in 0..self.spans.len() {
            if let Some(location) = self.span_location(index) {
                writeln!(
                    out,
                    "{}: {} {} [{}]",
                    index,
                    location.kind(),
                    location,
                    location.text(true).escape_debug()
                )?;
            }
        }
        out.flush()
    }
}
