//! Binding tree nodes to scanned spans.
//!
//! The external tree and the span list describe the same text, and both list
//! nodes in pre-order, so a single forward cursor through the span list is
//! enough: every addressable node takes the next span of its kind. There is
//! no re-sorting; if the two orders ever diverge, the rest of the tree simply
//! stays unbound.
//!
//! Kinds pair up as follows:
//!
//! | node kind | span kind |
//! |---|---|
//! | [`NodeKind::Element`] | [`SpanKind::Element`] |
//! | [`NodeKind::CdataSection`] | [`SpanKind::Text`] |
//!
//! CDATA nodes pair with *text* spans on purpose: at the level of boundary
//! detection the tree's character-data children line up with the scanner's
//! text runs, not with `<![CDATA[` sections. Every other node kind binds
//! nothing and consumes no spans, but its element children are still walked.

use crate::node::{NodeKind, SourceNode};
use crate::span::{SourceSpan, SpanKind};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Node identity to index in the span list.
pub type CorrelationMap<K> = HashMap<K, usize>;

/// Walk `root` in pre-order and bind each addressable node to its span.
pub fn correlate<N: SourceNode>(root: &N, spans: &[SourceSpan]) -> CorrelationMap<N::Id> {
    let mut map = HashMap::new();
    let mut cursor = Cursor::default();
    visit(root, spans, &mut cursor, None, &mut map);
    debug!(bound = map.len(), spans = spans.len(), "correlated tree");
    map
}

/// Read position in the span list, threaded through the walk.
#[derive(Debug, Default)]
struct Cursor {
    next: usize,
}

impl Cursor {
    /// Advance past the next span of `kind` and return its index.
    fn advance_to(&mut self, spans: &[SourceSpan], kind: SpanKind) -> Option<usize> {
        while let Some(span) = spans.get(self.next) {
            let index = self.next;
            self.next += 1;
            if span.kind == kind {
                return Some(index);
            }
        }
        None
    }
}

fn span_kind_for(kind: NodeKind) -> Option<SpanKind> {
    match kind {
        NodeKind::Element => Some(SpanKind::Element),
        NodeKind::CdataSection => Some(SpanKind::Text),
        NodeKind::Comment | NodeKind::Text | NodeKind::Other => None,
    }
}

fn visit<'s, N: SourceNode>(
    node: &N,
    spans: &'s [SourceSpan],
    cursor: &mut Cursor,
    enclosing: Option<&'s SourceSpan>,
    map: &mut CorrelationMap<N::Id>,
) {
    let mut enclosing = enclosing;

    if let Some(kind) = span_kind_for(node.kind()) {
        let Some(index) = cursor.advance_to(spans, kind) else {
            trace!(node_kind = ?node.kind(), "no span left for node");
            return;
        };
        let span = &spans[index];

        if let Some(parent) = enclosing {
            let inside = parent.start <= span.start && parent.end.is_none_or(|end| span.start < end);
            if !inside {
                debug!(
                    span = span.sequence,
                    parent = parent.sequence,
                    "bound span lies outside its enclosing element"
                );
            }
        }

        map.insert(node.node_id(), index);
        if span.kind == SpanKind::Element {
            enclosing = Some(span);
        }
    }

    for child in node.element_children() {
        visit(child, spans, cursor, enclosing, map);
    }
}
