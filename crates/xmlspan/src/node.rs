//! The tree abstraction the annotator correlates against.

use std::hash::Hash;

/// Category of a node in an externally built XML tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element,
    /// Character data: a CDATA section, or text content the tree exposes as
    /// an addressable child.
    CdataSection,
    Comment,
    /// Free-standing text the tree does not address.
    Text,
    Other,
}

impl NodeKind {
    /// Whether nodes of this kind are bound to a scanned span.
    pub fn is_addressable(&self) -> bool {
        matches!(self, NodeKind::Element | NodeKind::CdataSection)
    }
}

/// A node of an XML tree built by some other parser.
///
/// The annotator only needs three things from the tree: what kind of node
/// this is, its element children in document order, and an identity to key
/// the resulting locations by.
pub trait SourceNode {
    /// Stable identity of a node within one tree.
    type Id: Copy + Eq + Hash;

    fn node_id(&self) -> Self::Id;

    fn kind(&self) -> NodeKind;

    /// Children visited by the correlator, in document order.
    fn element_children(&self) -> Vec<&Self>;
}
