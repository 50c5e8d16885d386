//! Source positions for already-parsed XML trees.
//!
//! XML parsers are good at building trees and bad at remembering where each
//! node came from. This crate recovers that information after the fact: it
//! takes the raw text and the tree, scans the text once to find the span of
//! every tag, comment, CDATA section and processing instruction, and pairs
//! the tree's nodes with those spans in document order.
//!
//! # Overview
//!
//! The main types are:
//! - [`Annotator`]: owns the text and answers location queries
//! - [`SourceNode`]: what the annotator needs from a tree (kind, element
//!   children, identity)
//! - [`Location`]: line, column, offset and source text of one node
//! - [`SourceSpan`]: the raw byte range of one scanned construct
//!
//! # Example
//!
//! ```rust
//! use xmlspan::{Annotator, NodeKind, SourceNode};
//!
//! struct Node {
//!     id: usize,
//!     children: Vec<Node>,
//! }
//!
//! impl SourceNode for Node {
//!     type Id = usize;
//!
//!     fn node_id(&self) -> usize {
//!         self.id
//!     }
//!
//!     fn kind(&self) -> NodeKind {
//!         NodeKind::Element
//!     }
//!
//!     fn element_children(&self) -> Vec<&Node> {
//!         self.children.iter().collect()
//!     }
//! }
//!
//! let b = Node { id: 1, children: vec![] };
//! let a = Node { id: 0, children: vec![b] };
//!
//! let annotator = Annotator::new("<A><B/></A>", &a).unwrap();
//! let loc = annotator.location(&a.children[0]).unwrap();
//! assert_eq!(loc.start_line(), 1);
//! assert_eq!(loc.start_column(), 4);
//! assert_eq!(loc.text(false), "<B/>");
//! ```
//!
//! # Offsets
//!
//! Offsets are byte offsets into the UTF-8 text, and columns count bytes
//! from the start of the line. Lines end at `\n`, `\r\n` or a lone `\r`.

pub mod annotator;
pub mod correlate;
pub mod error;
pub mod location;
pub mod node;
pub mod scanner;
pub mod span;

// Re-export main types
pub use annotator::Annotator;
pub use correlate::{CorrelationMap, correlate};
pub use error::{Error, Result};
pub use location::Location;
pub use node::{NodeKind, SourceNode};
pub use scanner::{ScanOutput, scan};
pub use span::{SourceSpan, SpanKind};
pub use xmlspan_source_map::{LineIndex, Position, Range};
