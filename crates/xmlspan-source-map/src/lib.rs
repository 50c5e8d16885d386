//! Source positions for xmlspan
//!
//! This crate converts byte offsets into (row, column) positions and back.
//! It is the leaf of the xmlspan workspace: the scanner records a line table
//! while it walks the text, and every location reported afterwards goes
//! through a [`LineIndex`].
//!
//! # Example
//!
//! ```rust
//! use xmlspan_source_map::{LineIndex, Position};
//!
//! let index = LineIndex::new("<a>\n  <b/>\n</a>");
//! assert_eq!(
//!     index.position(6),
//!     Position { offset: 6, row: 1, column: 2 }
//! );
//! assert_eq!(index.offset_of(2, 0), Some(11));
//! ```

pub mod line_index;
pub mod types;

// Re-export main types
pub use line_index::LineIndex;
pub use types::{Position, Range};
