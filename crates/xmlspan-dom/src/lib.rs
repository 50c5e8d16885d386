//! A small XML DOM whose nodes know where they came from.
//!
//! This crate wraps [`quick-xml`] to build a plain tree of [`XmlNode`]s and,
//! unless told otherwise, runs [`xmlspan`] over the same text so every
//! element can be asked for its line, column and source text.
//!
//! # Overview
//!
//! - [`parse`] / [`Parser`]: build a [`Document`] from text
//! - [`ParseOptions`]: whether to keep positions, whether to trim text
//! - [`XmlNode`]: element, text, CDATA or comment, with DOM-style accessors
//!
//! # Example
//!
//! ```rust
//! use xmlspan_dom::parse;
//!
//! let doc = parse(r#"<style version="1.0">
//!   <macro name="author">
//!     <text variable="author"/>
//!   </macro>
//! </style>"#).unwrap();
//!
//! assert_eq!(doc.root.tag_name(), Some("style"));
//! assert_eq!(doc.root.attribute("version"), Some("1.0"));
//!
//! let macros = doc.root.children_named("macro");
//! let loc = doc.location(macros[0]).unwrap();
//! assert_eq!(loc.to_string(), "line 2, column 3");
//! assert_eq!(loc.text(true), r#"<macro name="author">"#);
//! ```
//!
//! Only elements carry a location; [`Document::location`] returns `None` for
//! text, CDATA and comment nodes.

pub mod error;
pub mod parser;
pub mod types;

// Re-export main types
pub use error::{Error, Result};
pub use parser::{Document, ParseOptions, Parser, parse};
pub use types::{NodeContent, NodeId, XmlAttribute, XmlNode};
pub use xmlspan::{Location, NodeKind};
