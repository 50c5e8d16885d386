//! Error types for building a document.

use thiserror::Error;

/// Result type alias for xmlspan-dom operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a document.
#[derive(Debug, Error)]
pub enum Error {
    /// XML syntax error reported by quick-xml.
    #[error("XML syntax error at byte {position}: {source}")]
    Xml {
        #[source]
        source: quick_xml::Error,
        /// Byte offset where the error was detected.
        position: u64,
    },

    /// Malformed attribute inside a start tag.
    #[error("invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// A close tag with no element left to close.
    #[error("unexpected closing tag </{0}>")]
    UnexpectedEndTag(String),

    /// End of input with an element still open.
    #[error("unexpected end of input, expected closing tag </{0}>")]
    UnclosedElement(String),

    /// Empty document (no root element).
    #[error("empty XML document: no root element found")]
    EmptyDocument,

    /// More than one top-level element.
    #[error("multiple root elements: <{0}> follows the root element")]
    MultipleRoots(String),

    /// The tree was built but its source text could not be scanned.
    #[error(transparent)]
    Annotate(#[from] xmlspan::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::EmptyDocument.to_string(),
            "empty XML document: no root element found"
        );
        assert_eq!(
            Error::UnclosedElement("a".to_string()).to_string(),
            "unexpected end of input, expected closing tag </a>"
        );
    }

    #[test]
    fn test_annotate_error_is_transparent() {
        let inner = xmlspan::Error::UnmatchedCloseTag {
            offset: 9,
            line: 3,
            column: 1,
        };
        let message = inner.to_string();
        assert_eq!(Error::from(inner).to_string(), message);
    }
}
