//! Errors raised while scanning the source text.

use thiserror::Error;

/// Result type alias for xmlspan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal scanning errors.
///
/// The text is expected to have been accepted by an XML parser already, so
/// either error means the text and the tree disagree and no location can be
/// trusted. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A close tag was found with no open element left to close.
    #[error("unmatched close tag at line {line}, column {column} (offset {offset})")]
    UnmatchedCloseTag {
        offset: usize,
        line: usize,
        column: usize,
    },

    /// The text ended while an element was still open.
    #[error("element opened at line {line}, column {column} (offset {offset}) is never closed")]
    UnterminatedElement {
        offset: usize,
        line: usize,
        column: usize,
    },

    /// The text ended inside a `<!...>` declaration, so everything after it
    /// was swallowed.
    #[error("declaration opened at line {line}, column {column} (offset {offset}) is never closed")]
    UnterminatedDeclaration {
        offset: usize,
        line: usize,
        column: usize,
    },
}

impl Error {
    /// Byte offset of the construct that caused the error.
    pub fn offset(&self) -> usize {
        match self {
            Error::UnmatchedCloseTag { offset, .. }
            | Error::UnterminatedElement { offset, .. }
            | Error::UnterminatedDeclaration { offset, .. } => *offset,
        }
    }
}
