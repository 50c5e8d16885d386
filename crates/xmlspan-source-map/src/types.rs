//! Core position types

use serde::{Deserialize, Serialize};

/// A position in source text (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from start of source
    pub offset: usize,
    /// Row number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in bytes from the start of the row)
    pub column: usize,
}

/// A range in source text from start to end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Range {
    /// Number of bytes covered by the range
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `offset` falls inside `[start, end)`
    pub fn contains(&self, offset: usize) -> bool {
        self.start.offset <= offset && offset < self.end.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(offset: usize, row: usize, column: usize) -> Position {
        Position {
            offset,
            row,
            column,
        }
    }

    #[test]
    fn test_position_ordering() {
        let a = pos(0, 0, 0);
        let b = pos(5, 0, 5);
        let c = pos(10, 1, 0);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_range_contains_is_half_open() {
        let range = Range {
            start: pos(2, 0, 2),
            end: pos(6, 0, 6),
        };

        assert_eq!(range.len(), 4);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(5));
        assert!(!range.contains(6));
    }

    #[test]
    fn test_range_serialization() {
        let range = Range {
            start: pos(0, 0, 0),
            end: pos(7, 1, 2),
        };

        let json = serde_json::to_string(&range).unwrap();
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(range, back);
        assert!(json.contains("\"row\":1"));
    }
}
