//! Line-start table for offset lookups

use crate::types::Position;
use memchr::memchr2;
use serde::{Deserialize, Serialize};

/// Sorted table of line-start offsets.
///
/// Every entry is the byte offset of the first character of a line, so the
/// table always starts with `0` and is strictly increasing. Lookups are a
/// binary search, O(log n) in the number of lines.
///
/// A line ends at `\n`, at a `\r\n` pair (one terminator), or at a lone `\r`.
///
/// Deserialized tables are checked against the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLineIndex")]
pub struct LineIndex {
    line_starts: Vec<usize>,

    /// Total length of the text in bytes
    total_length: usize,
}

impl LineIndex {
    /// Build the line table by scanning `content` once.
    ///
    /// # Example
    ///
    /// ```
    /// use xmlspan_source_map::LineIndex;
    ///
    /// let index = LineIndex::new("a\r\nb\rc\nd");
    /// assert_eq!(index.line_starts(), &[0, 3, 5, 7]);
    /// ```
    pub fn new(content: &str) -> Self {
        let bytes = content.as_bytes();
        let mut line_starts = vec![0];
        let mut pos = 0;

        while let Some(found) = memchr2(b'\n', b'\r', &bytes[pos..]) {
            pos += found + 1;
            if bytes[pos - 1] == b'\r' && bytes.get(pos) == Some(&b'\n') {
                pos += 1;
            }
            line_starts.push(pos);
        }

        LineIndex {
            line_starts,
            total_length: bytes.len(),
        }
    }

    /// Wrap a line table that was recorded elsewhere (e.g. during a scan).
    ///
    /// `line_starts` must begin with `0`, be strictly increasing and not
    /// exceed `total_length`. An empty table is treated as `[0]`.
    pub fn from_line_starts(mut line_starts: Vec<usize>, total_length: usize) -> Self {
        if line_starts.first() != Some(&0) {
            line_starts.insert(0, 0);
        }
        debug_assert!(line_starts.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(line_starts.last().is_some_and(|&last| last <= total_length));

        LineIndex {
            line_starts,
            total_length,
        }
    }

    /// Zero-based line containing `offset`.
    ///
    /// Offsets past the end of the text are clamped to the end.
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.total_length);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            // line_starts[0] == 0, so the insertion point is at least 1
            Err(next) => next - 1,
        }
    }

    /// Zero-based column of `offset`, in bytes from the start of its line.
    pub fn column_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.total_length);
        offset - self.line_starts[self.line_of(offset)]
    }

    /// Convert a byte offset to a [`Position`] (clamped like [`Self::line_of`]).
    ///
    /// ```
    /// use xmlspan_source_map::LineIndex;
    ///
    /// let index = LineIndex::new("hello\nworld");
    /// let pos = index.position(6);
    /// assert_eq!((pos.row, pos.column), (1, 0));
    /// ```
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.total_length);
        let row = self.line_of(offset);
        Position {
            offset,
            row,
            column: offset - self.line_starts[row],
        }
    }

    /// Convert a zero-based line and column back to a byte offset.
    ///
    /// Returns `None` if the line does not exist or the column runs past
    /// the end of that line (its terminator included).
    pub fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        let start = *self.line_starts.get(line)?;
        let offset = start.checked_add(column)?;
        match self.line_starts.get(line + 1) {
            Some(&next) if offset < next => Some(offset),
            None if offset <= self.total_length => Some(offset),
            _ => None,
        }
    }

    /// Offset of the first character of `line`, if it exists.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Total length of the text in bytes
    pub fn total_length(&self) -> usize {
        self.total_length
    }
}

/// Serialized shape of a [`LineIndex`], before validation.
#[derive(Deserialize)]
struct RawLineIndex {
    line_starts: Vec<usize>,
    total_length: usize,
}

impl TryFrom<RawLineIndex> for LineIndex {
    type Error = String;

    fn try_from(raw: RawLineIndex) -> Result<Self, Self::Error> {
        if let Some(pair) = raw.line_starts.windows(2).find(|w| w[0] >= w[1]) {
            return Err(format!(
                "line starts must be strictly increasing, found {} then {}",
                pair[0], pair[1]
            ));
        }
        match raw.line_starts.last() {
            Some(&last) if last > raw.total_length => {
                return Err(format!(
                    "line start {last} is past the end of the text ({})",
                    raw.total_length
                ));
            }
            _ => {}
        }
        Ok(LineIndex::from_line_starts(raw.line_starts, raw.total_length))
    }
}
