//! Stage 2: Logical Line Index
//!
//! A table of line boundaries derived from the buffer by a single left-to-right scan.
//! The table is rebuilt from scratch after every buffer mutation rather than patched
//! incrementally: O(n) per edit, and always exactly consistent with the content.
//!
//! Every index holds at least one line. An empty buffer has the single line `[0, 0]`,
//! and a buffer ending in `'\n'` has a trailing empty line.

use crate::dyn_array::DynArray;
use crate::storage::StorageError;
use std::ops::Range;

/// Byte that terminates a line.
pub const LINE_TERMINATOR: u8 = b'\n';

/// One logical line: the bytes `start..end` of the buffer.
///
/// `end` is the offset of the terminating `'\n'` (or the buffer length for the last
/// line), so the terminator is never part of the line. A cursor at `end` belongs to
/// this line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Line {
    /// Offset of the first byte of the line.
    pub start: usize,
    /// Offset of the terminator, or the buffer length for the last line.
    pub end: usize,
}

impl Line {
    /// Create a line covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of content bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-length line.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `offset` lies in `start..=end`.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Content byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Ordered line boundaries for one buffer.
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: DynArray<Line>,
}

impl LineIndex {
    /// Index of an empty buffer: one zero-length line.
    pub fn new() -> Self {
        Self {
            lines: DynArray::from_vec(vec![Line::new(0, 0)]),
        }
    }

    /// Build the index for `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        let mut index = Self::new();
        index.rebuild(bytes)?;
        Ok(index)
    }

    /// Recompute every line boundary from `bytes`.
    ///
    /// On allocation failure the previous table is kept.
    pub fn rebuild(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        let mut lines = DynArray::new();
        let mut start = 0;

        for (offset, &byte) in bytes.iter().enumerate() {
            if byte == LINE_TERMINATOR {
                lines.push(Line::new(start, offset))?;
                start = offset + 1;
            }
        }
        lines.push(Line::new(start, bytes.len()))?;

        self.lines = lines;
        Ok(())
    }

    /// Number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line at `row`.
    pub fn line(&self, row: usize) -> Option<Line> {
        self.lines.get(row).copied()
    }

    /// First line of the document.
    pub fn first(&self) -> Line {
        self.lines[0]
    }

    /// Last line of the document.
    pub fn last(&self) -> Line {
        self.lines[self.lines.len() - 1]
    }

    /// All lines in document order.
    pub fn lines(&self) -> &[Line] {
        self.lines.as_slice()
    }

    /// Row of the line containing `offset`.
    ///
    /// An offset sitting on a terminator belongs to the line it terminates. Offsets
    /// past the end of the document resolve to the last line.
    pub fn row_for_offset(&self, offset: usize) -> usize {
        let last_row = self.line_count() - 1;
        let row = self.lines.partition_point(|line| line.end < offset);
        match self.lines.get(row) {
            Some(line) if line.contains(offset) => row,
            _ => last_row,
        }
    }

    /// Bytes of line `row` taken from `text`, without the terminator.
    pub fn line_bytes<'a>(&self, text: &'a [u8], row: usize) -> Option<&'a [u8]> {
        let line = self.line(row)?;
        text.get(line.range())
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(text: &str) -> Vec<(usize, usize)> {
        LineIndex::from_bytes(text.as_bytes())
            .unwrap()
            .lines()
            .iter()
            .map(|line| (line.start, line.end))
            .collect()
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let index = LineIndex::new();
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.first(), Line::new(0, 0));
        assert_eq!(lines_of(""), vec![(0, 0)]);
    }

    #[test]
    fn test_lines_exclude_terminator() {
        assert_eq!(lines_of("ab\ncd"), vec![(0, 2), (3, 5)]);
        assert_eq!(lines_of("abc"), vec![(0, 3)]);
    }

    #[test]
    fn test_trailing_and_consecutive_newlines() {
        assert_eq!(lines_of("a\n"), vec![(0, 1), (2, 2)]);
        assert_eq!(lines_of("\n\n"), vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(lines_of("a\n\nb"), vec![(0, 1), (2, 2), (3, 4)]);
    }

    #[test]
    fn test_row_for_offset_boundaries() {
        let index = LineIndex::from_bytes(b"hello\nworld").unwrap();
        assert_eq!(index.row_for_offset(0), 0);
        assert_eq!(index.row_for_offset(5), 0); // on the terminator
        assert_eq!(index.row_for_offset(6), 1);
        assert_eq!(index.row_for_offset(11), 1);
        assert_eq!(index.row_for_offset(99), 1);
    }

    #[test]
    fn test_row_for_offset_on_empty_lines() {
        let index = LineIndex::from_bytes(b"\n\n").unwrap();
        assert_eq!(index.row_for_offset(0), 0);
        assert_eq!(index.row_for_offset(1), 1);
        assert_eq!(index.row_for_offset(2), 2);
    }

    #[test]
    fn test_rebuild_replaces_previous_table() {
        let mut index = LineIndex::from_bytes(b"a\nb\nc").unwrap();
        assert_eq!(index.line_count(), 3);

        index.rebuild(b"abf").unwrap();
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.last(), Line::new(0, 3));
    }

    #[test]
    fn test_line_bytes() {
        let text = b"first\nsecond\n";
        let index = LineIndex::from_bytes(text).unwrap();
        assert_eq!(index.line_bytes(text, 0), Some(&b"first"[..]));
        assert_eq!(index.line_bytes(text, 1), Some(&b"second"[..]));
        assert_eq!(index.line_bytes(text, 2), Some(&b""[..]));
        assert_eq!(index.line_bytes(text, 3), None);
    }

    #[test]
    fn test_lines_partition_document() {
        let text = b"one\n\ntwo three\n four\n";
        let index = LineIndex::from_bytes(text).unwrap();
        let lines = index.lines();

        assert_eq!(lines[0].start, 0);
        assert_eq!(index.last().end, text.len());
        for pair in lines.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
            assert_eq!(text[pair[0].end], LINE_TERMINATOR);
        }
    }
}
