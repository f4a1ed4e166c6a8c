//! Cursor Model and Navigation
//!
//! The cursor is a single byte offset. Its row and column are derived from the
//! [`LineIndex`] by [`recompute_derived`] and never edited directly, so they cannot go
//! stale relative to the buffer.
//!
//! Navigation is a pure function of the cursor *as of before the move* and the current
//! text: [`Navigator::target`] returns the new offset and the caller re-derives the
//! row and column afterwards. Vertical motions rely on this ordering to keep the
//! column of the line the cursor is leaving.

use crate::line_index::{Line, LineIndex};

/// Lines skipped by page-up/page-down unless configured otherwise.
pub const DEFAULT_PAGE_LINES: usize = 10;

/// Cursor offset plus its derived row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    offset: usize,
    row: usize,
    col: usize,
}

impl Cursor {
    /// Cursor at `offset` whose row and column are not derived yet.
    pub(crate) fn pending(offset: usize) -> Self {
        Self {
            offset,
            row: 0,
            col: 0,
        }
    }

    /// Byte offset into the buffer (`0..=len`).
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Index of the line containing the cursor.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Byte distance from the start of the cursor's line.
    pub fn col(&self) -> usize {
        self.col
    }
}

/// Place a cursor at `offset` and derive its row and column from `index`.
///
/// Offsets beyond the document are clamped to the end of the last line.
pub fn recompute_derived(offset: usize, index: &LineIndex) -> Cursor {
    let offset = offset.min(index.last().end);
    let row = index.row_for_offset(offset);
    let start = index.line(row).map_or(0, |line| line.start);
    Cursor {
        offset,
        row,
        col: offset.saturating_sub(start),
    }
}

/// A cursor motion, as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// One byte left.
    CharLeft,
    /// One byte right, up to the end-of-buffer position.
    CharRight,
    /// Previous line, same column where possible.
    LineUp,
    /// Next line, same column where possible.
    LineDown,
    /// Back across whitespace to the preceding word boundary.
    WordLeft,
    /// Forward across whitespace to the start of the next word.
    WordRight,
    /// Start of the current line.
    LineStart,
    /// End of the current line.
    LineEnd,
    /// Start of the first line.
    DocumentStart,
    /// End of the last line.
    DocumentEnd,
    /// One page towards the start of the document.
    PageUp,
    /// One page towards the end of the document.
    PageDown,
    /// Start of the next zero-length line.
    NextEmptyLine,
    /// Start of the previous zero-length line.
    PrevEmptyLine,
}

/// Whitespace for word motions. A newline counts as whitespace.
fn is_word_separator(byte: u8) -> bool {
    byte == b' ' || byte == b'\n'
}

/// Computes cursor targets over one buffer snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    text: &'a [u8],
    index: &'a LineIndex,
    page_lines: usize,
}

impl<'a> Navigator<'a> {
    /// Create a navigator over `text` and its (current) line index.
    pub fn new(text: &'a [u8], index: &'a LineIndex) -> Self {
        Self {
            text,
            index,
            page_lines: DEFAULT_PAGE_LINES,
        }
    }

    /// Override the page size used by page-up/page-down.
    pub fn with_page_lines(mut self, page_lines: usize) -> Self {
        self.page_lines = page_lines;
        self
    }

    /// Offset the cursor moves to under `motion`.
    pub fn target(&self, cursor: Cursor, motion: Motion) -> usize {
        match motion {
            Motion::CharLeft => cursor.offset.saturating_sub(1),
            Motion::CharRight => self.char_right(cursor),
            Motion::LineUp => self.line_up(cursor),
            Motion::LineDown => self.line_down(cursor),
            Motion::WordLeft => self.word_left(cursor),
            Motion::WordRight => self.word_right(cursor),
            Motion::LineStart => self.current_line(cursor).start,
            Motion::LineEnd => self.current_line(cursor).end,
            Motion::DocumentStart => self.index.first().start,
            Motion::DocumentEnd => self.index.last().end,
            Motion::PageUp => self.page_up(cursor),
            Motion::PageDown => self.page_down(cursor),
            Motion::NextEmptyLine => self.next_empty_line(cursor),
            Motion::PrevEmptyLine => self.prev_empty_line(cursor),
        }
    }

    /// Start of the 1-based line `line_number`.
    ///
    /// Returns `None` (not performed) unless `1 <= line_number < line_count`: the
    /// final line is not addressable this way, callers fall back to
    /// [`Motion::DocumentEnd`].
    pub fn goto_line(&self, line_number: usize) -> Option<usize> {
        if line_number == 0 || line_number >= self.index.line_count() {
            return None;
        }
        self.index.line(line_number - 1).map(|line| line.start)
    }

    fn current_line(&self, cursor: Cursor) -> Line {
        self.index
            .line(cursor.row)
            .unwrap_or_else(|| self.index.last())
    }

    fn char_right(&self, cursor: Cursor) -> usize {
        if cursor.offset < self.text.len() {
            cursor.offset + 1
        } else {
            cursor.offset
        }
    }

    fn line_down(&self, cursor: Cursor) -> usize {
        match self.index.line(cursor.row + 1) {
            Some(next) => column_on(next, cursor.col),
            None => cursor.offset,
        }
    }

    fn line_up(&self, cursor: Cursor) -> usize {
        match cursor.row.checked_sub(1).and_then(|row| self.index.line(row)) {
            Some(prev) => column_on(prev, cursor.col),
            None => cursor.offset,
        }
    }

    fn word_right(&self, cursor: Cursor) -> usize {
        let mut seen_separator = false;
        for (offset, &byte) in self.text.iter().enumerate().skip(cursor.offset) {
            if is_word_separator(byte) {
                seen_separator = true;
            } else if seen_separator {
                return offset;
            }
        }
        self.current_line(cursor).end
    }

    fn word_left(&self, cursor: Cursor) -> usize {
        let mut seen_separator = false;
        for offset in (1..=cursor.offset.min(self.text.len())).rev() {
            if is_word_separator(self.text[offset - 1]) {
                seen_separator = true;
            } else if seen_separator {
                return offset;
            }
        }
        self.current_line(cursor).start
    }

    fn page_up(&self, cursor: Cursor) -> usize {
        (cursor.row + 1)
            .checked_sub(self.page_lines)
            .and_then(|line_number| self.goto_line(line_number))
            .unwrap_or_else(|| self.index.first().start)
    }

    fn page_down(&self, cursor: Cursor) -> usize {
        self.goto_line(cursor.row + 1 + self.page_lines)
            .unwrap_or_else(|| self.index.last().end)
    }

    fn next_empty_line(&self, cursor: Cursor) -> usize {
        self.index
            .lines()
            .iter()
            .skip(cursor.row + 1)
            .find(|line| line.is_empty())
            .unwrap_or(&self.index.last())
            .start
    }

    fn prev_empty_line(&self, cursor: Cursor) -> usize {
        self.index
            .lines()
            .iter()
            .take(cursor.row)
            .rev()
            .find(|line| line.is_empty())
            .unwrap_or(&self.index.first())
            .start
    }
}

/// Offset at `col` on `line`, clamped to the line end.
fn column_on(line: Line, col: usize) -> usize {
    if line.len() >= col {
        line.start + col
    } else {
        line.end
    }
}
