//! Selection Model
//!
//! A selection is a pair of raw offsets in gesture order: `start` is the anchor where
//! the gesture began, `end` is the active position tracking the cursor. The pair is
//! not ordered; anything that consumes the range (delete, copy, highlight) goes
//! through [`Selection::normalize`].

use crate::line_index::{Line, LineIndex};

/// Selection direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// Forward selection (anchor before active position)
    Forward,
    /// Backward selection (active position before anchor)
    Backward,
}

/// Anchor/active offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Anchor offset, fixed for the lifetime of the gesture.
    pub start: usize,
    /// Active offset, follows the cursor.
    pub end: usize,
}

impl Selection {
    /// Create a selection from an anchor and an active offset.
    pub fn new(anchor: usize, active: usize) -> Self {
        Self {
            start: anchor,
            end: active,
        }
    }

    /// `(min, max)` of the two endpoints.
    pub fn normalize(&self) -> (usize, usize) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    /// Number of selected bytes.
    pub fn len(&self) -> usize {
        let (lo, hi) = self.normalize();
        hi - lo
    }

    /// Returns `true` if anchor and active position coincide.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Direction of the gesture that produced the selection.
    pub fn direction(&self) -> SelectionDirection {
        if self.start <= self.end {
            SelectionDirection::Forward
        } else {
            SelectionDirection::Backward
        }
    }

    /// The part of the selection that falls on `line`, as absolute offsets.
    ///
    /// Returns `None` when the selection does not cover any content byte of the line.
    /// An empty line lying inside the selection yields the empty span
    /// `(line.start, line.start)` so it can still be highlighted.
    pub fn span_on_line(&self, line: Line) -> Option<(usize, usize)> {
        let (lo, hi) = self.normalize();
        if line.is_empty() {
            return (lo <= line.start && line.end < hi).then_some((line.start, line.start));
        }
        let start = lo.max(line.start);
        let end = hi.min(line.end);
        (start < end).then_some((start, end))
    }
}

/// Start a selection at `anchor`, or move the active end of the existing one.
///
/// The anchor of an existing selection is sticky until the selection is cleared.
pub fn begin_or_extend(selection: &mut Option<Selection>, anchor: usize, current: usize) {
    match selection {
        Some(existing) => existing.end = current,
        None => *selection = Some(Selection::new(anchor, current)),
    }
}

/// A selection covering the whole document.
pub fn select_all(index: &LineIndex) -> Selection {
    Selection::new(index.first().start, index.last().end)
}
