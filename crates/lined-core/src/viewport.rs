//! Viewport Scrolling
//!
//! Scroll offsets are the negated origin of the visible window, in pixels: a scroll of
//! `(-40, 0)` shows the document from x = 40 onwards. After each tick the offsets are
//! nudged by the smallest amount that brings the cursor back on screen. There is no
//! centering, and the two axes never influence each other.

use std::ops::Range;

/// Pixel offsets applied to document coordinates when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportScroll {
    /// Horizontal offset (zero or negative in normal use).
    pub x: i32,
    /// Vertical offset (zero or negative in normal use).
    pub y: i32,
}

impl ViewportScroll {
    /// Create a scroll offset.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Size of the visible window in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSize {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl ViewportSize {
    /// Create a viewport size.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Cursor position in document pixel space (before scrolling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    /// Left edge of the cursor.
    pub x: i32,
    /// Top edge of the cursor's line.
    pub y: i32,
}

impl ScreenPoint {
    /// Create a point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Scroll offsets that keep `cursor` inside `viewport`.
///
/// Horizontally the cursor is a zero-width caret at `cursor.x`; when it leaves the
/// window on the right it is placed on the last visible pixel column. Vertically it
/// occupies `cursor.y..cursor.y + line_height`.
pub fn recompute_scroll(
    cursor: ScreenPoint,
    line_height: i32,
    viewport: ViewportSize,
    current: ViewportScroll,
) -> ViewportScroll {
    ViewportScroll {
        x: scroll_axis(
            i64::from(cursor.x),
            i64::from(cursor.x),
            1,
            i64::from(viewport.width),
            i64::from(current.x),
        ),
        y: scroll_axis(
            i64::from(cursor.y),
            i64::from(cursor.y) + i64::from(line_height),
            0,
            i64::from(viewport.height),
            i64::from(current.y),
        ),
    }
}

/// One axis of [`recompute_scroll`], widened to `i64` so cursors near `i32::MAX`
/// cannot overflow. `inset` is how far inside the far edge the span is placed.
fn scroll_axis(near: i64, far: i64, inset: i64, extent: i64, current: i64) -> i32 {
    let window_near = -current;
    let window_far = extent - current;
    let scroll = if far > window_far {
        extent - far - inset
    } else if near < window_near {
        -near
    } else {
        current
    };
    clamp_to_i32(scroll)
}

fn clamp_to_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Rows at least partially visible for the given scroll, clipped to `line_count`.
pub fn visible_rows(
    scroll: ViewportScroll,
    viewport: ViewportSize,
    line_height: i32,
    line_count: usize,
) -> Range<usize> {
    if line_height <= 0 || viewport.height <= 0 {
        return 0..0;
    }
    let first = usize::try_from((-i64::from(scroll.y)).max(0) / i64::from(line_height))
        .unwrap_or(0);
    let rows = usize::try_from(viewport.height / line_height + 2).unwrap_or(0);
    let first = first.min(line_count);
    first..first.saturating_add(rows).min(line_count)
}
