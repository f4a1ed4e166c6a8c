//! Editor Configuration
//!
//! Settings a host may tune. Everything has a default, so `EditorConfig::default()` is a
//! working configuration; hosts override individual fields with the `with_*` setters
//! and call [`EditorConfig::validate`] once before building a session.

use crate::cursor::DEFAULT_PAGE_LINES;
use crate::dyn_array::DEFAULT_INITIAL_CAPACITY;
use std::time::Duration;
use thiserror::Error;

/// Default font size, which is also the line height in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 16;
/// Default number of spaces inserted by the tab command.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Errors reported by [`EditorConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("font size range {min}..={max} is empty or starts at zero")]
    /// The zoom range is unusable.
    InvalidFontRange {
        /// Smallest allowed font size.
        min: u32,
        /// Largest allowed font size.
        max: u32,
    },

    #[error("font size {size} is outside {min}..={max}")]
    /// The starting font size lies outside the zoom range.
    FontSizeOutOfRange {
        /// Configured font size.
        size: u32,
        /// Smallest allowed font size.
        min: u32,
        /// Largest allowed font size.
        max: u32,
    },

    #[error("font spacing must be finite and not negative")]
    /// The glyph spacing is NaN, infinite or negative.
    InvalidFontSpacing,

    #[error("{0} must be greater than 0")]
    /// A count that must be positive was zero.
    Zero(&'static str),
}

/// Tunable editor settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Font size in pixels; also the line height.
    pub font_size: u32,
    /// Extra horizontal pixels between glyphs.
    pub font_spacing: f32,
    /// Smallest font size reachable by zooming out.
    pub min_font_size: u32,
    /// Largest font size reachable by zooming in.
    pub max_font_size: u32,
    /// Spaces inserted by the tab command.
    pub tab_width: usize,
    /// Lines skipped by page-up/page-down.
    pub page_lines: usize,
    /// How long a notification stays visible.
    pub notification_duration: Duration,
    /// Capacity of the buffer's first allocation.
    pub initial_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_spacing: 0.0,
            min_font_size: 4,
            max_font_size: 96,
            tab_width: DEFAULT_TAB_WIDTH,
            page_lines: DEFAULT_PAGE_LINES,
            notification_duration: Duration::from_secs(2),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl EditorConfig {
    /// Set the starting font size.
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the glyph spacing.
    pub fn with_font_spacing(mut self, font_spacing: f32) -> Self {
        self.font_spacing = font_spacing;
        self
    }

    /// Set the zoom range.
    pub fn with_font_range(mut self, min: u32, max: u32) -> Self {
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }

    /// Set the number of spaces inserted by the tab command.
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Set the page size for page-up/page-down.
    pub fn with_page_lines(mut self, page_lines: usize) -> Self {
        self.page_lines = page_lines;
        self
    }

    /// Set how long notifications stay visible.
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    /// Set the capacity of the buffer's first allocation.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Check that the settings are usable together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_font_size == 0 || self.min_font_size > self.max_font_size {
            return Err(ConfigError::InvalidFontRange {
                min: self.min_font_size,
                max: self.max_font_size,
            });
        }
        if !(self.min_font_size..=self.max_font_size).contains(&self.font_size) {
            return Err(ConfigError::FontSizeOutOfRange {
                size: self.font_size,
                min: self.min_font_size,
                max: self.max_font_size,
            });
        }
        if !self.font_spacing.is_finite() || self.font_spacing < 0.0 {
            return Err(ConfigError::InvalidFontSpacing);
        }
        if self.tab_width == 0 {
            return Err(ConfigError::Zero("tab width"));
        }
        if self.page_lines == 0 {
            return Err(ConfigError::Zero("page lines"));
        }
        if self.initial_capacity == 0 {
            return Err(ConfigError::Zero("initial capacity"));
        }
        Ok(())
    }

    /// `size` clamped into the zoom range.
    pub fn clamp_font_size(&self, size: u32) -> u32 {
        size.clamp(self.min_font_size, self.max_font_size.max(self.min_font_size))
    }
}
