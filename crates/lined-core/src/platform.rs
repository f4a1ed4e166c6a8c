//! Host Collaborators
//!
//! The core never touches the filesystem, the system clipboard or a font directly.
//! Hosts plug those in through the traits below; the default implementations cover
//! plain files, an in-process clipboard and monospace measurement.

use std::fs;
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthChar;

/// Whole-file load and save.
pub trait Persistence {
    /// Read the whole file at `path`.
    fn load(&mut self, path: &Path) -> io::Result<Vec<u8>>;

    /// Overwrite the file at `path` with `bytes`.
    fn save(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// [`Persistence`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPersistence;

impl Persistence for FsPersistence {
    fn load(&mut self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn save(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)
    }
}

/// Converts a run of bytes into a horizontal pixel extent.
///
/// Implementations must be pure: the same input always measures the same.
pub trait TextMeasure {
    /// Width of `text` rendered at `font_size` with `spacing` pixels between glyphs.
    fn measure(&self, text: &[u8], font_size: f32, spacing: f32) -> f32;
}

/// Fixed-advance measurement.
///
/// Each byte is treated as one code point and occupies its terminal cell width
/// (control bytes count as one cell, as hosts draw a placeholder for them). A cell is
/// `font_size * aspect` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Glyph advance as a fraction of the font size.
    pub aspect: f32,
}

impl MonospaceMeasure {
    /// Measurement with the given advance-to-size ratio.
    pub fn new(aspect: f32) -> Self {
        Self { aspect }
    }

    /// Measurement where one cell is exactly `font_size` wide (terminal hosts).
    pub fn cells() -> Self {
        Self::new(1.0)
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Display cells occupied by a single byte.
pub fn byte_cells(byte: u8) -> usize {
    if byte.is_ascii_control() {
        return 1;
    }
    char::from(byte).width().unwrap_or(1)
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &[u8], font_size: f32, spacing: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let cells: usize = text.iter().map(|&byte| byte_cells(byte)).sum();
        let gaps = (text.len() - 1) as f32;
        cells as f32 * font_size * self.aspect + gaps * spacing
    }
}

/// Text exchange with the outside world.
pub trait Clipboard {
    /// Current clipboard contents (empty if none).
    fn get_text(&mut self) -> Vec<u8>;

    /// Replace the clipboard contents.
    fn set_text(&mut self, text: &[u8]);
}

/// Clipboard that lives inside the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Vec<u8>,
}

impl MemoryClipboard {
    /// Empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Vec<u8> {
        self.contents.clone()
    }

    fn set_text(&mut self, text: &[u8]) {
        self.contents = text.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_measure() {
        let measure = MonospaceMeasure::new(0.5);
        assert_eq!(measure.measure(b"", 16.0, 0.0), 0.0);
        assert_eq!(measure.measure(b"abcd", 16.0, 0.0), 32.0);
        assert_eq!(measure.measure(b"abcd", 16.0, 2.0), 38.0);
        assert_eq!(MonospaceMeasure::cells().measure(b"abc", 1.0, 0.0), 3.0);
    }

    #[test]
    fn test_byte_cells() {
        assert_eq!(byte_cells(b'a'), 1);
        assert_eq!(byte_cells(b' '), 1);
        assert_eq!(byte_cells(b'\t'), 1);
        assert_eq!(byte_cells(0x1b), 1);
    }

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        assert!(clipboard.get_text().is_empty());
        clipboard.set_text(b"copied");
        assert_eq!(clipboard.get_text(), b"copied");
    }

    #[test]
    fn test_fs_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        let mut persistence = FsPersistence;

        persistence.save(&path, b"first version, long").unwrap();
        persistence.save(&path, b"short").unwrap();
        assert_eq!(persistence.load(&path).unwrap(), b"short");

        let missing = dir.path().join("missing.txt");
        assert!(persistence.load(&missing).is_err());
    }
}
