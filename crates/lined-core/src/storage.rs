//! Stage 1: Linear Storage Layer
//!
//! The document is one contiguous run of bytes. Insertions and deletions shift the
//! tail of the buffer in place; growth is geometric through [`DynArray`], so typing at
//! the end of a document is amortized O(1) and typing in the middle is O(n) per byte.
//!
//! The buffer does not interpret its contents. Line terminators are only meaningful
//! to [`LineIndex`](crate::line_index::LineIndex).

use crate::dyn_array::{DEFAULT_INITIAL_CAPACITY, DynArray};
use std::borrow::Cow;
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors produced by [`TextBuffer`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("offset {offset} is past the end of the buffer (length {len})")]
    /// An insertion point was beyond the end of the buffer.
    InvalidOffset {
        /// Requested offset.
        offset: usize,
        /// Buffer length at the time of the call.
        len: usize,
    },

    #[error("range {start}..{end} is outside the buffer (length {len})")]
    /// A range did not fit inside the buffer, or was reversed.
    InvalidRange {
        /// Inclusive start offset.
        start: usize,
        /// Exclusive end offset.
        end: usize,
        /// Buffer length at the time of the call.
        len: usize,
    },

    #[error("buffer growth failed: {0}")]
    /// The allocator refused to grow the buffer. Editing cannot continue.
    Allocation(#[from] TryReserveError),
}

/// Mutable byte storage for one document.
///
/// # Example
///
/// ```rust
/// use lined_core::TextBuffer;
///
/// let mut buffer = TextBuffer::from_bytes(b"helo").unwrap();
/// buffer.insert(3, b'l').unwrap();
/// assert_eq!(buffer.as_bytes(), b"hello");
///
/// buffer.delete_range(0, 1).unwrap();
/// assert_eq!(buffer.slice(0, 4).unwrap(), b"ello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    bytes: DynArray<u8>,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::with_initial_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Create an empty buffer whose first allocation holds `initial_capacity` bytes.
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            bytes: DynArray::with_initial_capacity(initial_capacity),
        }
    }

    /// Create a buffer holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        let mut buffer = Self::new();
        buffer.load(bytes)?;
        Ok(buffer)
    }

    /// Number of content bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes that fit before the next reallocation.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Whole buffer content.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Byte at `offset`, if any.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    /// Content as text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Insert one byte at `offset` (`offset <= len`).
    pub fn insert(&mut self, offset: usize, byte: u8) -> Result<(), StorageError> {
        self.check_offset(offset)?;
        self.bytes.insert(offset, byte)?;
        Ok(())
    }

    /// Insert a run of bytes at `offset` (`offset <= len`).
    ///
    /// Equivalent to inserting each byte in order, with a single tail shift.
    pub fn insert_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<(), StorageError> {
        self.check_offset(offset)?;
        self.bytes.insert_slice(offset, bytes)?;
        Ok(())
    }

    /// Delete `len` bytes starting at `offset`.
    pub fn delete_range(&mut self, offset: usize, len: usize) -> Result<(), StorageError> {
        let end = self.check_range(offset, offset.saturating_add(len))?;
        self.bytes.remove_range(offset..end);
        Ok(())
    }

    /// Replace the whole content. On failure the previous content is kept.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        self.bytes.replace_with(bytes)?;
        Ok(())
    }

    /// Borrow `start..end` without copying.
    pub fn slice(&self, start: usize, end: usize) -> Result<&[u8], StorageError> {
        let end = self.check_range(start, end)?;
        Ok(&self.bytes[start..end])
    }

    fn check_offset(&self, offset: usize) -> Result<(), StorageError> {
        if offset > self.len() {
            return Err(StorageError::InvalidOffset {
                offset,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<usize, StorageError> {
        if start > end || end > self.len() {
            return Err(StorageError::InvalidRange {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(end)
    }
}
