//! Growable Sequence
//!
//! A contiguous, owned sequence with explicit geometric growth. Capacity starts at a
//! small fixed size and doubles whenever an insertion would overflow it, so a long run
//! of single-element inserts costs amortized O(1) allocations.
//!
//! Growth goes through [`Vec::try_reserve_exact`], which lets allocation failure surface
//! as a [`TryReserveError`] instead of aborting the process. Callers decide whether that
//! is fatal.

use std::collections::TryReserveError;
use std::ops::{Deref, Range};

/// Capacity of the first allocation made by an empty [`DynArray`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

/// Owned growable sequence with doubling capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynArray<T> {
    items: Vec<T>,
    initial_capacity: usize,
}

impl<T> DynArray<T> {
    /// Create an empty sequence; nothing is allocated until the first insert.
    pub fn new() -> Self {
        Self::with_initial_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Create an empty sequence whose first allocation holds `initial_capacity` items.
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            initial_capacity: initial_capacity.max(1),
        }
    }

    /// Wrap an already allocated vector.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items that fit without another allocation.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Borrow the contents.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Make room for `additional` more items, doubling capacity until they fit.
    pub fn reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let needed = self.items.len().saturating_add(additional);
        let capacity = self.items.capacity();
        if needed <= capacity {
            return Ok(());
        }

        let mut target = if capacity == 0 {
            self.initial_capacity
        } else {
            capacity
        };
        while target < needed {
            target = target.saturating_mul(2);
        }

        self.items.try_reserve_exact(target - self.items.len())
    }

    /// Append one item.
    pub fn push(&mut self, item: T) -> Result<(), TryReserveError> {
        self.reserve(1)?;
        self.items.push(item);
        Ok(())
    }

    /// Insert one item at `index`, shifting the tail right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), TryReserveError> {
        self.reserve(1)?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Remove `range`, shifting the tail left. Capacity is kept.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn remove_range(&mut self, range: Range<usize>) {
        self.items.drain(range);
    }

    /// Drop all items, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> DynArray<T> {
    /// Insert a run of items at `index`, shifting the tail right once.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_slice(&mut self, index: usize, items: &[T]) -> Result<(), TryReserveError> {
        if items.is_empty() {
            return Ok(());
        }
        self.reserve(items.len())?;
        self.items.splice(index..index, items.iter().cloned());
        Ok(())
    }

    /// Replace the whole contents with `items`.
    ///
    /// On allocation failure the previous contents are left untouched.
    pub fn replace_with(&mut self, items: &[T]) -> Result<(), TryReserveError> {
        if items.len() > self.items.capacity() {
            let mut fresh = Self::with_initial_capacity(self.initial_capacity);
            fresh.reserve(items.len())?;
            fresh.items.extend_from_slice(items);
            *self = fresh;
            return Ok(());
        }
        self.items.clear();
        self.items.extend_from_slice(items);
        Ok(())
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}
