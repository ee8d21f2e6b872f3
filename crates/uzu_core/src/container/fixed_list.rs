//! # Fixed List
//!
//! Insertion-ordered storage with a hard capacity chosen at creation.

use crate::error::{UzuError, UzuResult};

/// A fixed-capacity list.
///
/// Backing storage is reserved once. `push`, `pop`, `remove_at` and
/// `clear` never reallocate; a full list rejects new items with
/// [`UzuError::CapacityExceeded`] instead of growing. The only ways to
/// change the backing allocation are [`FixedList::grow`] and
/// [`FixedList::release`].
///
/// Removal shifts later items left, so relative order is always preserved.
///
/// # Example
///
/// ```rust
/// use uzu_core::FixedList;
///
/// let mut list = FixedList::new(2);
/// list.push('a')?;
/// list.push('b')?;
/// assert!(list.push('c').is_err());
///
/// list.remove_at(0)?;
/// assert_eq!(list.as_slice(), &['b']);
/// # Ok::<(), uzu_core::UzuError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FixedList<T> {
    /// Items in insertion order. `items.len()` is the logical size.
    items: Vec<T>,
    /// Maximum logical size.
    capacity: usize,
}

impl<T> FixedList<T> {
    /// Creates an empty list that can hold `capacity` items.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the number of stored items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if another `push` would fail.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Returns the maximum number of items.
    ///
    /// This differs from [`FixedList::len`], which counts stored items.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends an item at the end. O(1).
    ///
    /// # Errors
    ///
    /// [`UzuError::CapacityExceeded`] if the list is full. The item is dropped.
    pub fn push(&mut self, item: T) -> UzuResult<()> {
        if self.is_full() {
            return Err(UzuError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the last item.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the last item without removing it.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the item at `index`.
    ///
    /// # Errors
    ///
    /// [`UzuError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> UzuResult<&T> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(UzuError::IndexOutOfRange { index, len })
    }

    /// Returns the item at `index` mutably.
    ///
    /// # Errors
    ///
    /// [`UzuError::IndexOutOfRange`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> UzuResult<&mut T> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(UzuError::IndexOutOfRange { index, len })
    }

    /// Overwrites the item at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// [`UzuError::IndexOutOfRange`] if `index >= len()`.
    pub fn set(&mut self, index: usize, item: T) -> UzuResult<T> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, item))
    }

    /// Removes the item at `index`, shifting later items left. O(n).
    ///
    /// # Errors
    ///
    /// [`UzuError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> UzuResult<T> {
        let len = self.items.len();
        if index >= len {
            return Err(UzuError::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    /// Resets the logical size to zero. The reserved storage is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Clears the list and frees its storage.
    ///
    /// Capacity drops to zero; the list rejects every `push` until grown.
    pub fn release(&mut self) {
        self.items = Vec::new();
        self.capacity = 0;
    }

    /// Raises the capacity by `additional`, reallocating once if needed.
    pub fn grow(&mut self, additional: usize) {
        self.capacity += additional;
        let reserve = self.capacity.saturating_sub(self.items.len());
        self.items.reserve_exact(reserve);
    }

    /// Returns the stored items as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over stored items in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates mutably over stored items in insertion order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: PartialEq> FixedList<T> {
    /// Returns true if `item` is stored. O(n).
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Returns the index of the first stored item equal to `item`. O(n).
    #[must_use]
    pub fn find_index(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|x| x == item)
    }

    /// Removes the first item equal to `item`, preserving order.
    ///
    /// Prefer [`FixedList::remove_at`] when the index is already known.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.find_index(item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<'a, T> IntoIterator for &'a FixedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
