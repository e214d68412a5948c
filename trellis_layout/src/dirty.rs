// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change detection for layout-affecting values.
//!
//! Both wrappers mark themselves dirty only when a write actually changes the
//! stored value, so repeatedly assigning the same value never forces a new
//! layout pass.

use core::ops::Deref;

/// A value plus a flag recording whether it changed since the last reset.
#[derive(Clone, Debug, Default)]
pub struct DirtyTracker<T> {
    value: T,
    dirty: bool,
}

impl<T: PartialEq> DirtyTracker<T> {
    /// Wrap `value`. The tracker starts clean.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            dirty: false,
        }
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether the value changed since the last [`Self::reset_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Store `value` if it differs from the current one.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.dirty = true;
        true
    }

    /// Mutate in place; marks dirty if the result differs from before.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> bool
    where
        T: Clone,
    {
        let before = self.value.clone();
        f(&mut self.value);
        let changed = self.value != before;
        self.dirty |= changed;
        changed
    }

    /// Clear the dirty flag.
    pub fn reset_dirty(&mut self) {
        self.dirty = false;
    }
}

impl<T> Deref for DirtyTracker<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

/// A list that tracks whether its contents changed since the last reset.
///
/// Structural edits (`push`, `insert`, `remove_at`) always mark the list dirty;
/// value-based edits only when they have an effect.
#[derive(Clone, Debug)]
pub struct DirtyTrackingList<T> {
    items: Vec<T>,
    dirty: bool,
}

impl<T> Default for DirtyTrackingList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            dirty: false,
        }
    }
}

impl<T: PartialEq> DirtyTrackingList<T> {
    /// Empty, clean list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the contents changed since the last [`Self::reset_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn reset_dirty(&mut self) {
        self.dirty = false;
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Replace the item at `index`; marks dirty only if the value differs.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: T) {
        if self.items[index] != value {
            self.items[index] = value;
            self.dirty = true;
        }
    }

    /// Append an item.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
        self.dirty = true;
    }

    /// Insert an item at `index`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.items.insert(index, value);
        self.dirty = true;
    }

    /// Remove and return the item at `index`.
    pub fn remove_at(&mut self, index: usize) -> T {
        self.dirty = true;
        self.items.remove(index)
    }

    /// Remove the first item equal to `value`. Returns whether one was found.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.items.iter().position(|item| item == value) {
            Some(index) => {
                self.items.remove(index);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Remove every item matching `predicate`.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        if self.items.len() != before {
            self.dirty = true;
        }
    }

    /// Remove everything. Only marks dirty if the list was non-empty.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.dirty = true;
    }

    /// Replace the whole contents.
    ///
    /// Returns `false`, and leaves the list clean, if the new items are equal
    /// to the current ones.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = T>) -> bool {
        let items: Vec<T> = items.into_iter().collect();
        if items == self.items {
            return false;
        }
        self.items = items;
        self.dirty = true;
        true
    }

    /// Whether any item equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    /// Index of the first item equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }
}

impl<T> Deref for DirtyTrackingList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> FromIterator<T> for DirtyTrackingList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            dirty: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_only_dirties_on_change() {
        let mut tracker = DirtyTracker::new(3);
        assert!(!tracker.is_dirty());
        assert!(!tracker.set(3));
        assert!(!tracker.is_dirty());
        assert!(tracker.set(4));
        assert!(tracker.is_dirty());
        assert_eq!(*tracker.get(), 4);
        tracker.reset_dirty();
        assert!(!tracker.is_dirty());
        assert!(!tracker.update(|v| *v += 0));
        assert!(tracker.update(|v| *v += 1));
        assert_eq!(*tracker, 5);
    }

    #[test]
    fn list_structural_edits_mark_dirty() {
        let mut list = DirtyTrackingList::new();
        list.push(1);
        assert!(list.is_dirty());
        list.reset_dirty();
        list.insert(0, 0);
        assert!(list.is_dirty());
        list.reset_dirty();
        assert_eq!(list.remove_at(0), 0);
        assert!(list.is_dirty());
        assert_eq!(&*list, &[1]);
    }

    #[test]
    fn list_value_edits_only_mark_dirty_on_effect() {
        let mut list: DirtyTrackingList<i32> = [1, 2, 3].into_iter().collect();
        assert!(!list.is_dirty());
        list.set(1, 2);
        assert!(!list.is_dirty());
        assert!(!list.remove(&7));
        assert!(!list.is_dirty());
        assert!(!list.set_items([1, 2, 3]));
        assert!(!list.is_dirty());

        list.set(1, 5);
        assert!(list.is_dirty());
        list.reset_dirty();
        assert!(list.remove(&5));
        assert!(list.is_dirty());
        list.reset_dirty();
        assert!(list.set_items([9]));
        assert!(list.is_dirty());
    }

    #[test]
    fn clearing_empty_list_stays_clean() {
        let mut list: DirtyTrackingList<u8> = DirtyTrackingList::new();
        list.clear();
        assert!(!list.is_dirty());
        list.push(1);
        list.reset_dirty();
        list.clear();
        assert!(list.is_dirty());
        assert!(list.is_empty());
    }

    #[test]
    fn remove_where_tracks_effect() {
        let mut list: DirtyTrackingList<i32> = [1, 2, 3, 4].into_iter().collect();
        list.remove_where(|v| *v > 10);
        assert!(!list.is_dirty());
        list.remove_where(|v| v % 2 == 0);
        assert!(list.is_dirty());
        assert_eq!(list.index_of(&3), Some(1));
    }
}
