//! Swap-and-pop removal for plain dynamic sequences.
//!
//! Removing position `i` moves the last element into `i` and shrinks the
//! sequence by one. O(1), but the order of the remaining elements changes.
//! Forest child lists never use this (sibling order is observable); it is
//! provided for callers that keep unordered collections of indices.

use smallvec::{Array, SmallVec};

/// Sequences that support O(1) unordered removal.
pub trait SwapErase {
    /// Element type.
    type Item;

    /// Remove the element at `index` by swapping in the last element.
    ///
    /// Returns `None` (and leaves the sequence untouched) if `index` is out
    /// of range.
    fn swap_erase(&mut self, index: usize) -> Option<Self::Item>;
}

impl<T> SwapErase for Vec<T> {
    type Item = T;

    fn swap_erase(&mut self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        Some(self.swap_remove(index))
    }
}

impl<A: Array> SwapErase for SmallVec<A> {
    type Item = A::Item;

    fn swap_erase(&mut self, index: usize) -> Option<A::Item> {
        if index >= self.len() {
            return None;
        }
        Some(self.swap_remove(index))
    }
}

/// Free-function form of [`SwapErase::swap_erase`].
pub fn swap_erase<S: SwapErase + ?Sized>(seq: &mut S, index: usize) -> Option<S::Item> {
    seq.swap_erase(index)
}
