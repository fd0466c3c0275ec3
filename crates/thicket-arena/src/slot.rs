//! Tagged slot cells.

use thicket_core::NULL_RAW;

/// One storage cell of a [`SlotArena`](crate::SlotArena).
///
/// A free slot stores the raw index of the next free slot (or the null
/// sentinel at the end of the chain). The tag makes occupancy an O(1)
/// question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<T> {
    /// Part of the free list.
    Free {
        /// Next free slot, or `NULL_RAW` at the end of the chain.
        next: u32,
    },
    /// Holds a live value.
    Occupied(T),
}

impl<T> Slot<T> {
    /// A free slot terminating the chain.
    pub const fn end() -> Self {
        Self::Free { next: NULL_RAW }
    }

    /// Whether this slot is on the free list.
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free { .. })
    }

    /// Whether this slot holds a value.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    /// The held value, if occupied.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Occupied(v) => Some(v),
            Self::Free { .. } => None,
        }
    }

    /// The held value mutably, if occupied.
    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Occupied(v) => Some(v),
            Self::Free { .. } => None,
        }
    }

    /// The free-list link, if free.
    pub fn next_free(&self) -> Option<u32> {
        match self {
            Self::Free { next } => Some(*next),
            Self::Occupied(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_slot_has_link_but_no_value() {
        let slot: Slot<u8> = Slot::Free { next: 3 };
        assert!(slot.is_free());
        assert_eq!(slot.next_free(), Some(3));
        assert_eq!(slot.value(), None);
    }

    #[test]
    fn occupied_slot_has_value_but_no_link() {
        let mut slot = Slot::Occupied(9);
        assert!(slot.is_occupied());
        assert_eq!(slot.next_free(), None);
        *slot.value_mut().unwrap() += 1;
        assert_eq!(slot.value(), Some(&10));
    }

    #[test]
    fn end_links_to_null() {
        assert_eq!(Slot::<()>::end().next_free(), Some(NULL_RAW));
    }
}
