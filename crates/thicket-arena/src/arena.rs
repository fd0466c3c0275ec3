//! The slot arena.
//!
//! [`SlotArena`] hands out stable [`Idx`] handles for values and recycles
//! them through an intrusive free list threaded through the free slots
//! themselves.
//!
//! ```text
//!   index:    0          1          2          3          4
//!          ┌──────┐  ┌────────┐  ┌──────┐  ┌────────┐  ┌────────┐
//!          │ "a"  │  │ Free→3 │  │ "c"  │  │ Free→4 │  │ Free→∅ │
//!          └──────┘  └────────┘  └──────┘  └────────┘  └────────┘
//!   free_head = 1, free_tail = 4, live = 2
//! ```
//!
//! `erase(i)` pushes `i` on the head of the chain, so the next `emplace`
//! returns `i` again (LIFO reuse). Growth appends a fresh ascending chain
//! and splices it onto the tail.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use thicket_core::{ArenaError, Idx, MAX_SLOTS, NULL_RAW};

use crate::config::{ArenaConfig, ConfigError};
use crate::slot::Slot;
use crate::store::{Backing, Contiguous, SlotStore};

/// Free-list slot arena.
///
/// - `T`: the stored value type.
/// - `C`: the index class stamped on handed-out [`Idx`] values. Defaults to
///   `T`; give two arenas of the same `T` different classes to keep their
///   indices apart.
/// - `B`: the [`Backing`] family that picks the slot store.
///
/// Not synchronised. Share across threads behind a lock
/// (e.g. [`thicket_core::SpinLock`]).
pub struct SlotArena<T, C = T, B: Backing = Contiguous> {
    store: B::Store<T>,
    /// Head of the free chain, or `NULL_RAW` when full.
    free_head: u32,
    /// Last slot of the free chain, or `NULL_RAW` when full.
    free_tail: u32,
    /// Occupied slot count.
    live: usize,
    /// One past the highest index handed out since construction or `clear`.
    high_water: usize,
    config: ArenaConfig,
    _class: PhantomData<fn() -> C>,
}

impl<T, C> SlotArena<T, C, Contiguous> {
    /// Create an empty arena with the default config and contiguous backing.
    pub fn new() -> Self {
        Self::build(ArenaConfig::default())
    }
}

impl<T, C> Default for SlotArena<T, C, Contiguous> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C, B: Backing> SlotArena<T, C, B> {
    /// Create an arena from a validated config.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create an empty arena with `capacity` slots pre-allocated.
    ///
    /// `capacity` is clamped to [`MAX_SLOTS`].
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = u32::try_from(capacity).unwrap_or(MAX_SLOTS);
        Self::build(ArenaConfig::new(capacity))
    }

    fn build(config: ArenaConfig) -> Self {
        let mut arena = Self {
            store: <B::Store<T> as SlotStore<T>>::with_config(&config),
            free_head: NULL_RAW,
            free_tail: NULL_RAW,
            live: 0,
            high_water: 0,
            config,
            _class: PhantomData,
        };
        let initial = arena.config.initial_capacity as usize;
        if initial > 0 {
            arena.grow_to(initial);
        }
        arena
    }

    /// The config this arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    // ── Insertion and removal ───────────────────────────────────────

    /// Store `value` in the head free slot and return its index.
    ///
    /// Grows the arena first if no slot is free. Amortised O(1).
    pub fn emplace(&mut self, value: T) -> Result<Idx<C>, ArenaError> {
        self.emplace_with(|_| value)
    }

    /// Like [`emplace`](Self::emplace), but builds the value from the index
    /// it will live at.
    pub fn emplace_with<F: FnOnce(Idx<C>) -> T>(&mut self, make: F) -> Result<Idx<C>, ArenaError> {
        if self.free_head == NULL_RAW {
            self.expand()?;
        }
        let raw = self.free_head;
        let idx = Idx::new(raw);
        let slot = self
            .store
            .get_mut(raw as usize)
            .expect("free-list head is always in range");
        let next = slot
            .next_free()
            .expect("free-list head is always a free slot");
        *slot = Slot::Occupied(make(idx));

        self.free_head = next;
        if next == NULL_RAW {
            self.free_tail = NULL_RAW;
        }
        self.live += 1;
        self.high_water = self.high_water.max(raw as usize + 1);
        Ok(idx)
    }

    /// Remove and return the value at `idx`.
    ///
    /// Fails with [`ArenaError::InvalidIndex`] if `idx` is out of range or
    /// already free; the arena is left untouched in that case.
    pub fn remove(&mut self, idx: Idx<C>) -> Result<T, ArenaError> {
        if !self.contains(idx) {
            return Err(self.invalid(idx));
        }
        Ok(self.erase_unchecked(idx))
    }

    /// Erase the value at `idx`, returning whether anything was erased.
    pub fn erase(&mut self, idx: Idx<C>) -> bool {
        self.remove(idx).is_ok()
    }

    /// Erase without validating `idx`.
    ///
    /// The caller promises `idx` was returned by `emplace` and has not been
    /// erased since. Only a `debug_assert!` checks this.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range, or if the slot was already free. In
    /// the latter case the free list has already been relinked through `idx`
    /// and the arena is left inconsistent.
    pub fn erase_unchecked(&mut self, idx: Idx<C>) -> T {
        debug_assert!(self.contains(idx), "erase_unchecked on dead index {idx}");
        let head = self.free_head;
        let slot = self
            .store
            .get_mut(idx.index())
            .unwrap_or_else(|| panic!("erase_unchecked: index {idx} out of range"));
        let old = std::mem::replace(slot, Slot::Free { next: head });

        if self.free_tail == NULL_RAW {
            self.free_tail = idx.raw();
        }
        self.free_head = idx.raw();
        self.live -= 1;

        match old {
            Slot::Occupied(value) => value,
            Slot::Free { .. } => panic!("erase_unchecked: index {idx} was already free"),
        }
    }

    /// Drop every value and relink all slots into one ascending free chain.
    ///
    /// Capacity is unchanged.
    pub fn clear(&mut self) {
        let capacity = self.store.len();
        for (i, slot) in self.store.iter_mut().enumerate() {
            let next = if i + 1 == capacity {
                NULL_RAW
            } else {
                (i + 1) as u32
            };
            *slot = Slot::Free { next };
        }
        let dropped = self.live;
        self.live = 0;
        self.high_water = 0;
        if capacity == 0 {
            self.free_head = NULL_RAW;
            self.free_tail = NULL_RAW;
        } else {
            self.free_head = 0;
            self.free_tail = (capacity - 1) as u32;
        }
        tracing::trace!(target: "thicket::arena", capacity, dropped, "arena cleared");
    }

    // ── Lookup ──────────────────────────────────────────────────────

    /// Whether `idx` names an occupied slot. O(1).
    pub fn contains(&self, idx: Idx<C>) -> bool {
        matches!(self.store.get(idx.index()), Some(Slot::Occupied(_)))
    }

    /// The value at `idx`, or `None` if out of range or free.
    pub fn get(&self, idx: Idx<C>) -> Option<&T> {
        self.store.get(idx.index()).and_then(Slot::value)
    }

    /// The value at `idx` mutably, or `None` if out of range or free.
    pub fn get_mut(&mut self, idx: Idx<C>) -> Option<&mut T> {
        self.store.get_mut(idx.index()).and_then(Slot::value_mut)
    }

    /// Checked access: the value at `idx`, or [`ArenaError::InvalidIndex`].
    pub fn at(&self, idx: Idx<C>) -> Result<&T, ArenaError> {
        match self.store.get(idx.index()) {
            Some(Slot::Occupied(value)) => Ok(value),
            _ => Err(self.invalid(idx)),
        }
    }

    /// Checked mutable access: the value at `idx`, or [`ArenaError::InvalidIndex`].
    pub fn at_mut(&mut self, idx: Idx<C>) -> Result<&mut T, ArenaError> {
        let capacity = self.store.len();
        match self.store.get_mut(idx.index()) {
            Some(Slot::Occupied(value)) => Ok(value),
            _ => Err(ArenaError::InvalidIndex {
                index: idx.raw(),
                capacity,
            }),
        }
    }

    fn invalid(&self, idx: Idx<C>) -> ArenaError {
        ArenaError::InvalidIndex {
            index: idx.raw(),
            capacity: self.store.len(),
        }
    }

    // ── Sizing ──────────────────────────────────────────────────────

    /// Number of live values.
    pub fn size(&self) -> usize {
        self.live
    }

    /// Alias for [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no values are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total slots, free and occupied.
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Number of free slots (the length of the free chain).
    pub fn free_count(&self) -> usize {
        self.store.len() - self.live
    }

    /// One past the highest index handed out since construction or the
    /// last [`clear`](Self::clear): the number of slots ever touched.
    ///
    /// Never shrinks on `erase`, unlike [`size`](Self::size).
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Grow by one step of the configured growth policy.
    pub fn expand(&mut self) -> Result<(), ArenaError> {
        let current = self.store.len();
        match self.config.next_capacity(current) {
            Some(next) => {
                self.grow_to(next);
                Ok(())
            }
            None => Err(ArenaError::CapacityExceeded {
                requested: current + 1,
                limit: self.config.max_slots as usize,
            }),
        }
    }

    /// Grow to at least `capacity` slots. No-op if already that large.
    pub fn expand_to(&mut self, capacity: usize) -> Result<(), ArenaError> {
        if capacity <= self.store.len() {
            return Ok(());
        }
        let limit = self.config.max_slots as usize;
        if capacity > limit {
            return Err(ArenaError::CapacityExceeded {
                requested: capacity,
                limit,
            });
        }
        self.grow_to(capacity);
        Ok(())
    }

    /// Make sure the next `additional` emplaces will not need to grow.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArenaError> {
        let free = self.free_count();
        if additional <= free {
            return Ok(());
        }
        let capacity = self
            .store
            .len()
            .checked_add(additional - free)
            .ok_or(ArenaError::CapacityExceeded {
                requested: usize::MAX,
                limit: self.config.max_slots as usize,
            })?;
        self.expand_to(capacity)
    }

    /// Append slots up to `new_capacity` as a fresh ascending free chain and
    /// splice it onto the tail of the existing chain.
    fn grow_to(&mut self, new_capacity: usize) {
        let old_capacity = self.store.len();
        if new_capacity <= old_capacity {
            return;
        }
        let last = new_capacity - 1;
        self.store.grow_to(new_capacity, |i| Slot::Free {
            next: if i == last { NULL_RAW } else { (i + 1) as u32 },
        });

        let first = old_capacity as u32;
        if self.free_tail == NULL_RAW {
            self.free_head = first;
        } else if let Some(Slot::Free { next }) = self.store.get_mut(self.free_tail as usize) {
            *next = first;
        }
        self.free_tail = last as u32;

        tracing::debug!(
            target: "thicket::arena",
            old_capacity,
            new_capacity,
            live = self.live,
            "arena grew"
        );
    }

    // ── Iteration ───────────────────────────────────────────────────

    /// Live `(index, value)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (Idx<C>, &T)> {
        self.store
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.value().map(|v| (Idx::new(i as u32), v)))
    }

    /// Live `(index, value)` pairs in ascending index order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Idx<C>, &mut T)> {
        self.store
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.value_mut().map(|v| (Idx::new(i as u32), v)))
    }

    /// Live indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = Idx<C>> + '_ {
        self.iter().map(|(idx, _)| idx)
    }

    /// The free chain, head first: the order future emplaces will use.
    pub fn free_list(&self) -> impl Iterator<Item = Idx<C>> + '_ {
        std::iter::successors(Idx::<C>::new(self.free_head).to_option(), move |idx| {
            self.store
                .get(idx.index())
                .and_then(Slot::next_free)
                .and_then(|next| Idx::<C>::new(next).to_option())
        })
    }

    /// Walk the free chain and assert the structural invariants.
    ///
    /// O(capacity). Intended for tests and debugging.
    ///
    /// # Panics
    ///
    /// Panics if the chain is cyclic, names an occupied or out-of-range
    /// slot, disagrees with the free slot count, or ends somewhere other
    /// than `free_tail`.
    pub fn debug_validate_invariants(&self) {
        let capacity = self.store.len();
        let mut seen = vec![false; capacity];
        let mut chain_len = 0usize;
        let mut last = NULL_RAW;
        let mut cursor = self.free_head;
        while cursor != NULL_RAW {
            let i = cursor as usize;
            assert!(i < capacity, "free chain leaves the arena at {i}");
            assert!(!seen[i], "free chain revisits slot {i}");
            seen[i] = true;
            chain_len += 1;
            last = cursor;
            cursor = match self.store.get(i) {
                Some(Slot::Free { next }) => *next,
                _ => panic!("free chain passes through occupied slot {i}"),
            };
        }
        assert_eq!(last, self.free_tail, "free_tail is not the end of the chain");

        let free_slots = self.store.iter().filter(|s| s.is_free()).count();
        assert_eq!(chain_len, free_slots, "free slots missing from the chain");
        assert_eq!(self.live, capacity - chain_len, "live count drifted");
        if let Some((idx, _)) = self.iter().last() {
            assert!(idx.index() < self.high_water, "high-water mark too low");
        }
    }
}

impl<T, C, B: Backing> Index<Idx<C>> for SlotArena<T, C, B> {
    type Output = T;

    /// Unchecked access.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range or free.
    fn index(&self, idx: Idx<C>) -> &T {
        match self.store.get(idx.index()) {
            Some(Slot::Occupied(value)) => value,
            _ => panic!("no live value at index {idx}"),
        }
    }
}

impl<T, C, B: Backing> IndexMut<Idx<C>> for SlotArena<T, C, B> {
    fn index_mut(&mut self, idx: Idx<C>) -> &mut T {
        match self.store.get_mut(idx.index()) {
            Some(Slot::Occupied(value)) => value,
            _ => panic!("no live value at index {idx}"),
        }
    }
}

impl<T, C, B> Clone for SlotArena<T, C, B>
where
    B: Backing,
    B::Store<T>: Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            free_head: self.free_head,
            free_tail: self.free_tail,
            live: self.live,
            high_water: self.high_water,
            config: self.config.clone(),
            _class: PhantomData,
        }
    }
}

impl<T: fmt::Debug, C, B: Backing> fmt::Debug for SlotArena<T, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotArena")
            .field("live", &self.live)
            .field("capacity", &self.capacity())
            .field("free_head", &Idx::<C>::new(self.free_head))
            .field("values", &DebugValues(self))
            .finish()
    }
}

struct DebugValues<'a, T, C, B: Backing>(&'a SlotArena<T, C, B>);

impl<T: fmt::Debug, C, B: Backing> fmt::Debug for DebugValues<'_, T, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(idx, v)| (idx.raw(), v)))
            .finish()
    }
}
