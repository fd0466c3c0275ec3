//! Pluggable backing storage for slot arenas.
//!
//! A [`SlotStore`] is the growable, index-addressable run of [`Slot`]s an
//! arena threads its free list through. The store is chosen once, at the
//! type level, through a [`Backing`] family, and built from the arena's
//! [`ArenaConfig`]; it is never swapped afterwards.
//!
//! | Backing | Store | Growth |
//! |---------|-------|--------|
//! | [`Contiguous`] | [`VecStore`] | One `Vec`; existing slots may move |
//! | [`Chunked`] | [`ChunkedStore`] | Fixed-size chunks; existing slots never move |
//!
//! Index stability holds for both. Address stability (a value staying at
//! the same memory location while the arena grows) holds only for
//! [`Chunked`].

use crate::config::ArenaConfig;
use crate::slot::Slot;

/// Growable, index-addressable slot storage.
pub trait SlotStore<T> {
    /// Build an empty store for the given config.
    fn with_config(config: &ArenaConfig) -> Self
    where
        Self: Sized;

    /// Number of slots (free and occupied).
    fn len(&self) -> usize;

    /// Whether the store has no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot at `index`, or `None` if out of range.
    fn get(&self, index: usize) -> Option<&Slot<T>>;

    /// Mutable slot at `index`, or `None` if out of range.
    fn get_mut(&mut self, index: usize) -> Option<&mut Slot<T>>;

    /// Append slots until `len() == new_len`, building slot `i` with `fill(i)`.
    ///
    /// Does nothing if `new_len <= len()`.
    fn grow_to<F: FnMut(usize) -> Slot<T>>(&mut self, new_len: usize, fill: F);

    /// All slots in index order.
    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a Slot<T>>
    where
        T: 'a;

    /// All slots in index order, mutably.
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = &'a mut Slot<T>>
    where
        T: 'a;
}

/// Selects the store type an arena (or a forest's pair of arenas) uses.
pub trait Backing {
    /// The store holding slots of `T`.
    type Store<T>: SlotStore<T>;
}

/// Backing with a single contiguous `Vec`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Contiguous;

impl Backing for Contiguous {
    type Store<T> = VecStore<T>;
}

/// Backing with fixed-size chunks that never relocate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chunked;

impl Backing for Chunked {
    type Store<T> = ChunkedStore<T>;
}

// ── VecStore ────────────────────────────────────────────────────────

/// A single `Vec<Slot<T>>`.
///
/// Fastest lookups; growth may reallocate and move every slot.
#[derive(Clone, Debug)]
pub struct VecStore<T> {
    slots: Vec<Slot<T>>,
}

impl<T> SlotStore<T> for VecStore<T> {
    fn with_config(config: &ArenaConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_capacity as usize),
        }
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, index: usize) -> Option<&Slot<T>> {
        self.slots.get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut Slot<T>> {
        self.slots.get_mut(index)
    }

    fn grow_to<F: FnMut(usize) -> Slot<T>>(&mut self, new_len: usize, mut fill: F) {
        let old_len = self.slots.len();
        if new_len <= old_len {
            return;
        }
        self.slots.reserve_exact(new_len - old_len);
        self.slots.extend((old_len..new_len).map(&mut fill));
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a Slot<T>>
    where
        T: 'a,
    {
        self.slots.iter()
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = &'a mut Slot<T>>
    where
        T: 'a,
    {
        self.slots.iter_mut()
    }
}

// ── ChunkedStore ────────────────────────────────────────────────────

/// Slots split across chunks of `chunk_size` each.
///
/// Every chunk is allocated at full capacity up front and only ever pushed
/// into up to that capacity, so its buffer never reallocates. Growing the
/// store appends chunks; slots already handed out keep their address.
#[derive(Debug)]
pub struct ChunkedStore<T> {
    chunks: Vec<Vec<Slot<T>>>,
    /// `log2(chunk_size)`.
    shift: u32,
    len: usize,
}

impl<T> ChunkedStore<T> {
    fn chunk_size(&self) -> usize {
        1 << self.shift
    }

    fn mask(&self) -> usize {
        self.chunk_size() - 1
    }

    /// Number of chunks allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

impl<T> SlotStore<T> for ChunkedStore<T> {
    fn with_config(config: &ArenaConfig) -> Self {
        // `validate()` guarantees a power of two; fall back to 1 otherwise.
        let shift = config.chunk_size.max(1).trailing_zeros();
        Self {
            chunks: Vec::new(),
            shift,
            len: 0,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Option<&Slot<T>> {
        if index >= self.len {
            return None;
        }
        self.chunks.get(index >> self.shift)?.get(index & self.mask())
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut Slot<T>> {
        if index >= self.len {
            return None;
        }
        let mask = self.mask();
        self.chunks
            .get_mut(index >> self.shift)?
            .get_mut(index & mask)
    }

    fn grow_to<F: FnMut(usize) -> Slot<T>>(&mut self, new_len: usize, mut fill: F) {
        let chunk_size = self.chunk_size();
        while self.len < new_len {
            let needs_chunk = self
                .chunks
                .last()
                .is_none_or(|chunk| chunk.len() == chunk_size);
            if needs_chunk {
                self.chunks.push(Vec::with_capacity(chunk_size));
            }
            if let Some(chunk) = self.chunks.last_mut() {
                chunk.push(fill(self.len));
            }
            self.len += 1;
        }
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a Slot<T>>
    where
        T: 'a,
    {
        self.chunks.iter().flat_map(|chunk| chunk.iter())
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = &'a mut Slot<T>>
    where
        T: 'a,
    {
        self.chunks.iter_mut().flat_map(|chunk| chunk.iter_mut())
    }
}

impl<T: Clone> Clone for ChunkedStore<T> {
    // `Vec::clone` would shrink the tail chunk's capacity; later pushes
    // into it would then reallocate and move its slots.
    fn clone(&self) -> Self {
        let chunk_size = self.chunk_size();
        let chunks = self
            .chunks
            .iter()
            .map(|chunk| {
                let mut copy = Vec::with_capacity(chunk_size);
                copy.extend(chunk.iter().cloned());
                copy
            })
            .collect();
        Self {
            chunks,
            shift: self.shift,
            len: self.len,
        }
    }
}
