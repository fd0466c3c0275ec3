//! Strongly-typed slot indices.
//!
//! An [`Idx<C>`] is a `u32` slot index tagged with a phantom index class `C`.
//! The class keeps indices from different arenas from being silently
//! interchanged: an `Idx<NodeClass>` will not type-check where an
//! `Idx<ChildListClass>` is expected, even though both are a single `u32`
//! at runtime.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Raw value of the null sentinel. Never a valid live index.
pub const NULL_RAW: u32 = u32::MAX;

/// Maximum number of slots an arena can address.
///
/// Valid indices are `0..MAX_SLOTS`; the value `MAX_SLOTS` itself is the
/// null sentinel.
pub const MAX_SLOTS: u32 = NULL_RAW;

/// A stable slot index carrying a phantom index class.
///
/// The default value is [`Idx::NULL`]. An index stays valid until the slot
/// it names is erased; afterwards the same raw value may be handed out
/// again by a later `emplace`.
#[must_use]
pub struct Idx<C> {
    raw: u32,
    _class: PhantomData<fn() -> C>,
}

impl<C> Idx<C> {
    /// The null sentinel for this index class.
    pub const NULL: Self = Self::new(NULL_RAW);

    /// The first slot of an arena.
    pub const ZERO: Self = Self::new(0);

    /// Wrap a raw slot number.
    pub const fn new(raw: u32) -> Self {
        Self {
            raw,
            _class: PhantomData,
        }
    }

    /// Wrap a `usize` position, mapping anything unrepresentable to null.
    pub fn from_usize(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) => Self::new(raw),
            Err(_) => Self::NULL,
        }
    }

    /// The raw slot number.
    pub const fn raw(self) -> u32 {
        self.raw
    }

    /// The slot number as a `usize`, for indexing backing storage.
    pub const fn index(self) -> usize {
        self.raw as usize
    }

    /// Whether this is the null sentinel.
    pub const fn is_null(self) -> bool {
        self.raw == NULL_RAW
    }

    /// Whether this index names a slot at all (the inverse of [`is_null`](Self::is_null)).
    ///
    /// A valid index is not necessarily live; use the owning arena's
    /// `contains` for that.
    pub const fn is_valid(self) -> bool {
        !self.is_null()
    }

    /// The index `off` slots further on.
    ///
    /// Null stays null, and an offset that would land on or past the
    /// sentinel yields null.
    pub const fn off_by(self, off: u32) -> Self {
        if self.is_null() {
            return Self::NULL;
        }
        match self.raw.checked_add(off) {
            Some(raw) if raw != NULL_RAW => Self::new(raw),
            _ => Self::NULL,
        }
    }

    /// `None` for null, `Some(self)` otherwise.
    pub const fn to_option(self) -> Option<Self> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }
}

// Manual impls: derives would demand the same traits of `C`, which is
// only ever a marker type.

impl<C> Clone for Idx<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Idx<C> {}

impl<C> PartialEq for Idx<C> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<C> Eq for Idx<C> {}

impl<C> PartialOrd for Idx<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for Idx<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<C> Hash for Idx<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<C> Default for Idx<C> {
    fn default() -> Self {
        Self::NULL
    }
}

impl<C> fmt::Debug for Idx<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Idx(null)")
        } else {
            write!(f, "Idx({})", self.raw)
        }
    }
}

impl<C> fmt::Display for Idx<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "#{}", self.raw)
        }
    }
}

impl<C> From<u32> for Idx<C> {
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl<C> From<Idx<C>> for u32 {
    fn from(idx: Idx<C>) -> Self {
        idx.raw
    }
}
