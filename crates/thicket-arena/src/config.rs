//! Arena configuration parameters.

use std::error::Error;
use std::fmt;

use thicket_core::MAX_SLOTS;

/// Configuration for a [`SlotArena`](crate::SlotArena).
///
/// Controls initial sizing, the growth policy, and the hard slot limit.
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Slots allocated up front. Default: 0.
    pub initial_capacity: u32,

    /// Multiplier applied to the capacity when `emplace` finds no free slot.
    ///
    /// Default: 2. Must be at least 1; a factor of 1 grows by
    /// `min_growth` only.
    pub growth_factor: u32,

    /// Minimum number of slots added by one growth step. Default: 8.
    /// Must be at least 1.
    pub min_growth: u32,

    /// Hard limit on total slots.
    ///
    /// Default: [`MAX_SLOTS`], the most a `u32` index can address with the
    /// top value reserved as the null sentinel. Growth past this limit
    /// fails with `CapacityExceeded`.
    pub max_slots: u32,

    /// Slots per chunk for the [`Chunked`](crate::Chunked) backing.
    ///
    /// Default: 64. Must be a non-zero power of two. Ignored by the
    /// contiguous backing.
    pub chunk_size: u32,
}

impl ArenaConfig {
    /// Default growth multiplier.
    pub const DEFAULT_GROWTH_FACTOR: u32 = 2;

    /// Default minimum growth step.
    pub const DEFAULT_MIN_GROWTH: u32 = 8;

    /// Default chunk size for the chunked backing.
    pub const DEFAULT_CHUNK_SIZE: u32 = 64;

    /// Create a config with the given initial capacity and defaults elsewhere.
    pub fn new(initial_capacity: u32) -> Self {
        Self {
            initial_capacity,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            min_growth: Self::DEFAULT_MIN_GROWTH,
            max_slots: MAX_SLOTS,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
        }
    }

    /// Same config with a different hard slot limit.
    pub fn with_max_slots(mut self, max_slots: u32) -> Self {
        self.max_slots = max_slots;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.growth_factor == 0 {
            return Err(ConfigError::ZeroGrowthFactor);
        }
        if self.min_growth == 0 {
            return Err(ConfigError::ZeroMinGrowth);
        }
        if !self.chunk_size.is_power_of_two() {
            return Err(ConfigError::ChunkSizeNotPowerOfTwo {
                chunk_size: self.chunk_size,
            });
        }
        if self.initial_capacity > self.max_slots {
            return Err(ConfigError::InitialCapacityOverLimit {
                initial_capacity: self.initial_capacity,
                max_slots: self.max_slots,
            });
        }
        Ok(())
    }

    /// Capacity after one growth step from `current`, clamped to `max_slots`.
    ///
    /// Returns `None` when `current` is already at the limit.
    pub fn next_capacity(&self, current: usize) -> Option<usize> {
        let limit = self.max_slots as usize;
        if current >= limit {
            return None;
        }
        let scaled = current.saturating_mul(self.growth_factor as usize);
        let stepped = current.saturating_add(self.min_growth as usize);
        Some(scaled.max(stepped).min(limit))
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Errors detected by [`ArenaConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `growth_factor` is zero.
    ZeroGrowthFactor,
    /// `min_growth` is zero.
    ZeroMinGrowth,
    /// `chunk_size` is zero or not a power of two.
    ChunkSizeNotPowerOfTwo {
        /// The configured chunk size.
        chunk_size: u32,
    },
    /// `initial_capacity` is larger than `max_slots`.
    InitialCapacityOverLimit {
        /// The configured initial capacity.
        initial_capacity: u32,
        /// The configured slot limit.
        max_slots: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroGrowthFactor => write!(f, "growth_factor must be at least 1"),
            Self::ZeroMinGrowth => write!(f, "min_growth must be at least 1"),
            Self::ChunkSizeNotPowerOfTwo { chunk_size } => {
                write!(f, "chunk_size {chunk_size} is not a power of two")
            }
            Self::InitialCapacityOverLimit {
                initial_capacity,
                max_slots,
            } => {
                write!(
                    f,
                    "initial_capacity {initial_capacity} exceeds max_slots {max_slots}"
                )
            }
        }
    }
}

impl Error for ConfigError {}
