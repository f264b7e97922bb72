//! Growth and shrink policy.
//!
//! [`CapacityPolicy`] is pure arithmetic over element counts. It never
//! touches memory, so the doubling and quarter-occupancy rules can be
//! tested here independently of any element type or allocator.
//!
//! ```text
//! append: len == cap          → cap * 2   (0 → 1)
//! pop:    len <= cap / 4      → max(cap / 2, min_capacity), if smaller
//! ```

use crate::config::{ArrayConfig, ConfigError};

/// Capacity decisions for a dynamic array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityPolicy {
    initial_capacity: usize,
    min_capacity: usize,
}

impl CapacityPolicy {
    /// Build a policy from a validated config.
    pub fn new(config: &ArrayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            initial_capacity: config.initial_capacity,
            min_capacity: config.min_capacity,
        })
    }

    /// Capacity allocated at construction.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Shrink floor.
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Whether an append at this length must grow the buffer first.
    ///
    /// Growth is decided purely by `len == cap`.
    pub fn needs_growth(&self, len: usize, cap: usize) -> bool {
        len == cap
    }

    /// The capacity after one growth step, or `None` if doubling
    /// overflows `usize`.
    pub fn grown(&self, cap: usize) -> Option<usize> {
        if cap == 0 {
            Some(1)
        } else {
            cap.checked_mul(2)
        }
    }

    /// The capacity a pop at this length should shrink to, if any.
    ///
    /// `len` is the length *before* the pop. Returns `None` when occupancy
    /// is above a quarter, or when halving would not go below the floor
    /// (so no reallocation is needed and none can fail).
    pub fn shrink_target(&self, len: usize, cap: usize) -> Option<usize> {
        if len > cap / 4 {
            return None;
        }
        let target = (cap / 2).max(self.min_capacity);
        (target < cap).then_some(target)
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            initial_capacity: ArrayConfig::DEFAULT_INITIAL_CAPACITY,
            min_capacity: ArrayConfig::DEFAULT_MIN_CAPACITY,
        }
    }
}
