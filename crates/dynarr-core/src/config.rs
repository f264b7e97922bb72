//! Array configuration parameters.

use std::error::Error;
use std::fmt;

/// Configuration for a dynamic array.
///
/// Controls the capacity allocated at construction and the floor below
/// which the shrink step of `pop` never goes. Validated at construction;
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Element slots allocated (and zeroed) at construction.
    ///
    /// Default: 2. Must be at least 1.
    pub initial_capacity: usize,

    /// Smallest capacity the shrink step will reallocate down to.
    ///
    /// Default: 2 (the initial capacity). Must be at least 1 and no larger
    /// than `initial_capacity`.
    pub min_capacity: usize,
}

impl ArrayConfig {
    /// Default initial capacity, in elements.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 2;

    /// Default shrink floor, in elements.
    pub const DEFAULT_MIN_CAPACITY: usize = 2;

    /// Create a config with the given initial capacity.
    ///
    /// The shrink floor is clamped to `initial_capacity` so that small
    /// initial capacities remain valid.
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            min_capacity: Self::DEFAULT_MIN_CAPACITY.min(initial_capacity),
        }
    }

    /// Check the structural invariants of this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroInitialCapacity);
        }
        if self.min_capacity == 0 {
            return Err(ConfigError::ZeroMinCapacity);
        }
        if self.min_capacity > self.initial_capacity {
            return Err(ConfigError::MinExceedsInitial {
                min: self.min_capacity,
                initial: self.initial_capacity,
            });
        }
        Ok(())
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            min_capacity: Self::DEFAULT_MIN_CAPACITY,
        }
    }
}

/// Errors detected during [`ArrayConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `initial_capacity` is zero.
    ZeroInitialCapacity,
    /// `min_capacity` is zero, which would allow a zero-size reallocation.
    ZeroMinCapacity,
    /// `min_capacity` is larger than `initial_capacity`.
    MinExceedsInitial {
        /// The configured shrink floor.
        min: usize,
        /// The configured initial capacity.
        initial: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInitialCapacity => write!(f, "initial_capacity must be at least 1"),
            Self::ZeroMinCapacity => write!(f, "min_capacity must be at least 1"),
            Self::MinExceedsInitial { min, initial } => {
                write!(
                    f,
                    "min_capacity ({min}) exceeds initial_capacity ({initial})"
                )
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_two_slots() {
        let config = ArrayConfig::default();
        assert_eq!(config.initial_capacity, 2);
        assert_eq!(config.min_capacity, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_initial_capacity_rejected() {
        let config = ArrayConfig {
            initial_capacity: 0,
            min_capacity: 0,
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInitialCapacity));
    }

    #[test]
    fn zero_min_capacity_rejected() {
        let config = ArrayConfig {
            initial_capacity: 4,
            min_capacity: 0,
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinCapacity));
    }

    #[test]
    fn min_above_initial_rejected() {
        let config = ArrayConfig {
            initial_capacity: 2,
            min_capacity: 8,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MinExceedsInitial { min: 8, initial: 2 })
        );
    }

    #[test]
    fn with_initial_capacity_clamps_floor() {
        let config = ArrayConfig::with_initial_capacity(1);
        assert_eq!(config.min_capacity, 1);
        assert!(config.validate().is_ok());

        let config = ArrayConfig::with_initial_capacity(64);
        assert_eq!(config.min_capacity, 2);
        assert!(config.validate().is_ok());
    }
}
