//! Table configuration: initial bucket count and the automatic resize policy.

use crate::error::{Result, TableError};
use crate::hash::KeyHasher;
use crate::hash_table::HashTable;

/// Bucket count used by `TableConfig::default()`.
pub const DEFAULT_CAPACITY: usize = 11;

/// Largest bucket count a table may have. Construction, `resize_table` and
/// policy-driven growth never exceed it.
pub const MAX_CAPACITY: usize = 1 << 24;

/// Accept `capacity` if it is within `1..=MAX_CAPACITY`.
pub(crate) fn check_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(TableError::ZeroCapacity);
    }
    if capacity > MAX_CAPACITY {
        return Err(TableError::CapacityTooLarge {
            requested: capacity,
            max: MAX_CAPACITY,
        });
    }
    Ok(())
}

/// When, if ever, `put` grows the table on its own.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum ResizePolicy {
    /// Capacity only changes through `resize_table`.
    #[default]
    Never,
    /// After an insert, once `table_load() >= threshold`, multiply the
    /// capacity by `factor` and rehash.
    Grow { threshold: f64, factor: usize },
}

impl ResizePolicy {
    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            ResizePolicy::Never => Ok(()),
            ResizePolicy::Grow { threshold, factor } => {
                if !threshold.is_finite() || threshold <= 0.0 {
                    return Err(TableError::InvalidPolicy {
                        reason: format!("threshold must be positive and finite, got {threshold}"),
                    });
                }
                if factor < 2 {
                    return Err(TableError::InvalidPolicy {
                        reason: format!("growth factor must be at least 2, got {factor}"),
                    });
                }
                if factor > MAX_CAPACITY {
                    return Err(TableError::InvalidPolicy {
                        reason: format!(
                            "growth factor must be at most {MAX_CAPACITY}, got {factor}"
                        ),
                    });
                }
                Ok(())
            }
        }
    }

    /// Capacity to grow to, or `None` if the policy does not fire at `load`
    /// or the table is already at `MAX_CAPACITY`. Growth is clamped to
    /// `MAX_CAPACITY`.
    pub(crate) fn next_capacity(&self, load: f64, capacity: usize) -> Option<usize> {
        match *self {
            ResizePolicy::Grow { threshold, factor }
                if load >= threshold && capacity < MAX_CAPACITY =>
            {
                let grown = capacity
                    .checked_mul(factor)
                    .map_or(MAX_CAPACITY, |c| c.min(MAX_CAPACITY));
                Some(grown)
            }
            ResizePolicy::Never | ResizePolicy::Grow { .. } => None,
        }
    }
}

/// Builder for `HashTable`. Call `.with_capacity(..)` and
/// `.with_policy(..)` as needed, then `.build(hasher)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TableConfig {
    capacity: usize,
    policy: ResizePolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: ResizePolicy::Never,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buckets the table starts with. Zero is rejected by `build`.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    /// Validate the configuration and create an empty table.
    pub fn build<V, H: KeyHasher>(self, hasher: H) -> Result<HashTable<V, H>> {
        check_capacity(self.capacity)?;
        self.policy.validate()?;
        Ok(HashTable::from_parts(self.capacity, hasher, self.policy))
    }
}
