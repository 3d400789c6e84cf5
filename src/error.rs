//! Error type for table construction and resizing.

use thiserror::Error;

/// Errors reported by fallible `HashTable` and `TableConfig` operations.
///
/// Lookups never fail; absence is reported through `Option`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// A table must always own at least one bucket.
    #[error("capacity must be at least 1 bucket")]
    ZeroCapacity,

    /// A requested bucket count is above `MAX_CAPACITY`.
    #[error("capacity {requested} exceeds the maximum of {max} buckets")]
    CapacityTooLarge {
        /// Bucket count that was asked for
        requested: usize,
        /// Largest accepted bucket count
        max: usize,
    },

    /// The automatic resize policy cannot be applied as configured.
    #[error("invalid resize policy: {reason}")]
    InvalidPolicy {
        /// What is wrong with the policy
        reason: String,
    },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, TableError>;
