//! chained-hashmap: a string-keyed hash map built from scratch on
//! separate chaining, with pluggable hash functions and explicit rehashing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: show manual hashing, bucket management and resizing without
//!   leaning on a built-in map type for storage.
//! - Layers:
//!   - ChainList<V>: singly-linked collision chain. Push-front insert,
//!     key-based remove and lookup. Nodes live in a per-chain `SlotMap`
//!     and link by generational key.
//!   - HashTable<V, H>: `capacity` chains indexed by
//!     `hasher.hash(key) % capacity`. Owns size accounting, resizing and
//!     load statistics; delegates every entry mutation to one chain.
//!
//! Invariants
//! - `len() == Σ bucket_len(i)` after every public operation.
//! - Each key is present in at most one chain, the one at its bucket index.
//! - `1 <= capacity() <= MAX_CAPACITY`, enforced at construction, by
//!   `resize_table` and by policy-driven growth.
//!
//! Hashing
//! - `KeyHasher` is the capability seam. `SumHash` and `WeightedHash` are
//!   provided; any `Fn(&str) -> u64` also works, which lets tests force
//!   collisions with a constant function.
//!
//! Resizing
//! - `resize_table(n)` rebuilds the bucket array and reinserts every entry
//!   through the insert path. Old buckets are visited in index order and
//!   each chain head to tail.
//! - Automatic growth is off by default (`ResizePolicy::Never`).
//!   `ResizePolicy::Grow { threshold, factor }` multiplies capacity after a
//!   fresh insert brings the load to `threshold`.
//!
//! Notes and non-goals
//! - Single-threaded; wrap in a lock externally if shared.
//! - Keys are `String`; no generic key negotiation.
//! - No public iteration over the table. `Display` renders each bucket
//!   on its own line for diagnostics.

pub mod chain_list;
pub mod config;
pub mod error;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;

// Public surface
pub use chain_list::{ChainList, Entry};
pub use config::{ResizePolicy, TableConfig, DEFAULT_CAPACITY, MAX_CAPACITY};
pub use error::{Result, TableError};
pub use hash::{KeyHasher, SumHash, WeightedHash};
pub use hash_table::HashTable;
