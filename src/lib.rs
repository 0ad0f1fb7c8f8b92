//! # AiDb Bloom - Filter policies for LSM-Tree storage engines
//!
//! This crate builds and probes the per-block filters an LSM-Tree engine
//! stores next to its SSTable data blocks. A filter lets a read skip a block
//! that definitely does not hold a key, without touching disk.
//!
//! ## Components
//!
//! - **Hash**: the seeded 32-bit hash that places keys in filters
//! - **Filter policy**: the named build/probe strategy ([`FilterPolicy`])
//! - **Bloom filter**: the LevelDB-compatible policy ([`BloomFilterPolicy`])
//! - **Options**: configuration selecting the policy ([`FilterOptions`])
//!
//! ## Example Usage
//!
//! ```rust
//! use aidb_bloom::{FilterOptions, PolicyMatcher};
//!
//! # fn main() -> Result<(), aidb_bloom::Error> {
//! let options = FilterOptions::default();
//! let policy = options.new_policy().expect("bloom filters enabled");
//!
//! // Table construction: one filter per data block
//! let keys: [&[u8]; 3] = [b"alpha", b"beta", b"gamma"];
//! let mut filter = Vec::new();
//! policy.create_filter(&keys, &mut filter);
//! let recorded_name = policy.name();
//!
//! // Read path: only probe with the policy that built the filter
//! let matcher = PolicyMatcher::bind(policy, recorded_name)?;
//! assert!(matcher.key_may_match(b"alpha", &filter));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod config;
pub mod error;
pub mod filter;
pub mod hash;

// Re-exports
pub use config::{FilterKind, FilterOptions};
pub use error::{Error, Result};
pub use filter::{
    new_bloom_filter_policy, verify_policy_name, BloomFilterPolicy, FilterPolicy, FilterView,
    PolicyMatcher,
};
