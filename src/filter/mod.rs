//! Filter policies for efficient key existence checking.
//!
//! A filter policy turns the keys of a data block into a small encoded
//! filter, and later answers whether a key may be in that block by looking
//! only at the filter bytes. The owning engine stores the policy name next to
//! every filter block and must not probe a filter with a differently named
//! policy; [`verify_policy_name`] and [`PolicyMatcher`] enforce that.

pub mod bloom;

pub use bloom::{new_bloom_filter_policy, BloomFilterPolicy, FilterView};

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// A named algorithm for probabilistically encoding a set of keys.
pub trait FilterPolicy: fmt::Debug + Send + Sync {
    /// Name of the encoding. Must change whenever the encoding changes in an
    /// incompatible way.
    fn name(&self) -> &'static str;

    /// Appends a filter summarizing `keys` to `dst`.
    ///
    /// Keys may repeat and come in any order. Existing content of `dst` is
    /// left untouched.
    fn create_filter(&self, keys: &[&[u8]], dst: &mut Vec<u8>);

    /// Returns `false` if `key` was definitely not in the key set used to
    /// build `filter`, `true` if it may have been.
    fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool;
}

/// Checks that `policy` is the policy recorded for a filter block.
pub fn verify_policy_name(policy: &dyn FilterPolicy, recorded: &str) -> Result<()> {
    if policy.name() != recorded {
        log::warn!(
            "Refusing filter policy {:?} for filter recorded as {:?}",
            policy.name(),
            recorded
        );
        return Err(Error::policy_mismatch(recorded, policy.name()));
    }
    Ok(())
}

/// A policy that has been checked against the name recorded for a filter
/// block, so it can safely probe that block's filters.
#[derive(Debug, Clone)]
pub struct PolicyMatcher {
    policy: Arc<dyn FilterPolicy>,
}

impl PolicyMatcher {
    /// Binds `policy` to filters recorded under `recorded`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PolicyMismatch`] if the names differ.
    pub fn bind(policy: Arc<dyn FilterPolicy>, recorded: &str) -> Result<Self> {
        verify_policy_name(policy.as_ref(), recorded)?;
        Ok(Self { policy })
    }

    /// Returns whether `key` may be present according to `filter`.
    pub fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool {
        self.policy.key_may_match(key, filter)
    }

    /// Returns the bound policy.
    pub fn policy(&self) -> &Arc<dyn FilterPolicy> {
        &self.policy
    }
}
