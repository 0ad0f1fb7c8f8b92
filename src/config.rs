//! Configuration options for filter policies.
//!
//! Options can be built in code or loaded from JSON:
//!
//! ```json
//! { "policy": "bloom", "bits_per_key": 10 }
//! ```

use crate::filter::{new_bloom_filter_policy, FilterPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Filter algorithms that can be selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Do not build filters.
    None,

    /// LevelDB-compatible Bloom filter.
    #[default]
    Bloom,
}

/// Configuration options for building and probing filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    /// Filter algorithm.
    /// Default: FilterKind::Bloom
    pub policy: FilterKind,

    /// Bits allocated per key in each filter.
    /// Default: 10 (about 1% false positives)
    pub bits_per_key: i32,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            policy: FilterKind::Bloom,
            bits_per_key: crate::filter::bloom::DEFAULT_BITS_PER_KEY,
        }
    }
}

impl FilterOptions {
    /// Creates a new FilterOptions with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter algorithm.
    pub fn policy(mut self, policy: FilterKind) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the bits allocated per key.
    pub fn bits_per_key(mut self, bits_per_key: i32) -> Self {
        self.bits_per_key = bits_per_key;
        self
    }

    /// Parses and validates options from a JSON document.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads and validates options from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading filter options from {:?}", path);

        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the options to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the options and returns an error if any are invalid.
    ///
    /// The Bloom policy itself accepts any `bits_per_key`, but a configured
    /// filter that spends no bits on its keys is almost certainly a mistake.
    pub fn validate(&self) -> crate::Result<()> {
        if self.policy == FilterKind::Bloom && self.bits_per_key <= 0 {
            return Err(crate::Error::invalid_argument("bits_per_key must be > 0"));
        }
        if self.policy == FilterKind::Bloom && self.bits_per_key > 44 {
            log::warn!(
                "bits_per_key {} saturates the bloom probe count at 30",
                self.bits_per_key
            );
        }
        Ok(())
    }

    /// Creates the configured policy, or `None` if filters are disabled.
    pub fn new_policy(&self) -> Option<Arc<dyn FilterPolicy>> {
        match self.policy {
            FilterKind::None => None,
            FilterKind::Bloom => Some(new_bloom_filter_policy(self.bits_per_key)),
        }
    }
}
