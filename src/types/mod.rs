//! Common types used throughout the tree.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};

/// Key type stored in the tree
pub type Key = i32;

/// Smallest minimum degree a B-tree can be built with
pub const MIN_DEGREE: usize = 2;

/// Largest minimum degree whose `2t - 1` key limit fits in a `usize`
pub const MAX_DEGREE: usize = usize::MAX / 2;

/// Default minimum degree (nodes hold 2..=5 keys)
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// What `insert` does with a key that is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Store another copy of the key
    #[default]
    Allow,
    /// Leave the tree untouched
    Ignore,
}

/// How `delete` treats nodes that drop below `t - 1` keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnderflowPolicy {
    /// Remove keys from leaves without rebalancing and descend into children
    /// without topping them up first. Non-root nodes may end up below `t - 1` keys.
    #[default]
    Tolerate,
    /// Borrow from a sibling or merge before descending into a child that holds
    /// only `t - 1` keys, so every non-root node keeps at least `t - 1` keys.
    Repair,
}

/// BTree configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BTreeConfig {
    /// Minimum degree `t`; non-root nodes hold between `t - 1` and `2t - 1` keys
    pub min_degree: usize,
    /// Behavior when inserting a key that is already present
    pub duplicates: DuplicatePolicy,
    /// Behavior when a deletion leaves a node underfull
    pub underflow: UnderflowPolicy,
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
            duplicates: DuplicatePolicy::default(),
            underflow: UnderflowPolicy::default(),
        }
    }
}

impl BTreeConfig {
    /// Create a new config with the given minimum degree and default policies
    pub fn new(min_degree: usize) -> Self {
        Self {
            min_degree,
            ..Self::default()
        }
    }

    /// Set the duplicate-key policy
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Set the underflow policy
    pub fn underflow(mut self, policy: UnderflowPolicy) -> Self {
        self.underflow = policy;
        self
    }

    /// Check that the configuration describes a valid B-tree
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&self.min_degree) {
            return Err(TreeError::InvalidDegree {
                degree: self.min_degree,
                min: MIN_DEGREE,
                max: MAX_DEGREE,
            });
        }
        Ok(())
    }

    /// Maximum number of keys a node may hold (`2t - 1`)
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Minimum number of keys a non-root node should hold (`t - 1`)
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BTreeConfig::default();
        assert_eq!(config.min_degree, 3);
        assert_eq!(config.duplicates, DuplicatePolicy::Allow);
        assert_eq!(config.underflow, UnderflowPolicy::Tolerate);
        assert_eq!(config.max_keys(), 5);
        assert_eq!(config.min_keys(), 2);
    }

    #[test]
    fn test_config_rejects_small_degree() {
        assert!(BTreeConfig::new(2).validate().is_ok());
        assert!(matches!(
            BTreeConfig::new(1).validate(),
            Err(TreeError::InvalidDegree { degree: 1, min: 2, .. })
        ));
        assert!(BTreeConfig::new(0).validate().is_err());
    }

    #[test]
    fn test_config_rejects_degree_too_large_for_key_limit() {
        assert!(BTreeConfig::new(MAX_DEGREE).validate().is_ok());
        assert_eq!(BTreeConfig::new(MAX_DEGREE).max_keys(), usize::MAX - 2);
        assert!(matches!(
            BTreeConfig::new(MAX_DEGREE + 1).validate(),
            Err(TreeError::InvalidDegree { max: MAX_DEGREE, .. })
        ));
        assert!(BTreeConfig::new(usize::MAX).validate().is_err());
    }

    #[test]
    fn test_config_json() {
        let config: BTreeConfig =
            serde_json::from_str(r#"{"minDegree": 4, "underflow": "repair"}"#).unwrap();
        assert_eq!(config.min_degree, 4);
        assert_eq!(config.duplicates, DuplicatePolicy::Allow);
        assert_eq!(config.underflow, UnderflowPolicy::Repair);

        let json = serde_json::to_string(&config.clone().duplicates(DuplicatePolicy::Ignore)).unwrap();
        assert!(json.contains(r#""duplicates":"ignore""#));
    }
}
