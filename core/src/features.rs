//! Caller-supplied feature flags.
//!
//! Some catalog entries are only accepted while a named flag is active. The
//! flag state is always passed in explicitly; absent flags are inactive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flag gating the `alert-rule-action` element type.
pub const ALERT_RULE_UI_COMPONENT: &str = "organizations:alert-rule-ui-component";

/// Mapping from feature-flag name to its active state.
///
/// # Examples
///
/// ```
/// use ui_schema_core::{ALERT_RULE_UI_COMPONENT, FeatureSet};
///
/// let features = FeatureSet::new().with(ALERT_RULE_UI_COMPONENT, true);
/// assert!(features.is_active(ALERT_RULE_UI_COMPONENT));
/// assert!(!features.is_active("organizations:unknown"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet {
    flags: BTreeMap<String, bool>,
}

impl FeatureSet {
    /// Creates an empty feature set (every flag inactive).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, active: bool) -> Self {
        self.set(name, active);
        self
    }

    /// Records the state of a flag, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, active: bool) {
        self.flags.insert(name.into(), active);
    }

    /// Returns `true` only if `name` is present and set to `true`.
    pub fn is_active(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Iterates the names of active flags in sorted order.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, active)| **active)
            .map(|(name, _)| name.as_str())
    }

    /// Applies every entry of `overrides` on top of this set.
    pub fn merge(&mut self, overrides: &FeatureSet) {
        for (name, active) in &overrides.flags {
            self.flags.insert(name.clone(), *active);
        }
    }

    /// Number of flags with an explicit state.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            flags: iter
                .into_iter()
                .map(|(name, active)| (name.into(), active))
                .collect(),
        }
    }
}
