//! Characteristic configuration
//!
//! Configuration is owned by external layers (persistence, API) and
//! consumed read-only by the engine; the engine only ever sees resolved
//! mode and baseline values, never the raw stored form.

use crate::violation::RuleKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// How a new subgroup is evaluated when its actual size deviates from the
/// nominal configured subgroup size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubgroupMode {
    /// Ignore the deviation and classify against the limits computed from
    /// the nominal size. Undersized subgroups are flagged, not rejected.
    /// This is the backward-compatible default.
    NominalTolerance,
    /// Classify the z-score `(mean - CL) / (sigma / sqrt(n))` against fixed
    /// unit boundaries regardless of `n`. Requires a stored baseline.
    Standardized,
    /// Classify the raw mean against per-sample limits
    /// `CL ± 3 * sigma / sqrt(n)`. Requires a stored baseline.
    VariableLimits,
}

impl Default for SubgroupMode {
    fn default() -> Self {
        SubgroupMode::NominalTolerance
    }
}

/// Which rules run for a characteristic and which of their violations
/// demand operator acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulePolicy {
    /// Rules evaluated for this characteristic
    pub enabled: HashSet<RuleKind>,
    /// Rules whose violations must be acknowledged before they clear
    pub ack_required: HashSet<RuleKind>,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            enabled: RuleKind::ALL.into_iter().collect(),
            ack_required: HashSet::from([RuleKind::Outlier]),
        }
    }
}

impl RulePolicy {
    /// A policy with only the given rules enabled
    pub fn only(rules: &[RuleKind]) -> Self {
        Self {
            enabled: rules.iter().copied().collect(),
            ack_required: HashSet::new(),
        }
    }

    pub fn is_enabled(&self, rule: RuleKind) -> bool {
        self.enabled.contains(&rule)
    }

    pub fn requires_ack(&self, rule: RuleKind) -> bool {
        self.ack_required.contains(&rule)
    }
}

/// Per-characteristic configuration consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicConfig {
    pub id: Uuid,
    pub name: String,
    /// Subgroup-size policy
    pub mode: SubgroupMode,
    /// Configured subgroup size the control limits were computed for
    pub nominal_subgroup_size: usize,
    /// Subgroups smaller than this are flagged undersized
    pub min_measurements: usize,
    /// Optional threshold below which a warning signal is surfaced without
    /// altering classification
    pub warn_below_count: Option<usize>,
    /// Baseline center line from the last limit calculation
    pub stored_center_line: Option<f64>,
    /// Baseline sigma from the last limit calculation
    pub stored_sigma: Option<f64>,
    /// Capacity of the rolling window
    pub window_size: usize,
    pub rules: RulePolicy,
}

impl CharacteristicConfig {
    /// Create a configuration with engine defaults and a fresh id
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            mode: SubgroupMode::default(),
            nominal_subgroup_size: 5,
            min_measurements: 2,
            warn_below_count: None,
            stored_center_line: None,
            stored_sigma: None,
            window_size: 50,
            rules: RulePolicy::default(),
        }
    }

    /// True if a usable baseline (center line + strictly positive sigma)
    /// has been stored
    pub fn has_baseline(&self) -> bool {
        self.stored_center_line.is_some() && self.stored_sigma.is_some_and(|s| s > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_enables_all_rules() {
        let policy = RulePolicy::default();
        for rule in RuleKind::ALL {
            assert!(policy.is_enabled(rule));
        }
        assert!(policy.requires_ack(RuleKind::Outlier));
        assert!(!policy.requires_ack(RuleKind::Shift));
    }

    #[test]
    fn test_has_baseline_demands_positive_sigma() {
        let mut config = CharacteristicConfig::new("diameter");
        assert!(!config.has_baseline());

        config.stored_center_line = Some(10.0);
        config.stored_sigma = Some(0.0);
        assert!(!config.has_baseline());

        config.stored_sigma = Some(0.25);
        assert!(config.has_baseline());
    }

    #[test]
    fn test_mode_serde_uses_snake_case_discriminator() {
        let json = serde_json::to_string(&SubgroupMode::VariableLimits).unwrap();
        assert_eq!(json, "\"variable_limits\"");
    }
}
