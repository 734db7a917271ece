//! Nelson rule identities and violation records
//!
//! The eight canonical pattern-detection rules for identifying non-random
//! behavior in a control chart. Detection lives in the engine crate; this
//! module defines the stable identity (id, name, severity) each rule
//! carries into violation records.

use serde::{Deserialize, Serialize};

/// Violation severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational only
    Info,
    /// Out-of-control pattern; investigate
    Warning,
    /// Point beyond control limits; immediate attention
    Critical,
}

/// The eight Nelson rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Rule 1: point beyond the control limits
    Outlier,
    /// Rule 2: 9 consecutive points on the same side of the center line
    Shift,
    /// Rule 3: 6 consecutive points steadily increasing or decreasing
    Trend,
    /// Rule 4: 14 consecutive points alternating up and down
    Alternator,
    /// Rule 5: 2 of 3 consecutive points in zone A or beyond, same side
    ZoneA,
    /// Rule 6: 4 of 5 consecutive points in zone B or beyond, same side
    ZoneB,
    /// Rule 7: 15 consecutive points within 1 sigma of the center line
    Stratification,
    /// Rule 8: 8 consecutive points beyond 1 sigma on either side
    Mixture,
}

impl RuleKind {
    /// All eight rules in rule-id order
    pub const ALL: [RuleKind; 8] = [
        RuleKind::Outlier,
        RuleKind::Shift,
        RuleKind::Trend,
        RuleKind::Alternator,
        RuleKind::ZoneA,
        RuleKind::ZoneB,
        RuleKind::Stratification,
        RuleKind::Mixture,
    ];

    /// Canonical rule number, 1 through 8
    pub fn rule_id(&self) -> u8 {
        match self {
            RuleKind::Outlier => 1,
            RuleKind::Shift => 2,
            RuleKind::Trend => 3,
            RuleKind::Alternator => 4,
            RuleKind::ZoneA => 5,
            RuleKind::ZoneB => 6,
            RuleKind::Stratification => 7,
            RuleKind::Mixture => 8,
        }
    }

    /// Human-readable name, used verbatim in violation records
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Outlier => "Outlier",
            RuleKind::Shift => "Shift",
            RuleKind::Trend => "Trend",
            RuleKind::Alternator => "Alternator",
            RuleKind::ZoneA => "Zone A",
            RuleKind::ZoneB => "Zone B",
            RuleKind::Stratification => "Stratification",
            RuleKind::Mixture => "Mixture",
        }
    }

    /// Fixed severity for violations of this rule
    pub fn severity(&self) -> Severity {
        match self {
            RuleKind::Outlier => Severity::Critical,
            _ => Severity::Warning,
        }
    }

    /// Minimum number of samples the rule needs before it can trigger
    pub fn required_samples(&self) -> usize {
        match self {
            RuleKind::Outlier => 1,
            RuleKind::Shift => 9,
            RuleKind::Trend => 6,
            RuleKind::Alternator => 14,
            RuleKind::ZoneA => 3,
            RuleKind::ZoneB => 5,
            RuleKind::Stratification => 15,
            RuleKind::Mixture => 8,
        }
    }

    /// Look up a rule by its canonical number
    pub fn from_rule_id(id: u8) -> Option<RuleKind> {
        RuleKind::ALL.into_iter().find(|r| r.rule_id() == id)
    }
}

/// A rule violation, attributed to the sample that triggered it.
///
/// Produced by the rule library, not stored by the engine; persistence and
/// event publication belong to external layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: RuleKind,
    pub rule_id: u8,
    pub rule_name: String,
    pub severity: Severity,
    pub triggering_sample_id: u64,
    /// Whether characteristic configuration demands operator acknowledgement
    pub requires_ack: bool,
}

impl Violation {
    pub fn new(rule: RuleKind, triggering_sample_id: u64, requires_ack: bool) -> Self {
        Self {
            rule,
            rule_id: rule.rule_id(),
            rule_name: rule.name().to_string(),
            severity: rule.severity(),
            triggering_sample_id,
            requires_ack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_are_canonical() {
        for (i, rule) in RuleKind::ALL.iter().enumerate() {
            assert_eq!(rule.rule_id() as usize, i + 1);
            assert_eq!(RuleKind::from_rule_id(rule.rule_id()), Some(*rule));
        }
        assert_eq!(RuleKind::from_rule_id(0), None);
        assert_eq!(RuleKind::from_rule_id(9), None);
    }

    #[test]
    fn test_only_outlier_is_critical() {
        assert_eq!(RuleKind::Outlier.severity(), Severity::Critical);
        for rule in RuleKind::ALL.iter().skip(1) {
            assert_eq!(rule.severity(), Severity::Warning);
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn test_violation_carries_rule_identity() {
        let v = Violation::new(RuleKind::ZoneA, 42, false);
        assert_eq!(v.rule_id, 5);
        assert_eq!(v.rule_name, "Zone A");
        assert_eq!(v.severity, Severity::Warning);
        assert_eq!(v.triggering_sample_id, 42);
    }
}
