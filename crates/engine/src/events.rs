//! Engine domain events
//!
//! Typed events the caller publishes after each engine operation. The
//! engine itself never publishes; persistence and the event bus are
//! external collaborators.

use crate::monitor::SubgroupOutcome;
use caliper_core::{Violation, WindowSample};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain events yielded by the monitoring flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MonitorEvent {
    SampleProcessed {
        characteristic_id: Uuid,
        sample: WindowSample,
        is_undersized: bool,
        size_warning: bool,
    },
    ViolationDetected {
        characteristic_id: Uuid,
        violation: Violation,
    },
    LimitsRecalculated {
        characteristic_id: Uuid,
        center_line: f64,
        sigma: f64,
    },
    WindowCleared {
        characteristic_id: Uuid,
    },
}

impl MonitorEvent {
    /// Expand one subgroup outcome into its event sequence: one
    /// `SampleProcessed` followed by a `ViolationDetected` per fired rule.
    pub fn from_outcome(characteristic_id: Uuid, outcome: &SubgroupOutcome) -> Vec<MonitorEvent> {
        let mut events = vec![MonitorEvent::SampleProcessed {
            characteristic_id,
            sample: outcome.sample.clone(),
            is_undersized: outcome.is_undersized,
            size_warning: outcome.size_warning,
        }];
        events.extend(outcome.violations.iter().map(|violation| {
            MonitorEvent::ViolationDetected {
                characteristic_id,
                violation: violation.clone(),
            }
        }));
        events
    }

    pub fn characteristic_id(&self) -> Uuid {
        match self {
            MonitorEvent::SampleProcessed {
                characteristic_id, ..
            }
            | MonitorEvent::ViolationDetected {
                characteristic_id, ..
            }
            | MonitorEvent::LimitsRecalculated {
                characteristic_id, ..
            }
            | MonitorEvent::WindowCleared { characteristic_id } => *characteristic_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caliper_core::{RuleKind, Zone};
    use chrono::Utc;

    fn outcome_with_violation() -> SubgroupOutcome {
        let sample = WindowSample {
            sample_id: 7,
            timestamp: Utc::now(),
            value: 107.0,
            range_value: None,
            subgroup_size: 5,
            zone: Zone::BeyondUcl,
            is_above_center: true,
            sigma_distance: 3.5,
        };
        SubgroupOutcome {
            sample: sample.clone(),
            evicted: None,
            violations: vec![Violation::new(RuleKind::Outlier, 7, true)],
            is_undersized: false,
            size_warning: false,
        }
    }

    #[test]
    fn test_outcome_expands_to_event_sequence() {
        let id = Uuid::new_v4();
        let events = MonitorEvent::from_outcome(id, &outcome_with_violation());

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], MonitorEvent::SampleProcessed { .. }));
        assert!(matches!(
            &events[1],
            MonitorEvent::ViolationDetected { violation, .. } if violation.rule_id == 1
        ));
        assert!(events.iter().all(|e| e.characteristic_id() == id));
    }

    #[test]
    fn test_event_serializes_with_discriminator() {
        let id = Uuid::new_v4();
        let json = serde_json::to_string(&MonitorEvent::WindowCleared {
            characteristic_id: id,
        })
        .unwrap();
        assert!(json.contains("\"event\":\"window_cleared\""));
    }
}
