//! Wire message types

use caliper_core::Subgroup;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed subgroup on the wire, as produced by a data provider once
/// its trigger condition (on-change, on-timer, count-reached) has yielded
/// a full or timed-out subgroup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgroupMessage {
    pub characteristic_id: Uuid,
    pub mean: f64,
    pub range_or_stddev: Option<f64>,
    pub actual_n: usize,
    pub timestamp: DateTime<Utc>,
    /// Name of the provider that produced this subgroup; provenance only,
    /// the engine never branches on it
    pub source: String,
}

impl SubgroupMessage {
    pub fn new(
        characteristic_id: Uuid,
        mean: f64,
        range_or_stddev: Option<f64>,
        actual_n: usize,
        source: impl Into<String>,
    ) -> Self {
        Self {
            characteristic_id,
            mean,
            range_or_stddev,
            actual_n,
            timestamp: Utc::now(),
            source: source.into(),
        }
    }

    /// Strip wire-only fields down to the engine's inbound contract.
    pub fn into_subgroup(self) -> Subgroup {
        Subgroup {
            characteristic_id: self.characteristic_id,
            mean: self.mean,
            range_or_stddev: self.range_or_stddev,
            actual_n: self.actual_n,
            timestamp: self.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_subgroup_preserves_fields() {
        let id = Uuid::new_v4();
        let msg = SubgroupMessage::new(id, 10.5, Some(1.2), 5, "manual");
        let ts = msg.timestamp;
        let subgroup = msg.into_subgroup();

        assert_eq!(subgroup.characteristic_id, id);
        assert_eq!(subgroup.mean, 10.5);
        assert_eq!(subgroup.range_or_stddev, Some(1.2));
        assert_eq!(subgroup.actual_n, 5);
        assert_eq!(subgroup.timestamp, ts);
    }
}
