//! Samples and subgroups
//!
//! A `Subgroup` is the inbound contract from the ingestion layer: one or
//! more measurements collected together and summarized as one chart point.
//! A `WindowSample` is the classified form retained by the rolling window.

use crate::zone::Zone;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed subgroup as delivered by the ingestion/buffering layer.
///
/// The buffering layer decides *when* a subgroup is complete; the engine
/// only decides how it is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgroup {
    /// Characteristic this subgroup belongs to
    pub characteristic_id: Uuid,
    /// Mean of the measurements in the subgroup
    pub mean: f64,
    /// Within-subgroup range (or standard deviation, per chart type)
    pub range_or_stddev: Option<f64>,
    /// Number of measurements actually collected
    pub actual_n: usize,
    /// When the subgroup was completed
    pub timestamp: DateTime<Utc>,
}

/// A classified sample retained by the rolling window.
///
/// `sample_id` is unique and monotonically increasing per characteristic in
/// insertion order; the window relies on insertion order, not timestamp
/// order, for rule evaluation. `value` and identity fields are immutable;
/// the classification fields (`zone`, `is_above_center`, `sigma_distance`)
/// are recomputed when the window's boundaries change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSample {
    pub sample_id: u64,
    pub timestamp: DateTime<Utc>,
    /// The classified value (subgroup mean, or z-score in standardized mode)
    pub value: f64,
    /// Within-subgroup range/stddev carried for variation-chart use
    pub range_value: Option<f64>,
    /// Actual size of the subgroup this sample came from
    pub subgroup_size: usize,
    pub zone: Zone,
    pub is_above_center: bool,
    /// Signed distance from the center line in sigma units
    pub sigma_distance: f64,
}
