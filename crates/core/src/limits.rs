//! Control limits and zone boundaries
//!
//! `ControlLimits` are immutable once computed: a recalculation produces a
//! new value that supersedes the old one, it never mutates in place.

use serde::{Deserialize, Serialize};

/// Control limits for one chart (value chart or variation chart).
///
/// # Invariants
///
/// - `lcl <= center_line <= ucl`
/// - `sigma` is the plotted statistic's sigma, `(ucl - center_line) / 3`,
///   so zones derived from it always align with the limit pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Center line (process mean or target)
    pub center_line: f64,
    /// Upper control limit
    pub ucl: f64,
    /// Lower control limit (may be clamped to a domain floor, e.g. 0 for
    /// range-type charts)
    pub lcl: f64,
    /// Sigma of the plotted statistic
    pub sigma: f64,
}

impl ControlLimits {
    /// Build a limit pair from explicit bounds. Sigma is derived from the
    /// upper limit so that `ucl == center_line + 3 * sigma` holds even when
    /// the lower limit was clamped.
    pub fn new(center_line: f64, ucl: f64, lcl: f64) -> Self {
        Self {
            center_line,
            ucl,
            lcl,
            sigma: (ucl - center_line) / 3.0,
        }
    }
}

/// Zone boundaries at 1, 2 and 3 sigma around the center line.
///
/// Always symmetric around `center_line` by construction
/// (`plus_k_sigma - center_line == center_line - minus_k_sigma`). Owned by
/// the rolling window and replaced wholesale on recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBoundaries {
    pub center_line: f64,
    pub sigma: f64,
    pub plus_1_sigma: f64,
    pub plus_2_sigma: f64,
    pub plus_3_sigma: f64,
    pub minus_1_sigma: f64,
    pub minus_2_sigma: f64,
    pub minus_3_sigma: f64,
}
