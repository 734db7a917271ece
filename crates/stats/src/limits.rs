//! Control-limit builders
//!
//! Combine a center line and a sigma estimate into `ControlLimits` pairs
//! (value chart + variation chart) and derive zone boundaries from them.

use crate::constants::{a2, d2, d3, d4};
use crate::estimators::mean;
use caliper_core::{ControlLimits, Result, SpcError, ZoneBoundaries};

/// Limits for an X-bar/R chart pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XbarRLimits {
    /// Limits for the subgroup means chart
    pub xbar: ControlLimits,
    /// Limits for the subgroup ranges chart
    pub range: ControlLimits,
}

/// Limits for an Individuals/Moving-Range chart pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImrLimits {
    /// Limits for the individuals chart
    pub individuals: ControlLimits,
    /// Limits for the moving-range chart
    pub moving_range: ControlLimits,
}

/// Compute X-bar and R chart limits from historical subgroup statistics.
///
/// X-bar chart: center = mean of means, UCL/LCL = center +/- A2(n) * R-bar.
/// R chart: UCL = D4(n) * R-bar, LCL = D3(n) * R-bar (0 where D3 is
/// undefined for small n).
pub fn calculate_xbar_r_limits(means: &[f64], ranges: &[f64], n: usize) -> Result<XbarRLimits> {
    if means.is_empty() || ranges.is_empty() {
        return Err(SpcError::InsufficientData {
            needed: 1,
            got: means.len().min(ranges.len()),
        });
    }
    let a2 = a2(n)?;
    let d3 = d3(n)?;
    let d4 = d4(n)?;

    let center = mean(means);
    let r_bar = mean(ranges);

    Ok(XbarRLimits {
        xbar: ControlLimits::new(center, center + a2 * r_bar, center - a2 * r_bar),
        range: ControlLimits::new(r_bar, d4 * r_bar, (d3 * r_bar).max(0.0)),
    })
}

/// Compute Individuals and Moving-Range chart limits.
///
/// Each individual is its own subgroup of size 1; sigma comes from the
/// moving range and the MR chart uses n = 2 constants.
pub fn calculate_imr_limits(values: &[f64]) -> Result<ImrLimits> {
    if values.len() < 2 {
        return Err(SpcError::InsufficientData {
            needed: 2,
            got: values.len(),
        });
    }
    let moving_ranges: Vec<f64> = values.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let mr_bar = mean(&moving_ranges);
    let sigma = mr_bar / d2(2)?;

    let center = mean(values);

    Ok(ImrLimits {
        individuals: ControlLimits::new(center, center + 3.0 * sigma, center - 3.0 * sigma),
        moving_range: ControlLimits::new(mr_bar, d4(2)? * mr_bar, 0.0),
    })
}

/// Generic +/- 3 sigma limit pair, used by modes that already hold a
/// stored sigma.
pub fn calculate_control_limits_from_sigma(center_line: f64, sigma: f64) -> Result<ControlLimits> {
    if sigma <= 0.0 {
        return Err(SpcError::NonPositiveSigma { sigma });
    }
    Ok(ControlLimits {
        center_line,
        ucl: center_line + 3.0 * sigma,
        lcl: center_line - 3.0 * sigma,
        sigma,
    })
}

/// Build zone boundaries at 1, 2 and 3 sigma around the center line.
pub fn calculate_zones(center_line: f64, sigma: f64) -> Result<ZoneBoundaries> {
    if sigma <= 0.0 {
        return Err(SpcError::NonPositiveSigma { sigma });
    }
    Ok(ZoneBoundaries {
        center_line,
        sigma,
        plus_1_sigma: center_line + sigma,
        plus_2_sigma: center_line + 2.0 * sigma,
        plus_3_sigma: center_line + 3.0 * sigma,
        minus_1_sigma: center_line - sigma,
        minus_2_sigma: center_line - 2.0 * sigma,
        minus_3_sigma: center_line - 3.0 * sigma,
    })
}
