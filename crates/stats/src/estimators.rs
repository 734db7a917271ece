//! Sigma estimators
//!
//! Each estimator turns raw within-subgroup variation statistics into an
//! unbiased estimate of the process standard deviation, using the
//! appropriate ASTM E2587 divisor for the subgroup size.

use crate::constants::{d2, c4};
use caliper_core::{Result, SpcError};

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Estimate sigma from subgroup ranges: sigma-hat = R-bar / d2(n)
pub fn estimate_sigma_rbar(ranges: &[f64], n: usize) -> Result<f64> {
    if ranges.is_empty() {
        return Err(SpcError::InsufficientData { needed: 1, got: 0 });
    }
    Ok(mean(ranges) / d2(n)?)
}

/// Estimate sigma from subgroup standard deviations: sigma-hat = S-bar / c4(n)
pub fn estimate_sigma_sbar(std_devs: &[f64], n: usize) -> Result<f64> {
    if std_devs.is_empty() {
        return Err(SpcError::InsufficientData { needed: 1, got: 0 });
    }
    Ok(mean(std_devs) / c4(n)?)
}

/// Estimate sigma for individual measurements from the moving range.
///
/// Computes |v[i] - v[i-1]| for consecutive individuals, averages them and
/// divides by d2(2) = 1.128. Requires at least two values.
pub fn estimate_sigma_moving_range(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(SpcError::InsufficientData {
            needed: 2,
            got: values.len(),
        });
    }
    let moving_ranges: Vec<f64> = values.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    Ok(mean(&moving_ranges) / d2(2)?)
}
