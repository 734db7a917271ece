//! Caliper Statistics
//!
//! Control-chart statistics for the caliper SPC engine:
//! - ASTM E2587 constant tables (`d2`, `c4`, `A2`, `D3`, `D4`)
//! - Sigma estimators (R-bar, S-bar, moving range)
//! - Control-limit builders (X-bar/R, I-MR, generic 3-sigma)
//! - Zone geometry and scalar classification
//!
//! Everything here is a pure function of its inputs; no state, no I/O.

pub mod classify;
pub mod constants;
pub mod estimators;
pub mod limits;

// Re-export commonly used items at crate root
pub use classify::{Classification, classify_value};
pub use constants::{MAX_SUBGROUP_SIZE, MIN_SUBGROUP_SIZE, a2, c4, d2, d3, d4};
pub use estimators::{estimate_sigma_moving_range, estimate_sigma_rbar, estimate_sigma_sbar};
pub use limits::{
    ImrLimits, XbarRLimits, calculate_control_limits_from_sigma, calculate_imr_limits,
    calculate_xbar_r_limits, calculate_zones,
};
