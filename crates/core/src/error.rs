//! Engine error taxonomy
//!
//! Every statistical prerequisite failure is raised immediately to the
//! caller; the engine never substitutes defaults for missing statistics.

use crate::characteristic::SubgroupMode;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpcError {
    /// A control-chart constant was requested outside its tabulated range.
    /// Always a caller bug; not retried.
    #[error("{constant} is not tabulated for subgroup size {n}")]
    ConstantOutOfRange { constant: &'static str, n: usize },

    /// Sigma must be strictly positive for zone geometry and limit math.
    #[error("sigma must be strictly positive, got {sigma}")]
    NonPositiveSigma { sigma: f64 },

    /// An estimator was given too few observations. The caller should
    /// accumulate more data and retry.
    #[error("insufficient data: {needed} observations required, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Classification was requested before control limits exist.
    #[error("control limits have not been established")]
    NotReady,

    /// Standardized/VariableLimits mode selected without a stored baseline.
    /// Surfaced to the operator as a configuration problem.
    #[error("{mode:?} mode requires a stored center line and sigma")]
    MissingBaseline { mode: SubgroupMode },

    /// The monitor has no registered characteristic with this id.
    #[error("unknown characteristic: {0}")]
    UnknownCharacteristic(Uuid),
}

pub type Result<T> = std::result::Result<T, SpcError>;
