//! Caliper Core Domain
//!
//! Pure domain types for the caliper SPC engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod characteristic;
pub mod error;
pub mod limits;
pub mod sample;
pub mod violation;
pub mod zone;

// Re-export commonly used types at crate root
pub use characteristic::{CharacteristicConfig, RulePolicy, SubgroupMode};
pub use error::{Result, SpcError};
pub use limits::{ControlLimits, ZoneBoundaries};
pub use sample::{Subgroup, WindowSample};
pub use violation::{RuleKind, Severity, Violation};
pub use zone::{Side, Zone};
