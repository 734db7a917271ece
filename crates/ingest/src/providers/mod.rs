//! Data providers
//!
//! A provider owns the source side of the ingestion boundary: it decides
//! when a subgroup is complete and publishes it on the transport. The
//! engine never depends on which provider produced a subgroup.

pub mod manual;
pub mod tag;

pub use manual::ManualProvider;
pub use tag::{SimulatedTagProvider, TagReading};

use crate::error::IngestError;
use async_trait::async_trait;

/// Provider lifecycle. Submission flows through the transport publisher,
/// so the trait stays object-safe and provider-agnostic.
#[async_trait]
pub trait DataProvider: Send {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Begin producing subgroups
    async fn start(&mut self) -> Result<(), IngestError>;

    /// Stop producing subgroups
    async fn stop(&mut self) -> Result<(), IngestError>;
}
