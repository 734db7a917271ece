//! Caliper Ingest
//!
//! Ingestion layer for the caliper SPC engine. Provides:
//! - Transport abstraction (tokio channels, with traits for future transports)
//! - Wire message types for completed subgroups
//! - Data providers (manual entry, simulated tag polling)
//! - Polymorphic provider configuration (tagged JSON union)
//!
//! ## Architecture
//!
//! ```text
//! Measurement sources (operators, PLC tags)
//!         │
//!    ┌────▼─────┐
//!    │ Provider │  manual submit / timed tag polling
//!    └────┬─────┘
//!         │ Channels: subgroups.{characteristic}
//!    ┌────▼─────┐
//!    │  Engine  │  classification + rule evaluation
//!    └──────────┘
//! ```
//!
//! The engine never depends on which provider produced a subgroup; the
//! buffering/triggering logic that decides when a subgroup is complete
//! lives on the provider side of this boundary.

pub mod config;
pub mod error;
pub mod messages;
pub mod providers;
pub mod transport;

// Re-export commonly used types
pub use config::{ManualProviderConfig, ProviderConfig, TagProviderConfig};
pub use error::{IngestError, TransportError};
pub use messages::SubgroupMessage;
pub use providers::{DataProvider, ManualProvider, SimulatedTagProvider, TagReading};
pub use transport::{
    Publisher, Subjects, Subscriber,
    channel::{ChannelPublisher, ChannelSubscriber},
};
