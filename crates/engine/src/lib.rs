//! Caliper Engine
//!
//! The SPC detection engine:
//! - [`window`] - bounded, continuously-reclassified history of classified samples
//! - [`rules`] - the eight Nelson pattern detectors
//! - [`resolver`] - subgroup-size policy (nominal / standardized / variable limits)
//! - [`monitor`] - per-characteristic orchestration of the above
//! - [`events`] - typed domain events for external persistence/event-bus layers
//!
//! ## Architecture
//!
//! ```text
//! Ingestion (manual, tag polling)
//!         │ completed subgroups
//!    ┌────▼──────────┐
//!    │ Characteristic │  resolve mode → classify → append → evaluate rules
//!    │    Monitor     │
//!    └────┬──────────┘
//!         │ SubgroupOutcome + MonitorEvents
//!    ┌────▼────┐
//!    │ Caller  │  persistence, event bus, WebSocket (external)
//!    └─────────┘
//! ```
//!
//! The engine is synchronous pure computation: no I/O, no locking beyond
//! the monitor registry's per-entry guards. Callers serialize access per
//! characteristic.

pub mod events;
pub mod monitor;
pub mod resolver;
pub mod rules;
pub mod window;

// Re-export commonly used types
pub use events::MonitorEvent;
pub use monitor::{
    BaselineData, BaselineSubgroup, CharacteristicMonitor, EstablishedBaseline, SubgroupOutcome,
};
pub use resolver::{Resolution, SubgroupModeResolver};
pub use rules::{evaluate_rules, is_triggered};
pub use window::RollingWindow;
