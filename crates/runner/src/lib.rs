//! Caliper Runner
//!
//! Wires the pieces into a running monitoring pipeline:
//! providers publish completed subgroups on the transport, the pipeline
//! task drives the detection engine, and engine events are republished
//! for external persistence / event-bus layers.

pub mod bootstrap;
pub mod pipeline;

pub use bootstrap::{PipelineConfig, init_logging};
pub use pipeline::MonitoringPipeline;
