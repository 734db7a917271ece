//! Pipeline setup
//!
//! Handles initial setup of a monitoring run: logging, channel capacities
//! and the characteristics to monitor.

use caliper_core::CharacteristicConfig;

/// Initialize env_logger once; safe to call from tests and binaries alike.
pub fn init_logging() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
}

/// Bootstrap configuration for a monitoring pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Capacity of the subgroup and event channels
    pub channel_capacity: usize,
    /// Characteristics registered at startup
    pub characteristics: Vec<CharacteristicConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1000,
            characteristics: Vec::new(),
        }
    }
}

impl PipelineConfig {
    pub fn with_characteristic(mut self, config: CharacteristicConfig) -> Self {
        self.characteristics.push(config);
        self
    }
}
