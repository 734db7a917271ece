//! Provider configuration
//!
//! Providers are configured externally and stored as a JSON blob with a
//! `type` discriminator. The union is closed at this boundary; the engine
//! consumes only the resolved values, never the raw blob.

use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configuration for a manual-entry provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualProviderConfig {
    pub name: String,
    pub characteristic_id: Uuid,
}

/// Configuration for a tag-polling provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagProviderConfig {
    pub name: String,
    pub characteristic_id: Uuid,
    /// Address of the tag on the source system
    pub tag_path: String,
    /// Polling period in milliseconds
    pub poll_interval_ms: u64,
    /// Measurements collected per subgroup
    pub sample_count: usize,
}

/// Closed tagged union of provider configurations.
///
/// Serialized form carries a `type` discriminator:
/// `{"type": "manual", ...}` or `{"type": "tag", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    Manual(ManualProviderConfig),
    Tag(TagProviderConfig),
}

impl ProviderConfig {
    /// Decode a stored configuration blob.
    pub fn from_json(raw: &str) -> Result<Self, IngestError> {
        serde_json::from_str(raw).map_err(|e| IngestError::InvalidConfig(e.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            ProviderConfig::Manual(c) => &c.name,
            ProviderConfig::Tag(c) => &c.name,
        }
    }

    pub fn characteristic_id(&self) -> Uuid {
        match self {
            ProviderConfig::Manual(c) => c.characteristic_id,
            ProviderConfig::Tag(c) => c.characteristic_id,
        }
    }
}
