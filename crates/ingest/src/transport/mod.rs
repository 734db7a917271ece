//! Transport abstraction layer
//!
//! Unified traits for message passing using tokio channels. The
//! trait-based design allows swapping in other transports (MQTT broker,
//! NATS, etc.) without touching providers or the runner.

pub mod channel;

use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// Publisher - sends messages to a subject/channel
#[async_trait]
pub trait Publisher<M>: Send + Sync
where
    M: Serialize + Send + Sync,
{
    /// Publish a message
    async fn publish(&self, msg: &M) -> Result<(), TransportError>;
}

/// Subscriber - receives messages from a subject
#[async_trait]
pub trait Subscriber<M>: Send
where
    M: DeserializeOwned + Send,
{
    /// Wait for the next message
    async fn next(&mut self) -> Result<M, TransportError>;

    /// Try to receive without blocking (returns None if no message available)
    fn try_next(&mut self) -> Result<Option<M>, TransportError>;
}

/// Logical subject names for message routing.
///
/// Even with in-process channels we keep subject names for clear
/// categorization, logging, and easy migration to a broker later.
pub struct Subjects;

impl Subjects {
    /// Completed subgroups for a characteristic: `subgroups.{name}`
    pub fn subgroups(characteristic: &str) -> String {
        format!("subgroups.{}", characteristic)
    }

    /// Engine events for a characteristic: `events.{name}`
    pub fn events(characteristic: &str) -> String {
        format!("events.{}", characteristic)
    }

    /// All engine events
    pub const EVENTS_ALL: &'static str = "events.*";
}
