//! Error types for the ingest crate

use thiserror::Error;

/// Transport-level errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Send failed: {0}")]
    Send(String),

    #[error("Channel closed")]
    ChannelClosed,
}

/// Provider-level errors
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid provider config: {0}")]
    InvalidConfig(String),

    #[error("Provider already running")]
    AlreadyRunning,

    #[error("Provider not running")]
    NotRunning,
}
