//! Tokio channel-based transport for single-process mode
//!
//! Uses broadcast channels for pub/sub semantics within a single process.
//! No serialization overhead - messages are passed directly.

use crate::error::TransportError;
use crate::transport::{Publisher, Subscriber};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::broadcast;

/// Channel-based publisher using broadcast
pub struct ChannelPublisher<M> {
    tx: broadcast::Sender<M>,
}

impl<M: Clone> ChannelPublisher<M> {
    /// Create a publisher/subscriber pair with given capacity
    pub fn pair(capacity: usize) -> (Self, ChannelSubscriber<M>) {
        let (tx, rx) = broadcast::channel(capacity);
        (Self { tx: tx.clone() }, ChannelSubscriber { rx, _tx: tx })
    }

    /// Get another subscriber for this publisher
    pub fn subscribe(&self) -> ChannelSubscriber<M> {
        ChannelSubscriber {
            rx: self.tx.subscribe(),
            _tx: self.tx.clone(),
        }
    }
}

impl<M> Clone for ChannelPublisher<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

#[async_trait]
impl<M> Publisher<M> for ChannelPublisher<M>
where
    M: Serialize + Clone + Send + Sync + 'static,
{
    async fn publish(&self, msg: &M) -> Result<(), TransportError> {
        self.tx
            .send(msg.clone())
            .map_err(|_| TransportError::ChannelClosed)?;
        Ok(())
    }
}

/// Channel-based subscriber using broadcast receiver
pub struct ChannelSubscriber<M> {
    rx: broadcast::Receiver<M>,
    // Keep sender alive to prevent channel from closing
    _tx: broadcast::Sender<M>,
}

#[async_trait]
impl<M> Subscriber<M> for ChannelSubscriber<M>
where
    M: DeserializeOwned + Clone + Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => return Ok(msg),
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    // Skip lagged messages and continue
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(TransportError::ChannelClosed);
                }
            }
        }
    }

    fn try_next(&mut self) -> Result<Option<M>, TransportError> {
        match self.rx.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Lagged(_)) => {
                // Return None on lag, caller can retry
                Ok(None)
            }
            Err(broadcast::error::TryRecvError::Closed) => Err(TransportError::ChannelClosed),
        }
    }
}
