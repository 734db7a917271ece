//! Manual entry provider
//!
//! Operators key measurements in at a bench; the surrounding UI batches
//! them into a subgroup and calls [`ManualProvider::submit`].

use crate::config::ManualProviderConfig;
use crate::error::IngestError;
use crate::messages::SubgroupMessage;
use crate::providers::DataProvider;
use crate::transport::Publisher;
use async_trait::async_trait;
use log::{debug, info};

/// Provider for operator-entered subgroups.
pub struct ManualProvider {
    config: ManualProviderConfig,
    publisher: Box<dyn Publisher<SubgroupMessage> + Send + Sync>,
    running: bool,
}

impl ManualProvider {
    pub fn new(
        config: ManualProviderConfig,
        publisher: Box<dyn Publisher<SubgroupMessage> + Send + Sync>,
    ) -> Self {
        Self {
            config,
            publisher,
            running: false,
        }
    }

    /// Submit one completed subgroup.
    pub async fn submit(
        &self,
        mean: f64,
        range_or_stddev: Option<f64>,
        actual_n: usize,
    ) -> Result<(), IngestError> {
        if !self.running {
            return Err(IngestError::NotRunning);
        }

        let msg = SubgroupMessage::new(
            self.config.characteristic_id,
            mean,
            range_or_stddev,
            actual_n,
            self.config.name.clone(),
        );
        debug!(
            "[{}] submitting subgroup: mean={:.4} n={}",
            self.config.name, mean, actual_n
        );
        self.publisher.publish(&msg).await?;
        Ok(())
    }
}

#[async_trait]
impl DataProvider for ManualProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn start(&mut self) -> Result<(), IngestError> {
        if self.running {
            return Err(IngestError::AlreadyRunning);
        }
        self.running = true;
        info!("[{}] manual provider started", self.config.name);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), IngestError> {
        if !self.running {
            return Err(IngestError::NotRunning);
        }
        self.running = false;
        info!("[{}] manual provider stopped", self.config.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Subscriber;
    use crate::transport::channel::ChannelPublisher;
    use uuid::Uuid;

    fn provider() -> (ManualProvider, crate::transport::channel::ChannelSubscriber<SubgroupMessage>)
    {
        let (publisher, subscriber) = ChannelPublisher::pair(10);
        let config = ManualProviderConfig {
            name: "bench-entry".to_string(),
            characteristic_id: Uuid::new_v4(),
        };
        (ManualProvider::new(config, Box::new(publisher)), subscriber)
    }

    #[tokio::test]
    async fn test_submit_reaches_subscriber() {
        let (mut provider, mut subscriber) = provider();
        provider.start().await.unwrap();

        provider.submit(10.5, Some(1.1), 5).await.unwrap();

        let msg = subscriber.next().await.unwrap();
        assert_eq!(msg.mean, 10.5);
        assert_eq!(msg.actual_n, 5);
        assert_eq!(msg.source, "bench-entry");
    }

    #[tokio::test]
    async fn test_submit_requires_started_provider() {
        let (provider, _subscriber) = provider();
        assert!(matches!(
            provider.submit(10.5, None, 5).await,
            Err(IngestError::NotRunning)
        ));
    }

    #[tokio::test]
    async fn test_double_start_fails() {
        let (mut provider, _subscriber) = provider();
        provider.start().await.unwrap();
        assert!(matches!(
            provider.start().await,
            Err(IngestError::AlreadyRunning)
        ));
        provider.stop().await.unwrap();
        assert!(matches!(provider.stop().await, Err(IngestError::NotRunning)));
    }
}
