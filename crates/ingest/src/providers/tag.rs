//! Simulated tag provider
//!
//! Polls a sampling closure on a timer, standing in for a real PLC/OPC-UA
//! tag reader. The closure hands back one completed subgroup per poll;
//! real deployments would buffer raw readings behind a trigger condition
//! before reaching this point.

use crate::config::TagProviderConfig;
use crate::error::IngestError;
use crate::messages::SubgroupMessage;
use crate::providers::DataProvider;
use crate::transport::Publisher;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// One polled subgroup from the simulated tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagReading {
    pub mean: f64,
    pub range_or_stddev: Option<f64>,
    pub actual_n: usize,
}

/// Provider that publishes a subgroup every poll interval.
pub struct SimulatedTagProvider {
    config: TagProviderConfig,
    publisher: Arc<dyn Publisher<SubgroupMessage> + Send + Sync>,
    sampler: Arc<dyn Fn() -> TagReading + Send + Sync>,
    task: Option<JoinHandle<()>>,
}

impl SimulatedTagProvider {
    pub fn new(
        config: TagProviderConfig,
        publisher: Arc<dyn Publisher<SubgroupMessage> + Send + Sync>,
        sampler: Arc<dyn Fn() -> TagReading + Send + Sync>,
    ) -> Self {
        Self {
            config,
            publisher,
            sampler,
            task: None,
        }
    }
}

#[async_trait]
impl DataProvider for SimulatedTagProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn start(&mut self) -> Result<(), IngestError> {
        if self.task.is_some() {
            return Err(IngestError::AlreadyRunning);
        }

        let config = self.config.clone();
        let publisher = Arc::clone(&self.publisher);
        let sampler = Arc::clone(&self.sampler);

        info!(
            "[{}] polling {} every {}ms",
            config.name, config.tag_path, config.poll_interval_ms
        );
        self.task = Some(tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_millis(config.poll_interval_ms.max(1)));
            // The first tick fires immediately; skip it so readings are
            // spaced a full interval apart.
            interval.tick().await;
            loop {
                interval.tick().await;
                let reading = sampler();
                let msg = SubgroupMessage::new(
                    config.characteristic_id,
                    reading.mean,
                    reading.range_or_stddev,
                    reading.actual_n,
                    config.name.clone(),
                );
                if let Err(e) = publisher.publish(&msg).await {
                    warn!("[{}] publish failed, stopping: {}", config.name, e);
                    break;
                }
            }
        }));
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), IngestError> {
        let task = self.task.take().ok_or(IngestError::NotRunning)?;
        task.abort();
        info!("[{}] tag provider stopped", self.config.name);
        Ok(())
    }
}
