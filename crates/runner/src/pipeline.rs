//! Monitoring pipeline
//!
//! One task per pipeline drains the subgroup channel, drives the monitor
//! and republishes engine events. Per-characteristic serialization falls
//! out of the single drain task: each window is only ever touched by this
//! flow, which is the engine's concurrency contract.

use crate::bootstrap::PipelineConfig;
use caliper_core::Result;
use caliper_engine::{
    BaselineData, CharacteristicMonitor, EstablishedBaseline, MonitorEvent,
};
use caliper_ingest::{
    ChannelPublisher, ChannelSubscriber, Publisher, SubgroupMessage, Subscriber,
};
use log::{info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// A running monitoring pipeline.
pub struct MonitoringPipeline {
    monitor: Arc<CharacteristicMonitor>,
    subgroups: ChannelPublisher<SubgroupMessage>,
    events: ChannelPublisher<MonitorEvent>,
    // Keeps the event channel open while no external subscriber exists
    _event_keepalive: ChannelSubscriber<MonitorEvent>,
    task: JoinHandle<()>,
}

impl MonitoringPipeline {
    /// Register the configured characteristics and start the drain task.
    pub fn start(config: PipelineConfig) -> Result<Self> {
        let monitor = Arc::new(CharacteristicMonitor::new());
        for characteristic in config.characteristics {
            monitor.register(characteristic)?;
        }

        let (subgroups, mut subgroup_rx) =
            ChannelPublisher::<SubgroupMessage>::pair(config.channel_capacity);
        let (events, event_keepalive) =
            ChannelPublisher::<MonitorEvent>::pair(config.channel_capacity);

        let drain_monitor = Arc::clone(&monitor);
        let drain_events = events.clone();
        let task = tokio::spawn(async move {
            loop {
                let msg = match subgroup_rx.next().await {
                    Ok(msg) => msg,
                    Err(_) => {
                        info!("[PIPELINE] subgroup channel closed, draining stopped");
                        break;
                    }
                };

                let characteristic_id = msg.characteristic_id;
                match drain_monitor.process_subgroup(&msg.into_subgroup()) {
                    Ok(outcome) => {
                        for event in MonitorEvent::from_outcome(characteristic_id, &outcome) {
                            if let Err(e) = drain_events.publish(&event).await {
                                warn!("[PIPELINE] event publish failed: {}", e);
                            }
                        }
                    }
                    Err(e) => {
                        warn!(
                            "[PIPELINE] dropped subgroup for {}: {}",
                            characteristic_id, e
                        );
                    }
                }
            }
        });

        info!("[PIPELINE] started");
        Ok(Self {
            monitor,
            subgroups,
            events,
            _event_keepalive: event_keepalive,
            task,
        })
    }

    /// Handle to the monitor, e.g. for baseline establishment.
    pub fn monitor(&self) -> Arc<CharacteristicMonitor> {
        Arc::clone(&self.monitor)
    }

    /// Publisher handed to providers for submitting subgroups.
    pub fn subgroup_publisher(&self) -> ChannelPublisher<SubgroupMessage> {
        self.subgroups.clone()
    }

    /// Subscribe to the engine event stream.
    pub fn subscribe_events(&self) -> ChannelSubscriber<MonitorEvent> {
        self.events.subscribe()
    }

    /// Establish a baseline and announce the recalculated limits on the
    /// event stream.
    pub async fn establish_baseline(
        &self,
        id: Uuid,
        data: &BaselineData,
    ) -> Result<EstablishedBaseline> {
        let baseline = self.monitor.establish_baseline(id, data)?;
        self.publish_event(MonitorEvent::LimitsRecalculated {
            characteristic_id: id,
            center_line: baseline.center_line,
            sigma: baseline.sigma,
        })
        .await;
        Ok(baseline)
    }

    /// Clear a characteristic's window and announce it.
    pub async fn reset(&self, id: Uuid) -> Result<()> {
        self.monitor.reset(id)?;
        self.publish_event(MonitorEvent::WindowCleared {
            characteristic_id: id,
        })
        .await;
        Ok(())
    }

    async fn publish_event(&self, event: MonitorEvent) {
        if let Err(e) = self.events.publish(&event).await {
            warn!("[PIPELINE] event publish failed: {}", e);
        }
    }

    /// Stop the drain task.
    pub async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
        info!("[PIPELINE] shut down");
    }
}
