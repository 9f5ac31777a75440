//! Consumption calculation events
//!
//! Every accepted charge asks a downstream worker to recompute the
//! customer's consumption. Only the message shape and the delivery contract
//! live here; the transport is an adapter concern.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_kernel::{
    AdapterHealth, BillingRecordId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
    TaxId,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::record::BillingRecord;

/// Request for downstream consumption processing of a new record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionCalculationEvent {
    pub customer_tax_id: TaxId,
    pub billing_record_id: BillingRecordId,
    pub occurred_at: DateTime<Utc>,
}

impl ConsumptionCalculationEvent {
    pub fn for_record(record: &BillingRecord) -> Self {
        Self {
            customer_tax_id: record.customer_tax_id.clone(),
            billing_record_id: record.id,
            occurred_at: Utc::now(),
        }
    }

    /// Wire form of the event
    pub fn to_json(&self) -> Result<String, PortError> {
        serde_json::to_string(self).map_err(|e| PortError::transformation(e.to_string()))
    }
}

/// Delivers consumption events
///
/// Called once per stored record, after the write succeeded. Implementations
/// do not retry; a failure is reported to the caller as is.
#[async_trait]
pub trait ConsumptionEventPublisher: DomainPort {
    async fn publish(&self, event: ConsumptionCalculationEvent) -> Result<(), PortError>;
}

/// Publishes onto a bounded in-process channel
///
/// The receiving half is drained by whatever bridges to the real bus. A full
/// channel applies backpressure for up to `send_timeout`; only a channel
/// still full after that, or a closed one, fails the publish.
#[derive(Debug, Clone)]
pub struct ChannelEventPublisher {
    sender: mpsc::Sender<ConsumptionCalculationEvent>,
    send_timeout: Duration,
}

impl ChannelEventPublisher {
    pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(2);

    /// Creates a publisher and the receiver it feeds
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<ConsumptionCalculationEvent>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let publisher = Self {
            sender,
            send_timeout: Self::DEFAULT_SEND_TIMEOUT,
        };
        (publisher, receiver)
    }

    /// How long a publish may wait for room in a full channel
    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }
}

impl DomainPort for ChannelEventPublisher {}

#[async_trait]
impl ConsumptionEventPublisher for ChannelEventPublisher {
    async fn publish(&self, event: ConsumptionCalculationEvent) -> Result<(), PortError> {
        let record_id = event.billing_record_id;
        match tokio::time::timeout(self.send_timeout, self.sender.send(event)).await {
            Ok(Ok(())) => {
                debug!(%record_id, "Consumption event queued");
                Ok(())
            }
            Ok(Err(_)) => {
                warn!(%record_id, "Consumption event channel is closed");
                Err(PortError::connection("consumption event channel closed"))
            }
            Err(_) => {
                warn!(
                    %record_id,
                    timeout_ms = self.send_timeout.as_millis() as u64,
                    "Consumption event channel stayed full"
                );
                Err(PortError::Timeout {
                    operation: "publish consumption event".to_string(),
                    duration_ms: self.send_timeout.as_millis() as u64,
                })
            }
        }
    }
}

#[async_trait]
impl HealthCheckable for ChannelEventPublisher {
    async fn health_check(&self) -> HealthCheckResult {
        let mut result = HealthCheckResult::healthy("channel-event-publisher");
        if self.sender.is_closed() {
            result.status = AdapterHealth::Unhealthy;
            result.message = Some("Receiver dropped".to_string());
        } else if self.sender.capacity() == 0 {
            result.status = AdapterHealth::Degraded;
            result.message = Some("Channel full".to_string());
        }
        result
    }
}
