//! In-process relay for consumption events
//!
//! Drains the channel fed by `ChannelEventPublisher` and hands each event to
//! the log as its JSON wire form, standing in for the message bus bridge.

use domain_billing::ConsumptionCalculationEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Spawns the relay task; it ends when every publisher is dropped
pub fn spawn_event_relay(
    mut receiver: mpsc::Receiver<ConsumptionCalculationEvent>,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut relayed = 0u64;
        while let Some(event) = receiver.recv().await {
            match event.to_json() {
                Ok(payload) => {
                    info!(
                        target: "consumption_events",
                        record_id = %event.billing_record_id,
                        %payload,
                        "Consumption calculation requested"
                    );
                    relayed += 1;
                }
                Err(e) => warn!(
                    record_id = %event.billing_record_id,
                    error = %e,
                    "Event not serializable"
                ),
            }
        }
        info!(relayed, "Consumption event relay stopped");
        relayed
    })
}
