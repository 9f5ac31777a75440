//! Billing Record Port Definition
//!
//! Storage contract for billing records. Records are write-once, so the
//! port offers insert and reads but no update or delete.

use async_trait::async_trait;
use core_kernel::{BillingRecordId, DomainPort, HealthCheckable, PortError};

use crate::query::BillingQuery;
use crate::record::BillingRecord;

/// Port for billing record persistence
///
/// Implementations:
/// - `PostgresBillingRecordAdapter` (infra_db)
/// - `MockBillingRecordPort`: in-memory store for tests
#[async_trait]
pub trait BillingRecordPort: DomainPort + HealthCheckable {
    /// Stores a new record
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` if a record with the same id exists.
    async fn insert(&self, record: &BillingRecord) -> Result<(), PortError>;

    /// Fetches a record by id; `Ok(None)` when absent
    async fn find_by_id(&self, id: BillingRecordId) -> Result<Option<BillingRecord>, PortError>;

    /// Executes a filter, returning records in storage order
    async fn find(&self, query: &BillingQuery) -> Result<Vec<BillingRecord>, PortError>;
}

/// In-memory adapters for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use crate::events::{ConsumptionCalculationEvent, ConsumptionEventPublisher};
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory implementation of BillingRecordPort
    ///
    /// Keeps insertion order so query results are deterministic.
    #[derive(Debug, Default)]
    pub struct MockBillingRecordPort {
        records: Arc<RwLock<Vec<BillingRecord>>>,
        failing: AtomicBool,
    }

    impl MockBillingRecordPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with records
        pub async fn with_records(records: Vec<BillingRecord>) -> Self {
            let port = Self::new();
            port.records.write().await.extend(records);
            port
        }

        /// Makes every subsequent call fail as if the database were down
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub async fn len(&self) -> usize {
            self.records.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.records.read().await.is_empty()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::connection("mock billing store is down"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockBillingRecordPort {}

    #[async_trait]
    impl HealthCheckable for MockBillingRecordPort {
        async fn health_check(&self) -> HealthCheckResult {
            let mut result = HealthCheckResult::healthy("mock-billing-record-port");
            if self.failing.load(Ordering::SeqCst) {
                result.status = AdapterHealth::Unhealthy;
                result.message = Some("Store switched off".to_string());
            }
            result
        }
    }

    #[async_trait]
    impl BillingRecordPort for MockBillingRecordPort {
        async fn insert(&self, record: &BillingRecord) -> Result<(), PortError> {
            self.check_available()?;
            let mut records = self.records.write().await;
            if records.iter().any(|r| r.id == record.id) {
                return Err(PortError::Conflict {
                    message: format!("Billing record {} already exists", record.id),
                });
            }
            records.push(record.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: BillingRecordId) -> Result<Option<BillingRecord>, PortError> {
            self.check_available()?;
            Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
        }

        async fn find(&self, query: &BillingQuery) -> Result<Vec<BillingRecord>, PortError> {
            self.check_available()?;
            Ok(self
                .records
                .read()
                .await
                .iter()
                .filter(|r| query.matches(r))
                .cloned()
                .collect())
        }
    }

    /// Publisher that keeps every event it is handed
    #[derive(Debug, Default)]
    pub struct RecordingPublisher {
        events: Arc<RwLock<Vec<ConsumptionCalculationEvent>>>,
        failing: AtomicBool,
    }

    impl RecordingPublisher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes subsequent publishes fail without recording
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub async fn events(&self) -> Vec<ConsumptionCalculationEvent> {
            self.events.read().await.clone()
        }
    }

    impl DomainPort for RecordingPublisher {}

    #[async_trait]
    impl ConsumptionEventPublisher for RecordingPublisher {
        async fn publish(&self, event: ConsumptionCalculationEvent) -> Result<(), PortError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::unavailable("consumption-events"));
            }
            self.events.write().await.push(event);
            Ok(())
        }
    }
}
