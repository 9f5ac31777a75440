//! Billing application service
//!
//! Wires the write path (validate, build, store, publish) and the read
//! paths (parse, query) over the domain ports.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{BillingRecordId, HealthCheckResult, TaxId, Timezone};
use domain_customer::CustomerPort;
use tracing::{error, info, instrument};

use crate::error::BillingError;
use crate::events::{ConsumptionCalculationEvent, ConsumptionEventPublisher};
use crate::ports::BillingRecordPort;
use crate::query::BillingQueryEngine;
use crate::record::{BillingRecord, BillingRecordFactory};
use crate::request::ListFilterRequest;
use crate::validation::{BillingRecordRequest, BillingRecordValidator};

pub struct BillingService {
    validator: BillingRecordValidator,
    records: Arc<dyn BillingRecordPort>,
    publisher: Arc<dyn ConsumptionEventPublisher>,
    queries: BillingQueryEngine,
}

impl BillingService {
    pub fn new(
        records: Arc<dyn BillingRecordPort>,
        customers: Arc<dyn CustomerPort>,
        publisher: Arc<dyn ConsumptionEventPublisher>,
    ) -> Self {
        Self {
            validator: BillingRecordValidator::new(customers),
            queries: BillingQueryEngine::new(records.clone()),
            records,
            publisher,
        }
    }

    /// Sets the timezone that decides the acceptance date
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.validator = self.validator.with_timezone(timezone);
        self
    }

    /// Accepts a new charge
    ///
    /// The consumption event is published only after the record is stored.
    /// If publishing fails the record stays stored and
    /// `BillingError::Publish` names it.
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        request: Option<BillingRecordRequest>,
    ) -> Result<BillingRecord, BillingError> {
        let validated = self.validator.validate(request).await?;
        let record = BillingRecordFactory::build(validated);

        self.records
            .insert(&record)
            .await
            .map_err(BillingError::Storage)?;
        info!(
            record_id = %record.id,
            tax_id = %record.customer_tax_id,
            amount = %record.amount,
            "Billing record stored"
        );

        let event = ConsumptionCalculationEvent::for_record(&record);
        if let Err(source) = self.publisher.publish(event).await {
            error!(record_id = %record.id, error = %source, "Consumption event not published");
            return Err(BillingError::Publish {
                record_id: record.id,
                source,
            });
        }

        Ok(record)
    }

    pub async fn get(&self, id: BillingRecordId) -> Result<Option<BillingRecord>, BillingError> {
        self.queries.find_by_id(id).await
    }

    /// Lists charges by CPF or reference month
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: ListFilterRequest,
    ) -> Result<Vec<BillingRecord>, BillingError> {
        let lookup = filter.into_lookup()?;
        self.queries.find_by_lookup(&lookup).await
    }

    pub async fn list_by_tax_id(
        &self,
        tax_id: &TaxId,
    ) -> Result<Vec<BillingRecord>, BillingError> {
        self.queries.find_by_tax_id(tax_id).await
    }

    /// Lists charges due in an inclusive period, optionally for one customer
    #[instrument(skip(self))]
    pub async fn list_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        tax_id: Option<&TaxId>,
    ) -> Result<Vec<BillingRecord>, BillingError> {
        self.queries.find_by_date_range(start, end, tax_id).await
    }

    /// Health of the record store
    pub async fn storage_health(&self) -> HealthCheckResult {
        self.records.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RejectionReason;
    use crate::ports::mock::{MockBillingRecordPort, RecordingPublisher};
    use core_kernel::BrlAmount;
    use domain_customer::ports::mock::MockCustomerPort;
    use domain_customer::Customer;

    const REGISTERED: &str = "50974463051";

    struct Harness {
        service: BillingService,
        records: Arc<MockBillingRecordPort>,
        publisher: Arc<RecordingPublisher>,
    }

    async fn harness() -> Harness {
        let customers = MockCustomerPort::with_customers(vec![
            Customer::new(REGISTERED, "Maria Souza").unwrap(),
            Customer::new("52998224725", "João Lima").unwrap(),
        ])
        .await;
        let records = Arc::new(MockBillingRecordPort::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let service =
            BillingService::new(records.clone(), Arc::new(customers), publisher.clone());
        Harness {
            service,
            records,
            publisher,
        }
    }

    fn request(tax_id: &str, amount: &str) -> Option<BillingRecordRequest> {
        Some(BillingRecordRequest::new("24/08/2022", tax_id, amount))
    }

    #[tokio::test]
    async fn test_create_stores_and_publishes_once() {
        let h = harness().await;

        let record = h.service.create(request(REGISTERED, "R$150,00")).await.unwrap();

        assert_eq!(record.amount.to_string(), "150,00");
        assert_eq!(record.customer_tax_id.as_str(), REGISTERED);

        let events = h.publisher.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].customer_tax_id.as_str(), REGISTERED);
        assert_eq!(events[0].billing_record_id, record.id);
    }

    #[tokio::test]
    async fn test_round_trip_through_storage() {
        let h = harness().await;
        let record = h.service.create(request(REGISTERED, "R$ 1.234,56")).await.unwrap();

        let first = h.service.get(record.id).await.unwrap().unwrap();
        let second = h.service.get(record.id).await.unwrap().unwrap();

        assert_eq!(first.customer_tax_id, record.customer_tax_id);
        assert_eq!(first.amount, BrlAmount::from_cents(123456));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_tax_id_stores_nothing() {
        let h = harness().await;

        let err = h.service.create(request("12345678900", "R$150,00")).await.unwrap_err();

        assert_eq!(err.rejection(), Some(RejectionReason::InvalidTaxId));
        assert!(h.records.is_empty().await);
        assert!(h.publisher.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_publishes_nothing() {
        let h = harness().await;
        h.records.set_failing(true);

        let err = h.service.create(request(REGISTERED, "R$150,00")).await.unwrap_err();

        assert!(matches!(err, BillingError::Storage(_)));
        assert!(h.publisher.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_keeps_record() {
        let h = harness().await;
        h.publisher.set_failing(true);

        let err = h.service.create(request(REGISTERED, "R$150,00")).await.unwrap_err();

        let record_id = match err {
            BillingError::Publish { record_id, .. } => record_id,
            other => panic!("expected publish error, got {other:?}"),
        };
        assert!(h.service.get(record_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_by_tax_id_takes_precedence() {
        let h = harness().await;
        let mine = h.service.create(request(REGISTERED, "10,00")).await.unwrap();
        h.service.create(request("52998224725", "20,00")).await.unwrap();

        let month = mine.month_reference().to_string();
        let listed = h
            .service
            .list(ListFilterRequest::new(Some(REGISTERED.to_string()), Some(month)))
            .await
            .unwrap();

        assert_eq!(listed, vec![mine]);
    }

    #[tokio::test]
    async fn test_list_by_month() {
        let h = harness().await;
        let first = h.service.create(request(REGISTERED, "10,00")).await.unwrap();
        let second = h.service.create(request("52998224725", "20,00")).await.unwrap();

        let month = first.month_reference().to_string();
        let listed = h
            .service
            .list(ListFilterRequest::new(None, Some(month)))
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&first) && listed.contains(&second));

        let other_month = ListFilterRequest::new(None, Some("01/1999".to_string()));
        assert!(h.service.list(other_month).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_rejections() {
        let h = harness().await;

        let err = h
            .service
            .list(ListFilterRequest::new(Some(String::new()), Some("13/2020".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.rejection(), Some(RejectionReason::InvalidMonthReference));

        let err = h
            .service
            .list(ListFilterRequest::new(Some(String::new()), Some(String::new())))
            .await
            .unwrap_err();
        assert_eq!(err.rejection(), Some(RejectionReason::NoFilterSupplied));
    }

    #[tokio::test]
    async fn test_list_between() {
        let h = harness().await;
        let record = h.service.create(request(REGISTERED, "10,00")).await.unwrap();
        let day = record.due_date;
        let tax_id = record.customer_tax_id.clone();

        let found = h.service.list_between(day, day, Some(&tax_id)).await.unwrap();
        assert_eq!(found, vec![record.clone()]);

        let other = TaxId::parse("52998224725").unwrap();
        assert!(h.service.list_between(day, day, Some(&other)).await.unwrap().is_empty());

        let inverted = h
            .service
            .list_between(day.succ_opt().unwrap(), day, None)
            .await
            .unwrap();
        assert!(inverted.is_empty());

        assert_eq!(h.service.list_by_tax_id(&tax_id).await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_storage_health() {
        let h = harness().await;
        assert!(h.service.storage_health().await.is_healthy());

        h.records.set_failing(true);
        assert!(!h.service.storage_health().await.is_healthy());
    }
}
