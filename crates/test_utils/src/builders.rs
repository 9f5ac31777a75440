//! Test Data Builders

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{BillingRecordId, BrlAmount, TaxId};
use domain_billing::ports::mock::{MockBillingRecordPort, RecordingPublisher};
use domain_billing::{BillingRecord, BillingRecordRequest, BillingService};
use domain_customer::ports::mock::MockCustomerPort;
use domain_customer::Customer;

use crate::fixtures::{AmountFixtures, CustomerFixtures, DateFixtures, TaxIdFixtures};

/// Builder for raw charge requests, defaulting to the accepted reference scenario
#[derive(Debug, Clone)]
pub struct BillingRequestBuilder {
    due_date: String,
    tax_id: String,
    amount: String,
}

impl Default for BillingRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillingRequestBuilder {
    pub fn new() -> Self {
        Self {
            due_date: DateFixtures::SUBMITTED_DUE_DATE.to_string(),
            tax_id: TaxIdFixtures::REGISTERED.to_string(),
            amount: AmountFixtures::LITERAL.to_string(),
        }
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    pub fn tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = tax_id.into();
        self
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn build(self) -> BillingRecordRequest {
        BillingRecordRequest::new(self.due_date, self.tax_id, self.amount)
    }

    /// JSON body with the Portuguese field names legacy clients send
    pub fn to_legacy_json(&self) -> serde_json::Value {
        serde_json::json!({
            "dataVencimento": self.due_date,
            "cpf": self.tax_id,
            "valorCobranca": self.amount,
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "dueDate": self.due_date,
            "taxId": self.tax_id,
            "amount": self.amount,
        })
    }
}

/// Builder for stored records, bypassing validation
#[derive(Debug, Clone)]
pub struct BillingRecordBuilder {
    due_date: NaiveDate,
    tax_id: TaxId,
    amount: BrlAmount,
    created_at: DateTime<Utc>,
}

impl Default for BillingRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillingRecordBuilder {
    pub fn new() -> Self {
        Self {
            due_date: DateFixtures::date(2022, 8, 24),
            tax_id: TaxIdFixtures::registered(),
            amount: AmountFixtures::one_fifty(),
            created_at: Utc::now(),
        }
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn tax_id(mut self, tax_id: TaxId) -> Self {
        self.tax_id = tax_id;
        self
    }

    pub fn amount(mut self, amount: BrlAmount) -> Self {
        self.amount = amount;
        self
    }

    pub fn build(self) -> BillingRecord {
        BillingRecord {
            id: BillingRecordId::new_v7(),
            due_date: self.due_date,
            customer_tax_id: self.tax_id,
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}

/// A billing service over in-memory ports, with handles to inspect them
pub struct TestBilling {
    pub service: Arc<BillingService>,
    pub records: Arc<MockBillingRecordPort>,
    pub customers: Arc<MockCustomerPort>,
    pub publisher: Arc<RecordingPublisher>,
}

impl TestBilling {
    /// Registry pre-loaded with [`CustomerFixtures::registered`], empty store
    pub async fn new() -> Self {
        Self::with(CustomerFixtures::registered(), Vec::new()).await
    }

    pub async fn with(customers: Vec<Customer>, records: Vec<BillingRecord>) -> Self {
        let records = Arc::new(MockBillingRecordPort::with_records(records).await);
        let customers = Arc::new(MockCustomerPort::with_customers(customers).await);
        let publisher = Arc::new(RecordingPublisher::new());
        let service = Arc::new(BillingService::new(
            records.clone(),
            customers.clone(),
            publisher.clone(),
        ));

        Self {
            service,
            records,
            customers,
            publisher,
        }
    }
}
