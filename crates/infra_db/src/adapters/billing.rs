//! PostgreSQL Billing Record Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    BillingRecordId, BrlAmount, DomainPort, HealthCheckResult, HealthCheckable, PortError, TaxId,
};
use domain_billing::{BillingQuery, BillingRecord, BillingRecordPort};

use crate::error::DatabaseError;
use crate::repositories::billing::{BillingRecordFilter, BillingRecordRow, BillingRepository};

/// PostgreSQL-backed implementation of `BillingRecordPort`
#[derive(Debug, Clone)]
pub struct PostgresBillingRecordAdapter {
    repository: BillingRepository,
    pool: PgPool,
}

impl PostgresBillingRecordAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BillingRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresBillingRecordAdapter {}

#[async_trait]
impl HealthCheckable for PostgresBillingRecordAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-billing-record-adapter").await
    }
}

#[async_trait]
impl BillingRecordPort for PostgresBillingRecordAdapter {
    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn insert(&self, record: &BillingRecord) -> Result<(), PortError> {
        debug!("Inserting billing record");
        self.repository
            .insert(&record_to_row(record))
            .await
            .map_err(PortError::from)
    }

    #[instrument(skip(self), fields(record_id = %id))]
    async fn find_by_id(&self, id: BillingRecordId) -> Result<Option<BillingRecord>, PortError> {
        debug!("Fetching billing record");
        self.repository
            .get(id.into())
            .await?
            .map(row_to_record)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find(&self, query: &BillingQuery) -> Result<Vec<BillingRecord>, PortError> {
        let rows = self.repository.find(&query_to_filter(query)).await?;
        debug!(count = rows.len(), "Billing records fetched");
        rows.into_iter().map(row_to_record).collect()
    }
}

/// Translates the domain filter into repository criteria
pub(crate) fn query_to_filter(query: &BillingQuery) -> BillingRecordFilter {
    BillingRecordFilter {
        customer_tax_id: query.tax_id.as_ref().map(|t| t.as_str().to_string()),
        due_from: query.due_between.map(|r| r.start),
        due_to: query.due_between.map(|r| r.end),
    }
}

pub(crate) fn record_to_row(record: &BillingRecord) -> BillingRecordRow {
    BillingRecordRow {
        record_id: *record.id.as_uuid(),
        due_date: record.due_date,
        customer_tax_id: record.customer_tax_id.as_str().to_string(),
        amount: record.amount.amount(),
        created_at: record.created_at,
    }
}

pub(crate) fn row_to_record(row: BillingRecordRow) -> Result<BillingRecord, PortError> {
    let customer_tax_id = TaxId::parse(row.customer_tax_id.trim()).map_err(|e| {
        DatabaseError::CorruptRow(format!("record {}: {}", row.record_id, e))
    })?;
    let amount = BrlAmount::from_decimal(row.amount).map_err(|e| {
        DatabaseError::CorruptRow(format!("record {}: {}", row.record_id, e))
    })?;

    Ok(BillingRecord {
        id: BillingRecordId::from_uuid(row.record_id),
        due_date: row.due_date,
        customer_tax_id,
        amount,
        created_at: row.created_at,
    })
}
