//! PostgreSQL Customer Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError, TaxId};
use domain_customer::{Customer, CustomerPort};

use crate::error::DatabaseError;
use crate::repositories::customer::{CustomerRepository, CustomerRow};

/// PostgreSQL-backed implementation of `CustomerPort`
#[derive(Debug, Clone)]
pub struct PostgresCustomerAdapter {
    repository: CustomerRepository,
    pool: PgPool,
}

impl PostgresCustomerAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresCustomerAdapter {}

#[async_trait]
impl HealthCheckable for PostgresCustomerAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-customer-adapter").await
    }
}

#[async_trait]
impl CustomerPort for PostgresCustomerAdapter {
    #[instrument(skip(self, tax_id), fields(tax_id = %tax_id))]
    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<Customer>, PortError> {
        debug!("Looking up customer");
        self.repository
            .find_by_tax_id(tax_id.as_str())
            .await?
            .map(row_to_customer)
            .transpose()
    }
}

fn row_to_customer(row: CustomerRow) -> Result<Customer, PortError> {
    let tax_id = TaxId::parse(row.tax_id.trim()).map_err(|e| {
        DatabaseError::CorruptRow(format!("customer {}: {}", row.customer_id, e))
    })?;

    Ok(Customer {
        id: CustomerId::from_uuid(row.customer_id),
        tax_id,
        name: row.name,
        state: row.state,
        created_at: row.created_at,
    })
}
