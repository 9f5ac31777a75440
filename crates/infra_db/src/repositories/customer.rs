//! Customer registry repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Row in `customers`
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CustomerRow {
    pub customer_id: Uuid,
    pub tax_id: String,
    pub name: String,
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<CustomerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT customer_id, tax_id, name, state, created_at
            FROM customers
            WHERE tax_id = $1
            "#,
        )
        .bind(tax_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
