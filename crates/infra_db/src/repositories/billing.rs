//! Billing record repository

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Row in `billing_records`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BillingRecordRow {
    pub record_id: Uuid,
    pub due_date: NaiveDate,
    pub customer_tax_id: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Optional criteria for [`BillingRepository::find`]; `None` disables the criterion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillingRecordFilter {
    pub customer_tax_id: Option<String>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a record
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` on an id clash and
    /// `DatabaseError::ForeignKeyViolation` when the CPF is not a registered customer.
    pub async fn insert(&self, row: &BillingRecordRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO billing_records (record_id, due_date, customer_tax_id, amount, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.record_id)
        .bind(row.due_date)
        .bind(&row.customer_tax_id)
        .bind(row.amount)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, record_id: Uuid) -> Result<Option<BillingRecordRow>, DatabaseError> {
        let row = sqlx::query_as::<_, BillingRecordRow>(
            r#"
            SELECT record_id, due_date, customer_tax_id, amount, created_at
            FROM billing_records
            WHERE record_id = $1
            "#,
        )
        .bind(record_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Records matching every present criterion; the date bounds are inclusive
    pub async fn find(
        &self,
        filter: &BillingRecordFilter,
    ) -> Result<Vec<BillingRecordRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BillingRecordRow>(
            r#"
            SELECT record_id, due_date, customer_tax_id, amount, created_at
            FROM billing_records
            WHERE ($1::text IS NULL OR customer_tax_id = $1)
              AND ($2::date IS NULL OR due_date >= $2)
              AND ($3::date IS NULL OR due_date <= $3)
            ORDER BY created_at, record_id
            "#,
        )
        .bind(filter.customer_tax_id.as_deref())
        .bind(filter.due_from)
        .bind(filter.due_to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
