//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter wraps a
//! repository, converts rows into domain types and translates
//! `DatabaseError` into `PortError`.
//!
//! ```rust,ignore
//! use infra_db::adapters::{PostgresBillingRecordAdapter, PostgresCustomerAdapter};
//! use domain_billing::BillingRecordPort;
//! use std::sync::Arc;
//!
//! let records: Arc<dyn BillingRecordPort> = Arc::new(PostgresBillingRecordAdapter::new(pool.clone()));
//! let customers = Arc::new(PostgresCustomerAdapter::new(pool));
//! ```

pub mod billing;
pub mod customer;

pub use billing::PostgresBillingRecordAdapter;
pub use customer::PostgresCustomerAdapter;

use chrono::Utc;
use core_kernel::{AdapterHealth, HealthCheckResult};
use sqlx::PgPool;

/// Runs `SELECT 1` and reports the outcome under `adapter_id`
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();
    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (status, message) = match result {
        Ok(_) => (AdapterHealth::Healthy, None),
        Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
    };

    HealthCheckResult {
        adapter_id: adapter_id.to_string(),
        status,
        latency_ms,
        message,
        checked_at: Utc::now(),
    }
}
