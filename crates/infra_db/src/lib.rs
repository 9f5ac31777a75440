//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for billing records and the customer registry,
//! built on SQLx runtime queries.
//!
//! # Layout
//!
//! - `pool`: connection pool configuration and the embedded bootstrap migration
//! - `repositories`: SQL access returning plain row structs
//! - `adapters`: domain port implementations that convert rows into domain types
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresBillingRecordAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new(url)).await?;
//! run_migrations(&pool).await?;
//! let records = PostgresBillingRecordAdapter::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
