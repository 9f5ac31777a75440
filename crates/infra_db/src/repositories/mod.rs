//! Repository implementations
//!
//! Repositories own the SQL and return plain row structs; mapping rows to
//! domain types is left to the adapters.

pub mod billing;
pub mod customer;

pub use billing::{BillingRecordFilter, BillingRecordRow, BillingRepository};
pub use customer::{CustomerRepository, CustomerRow};
