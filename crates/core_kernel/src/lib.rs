//! Core Kernel - Foundational types and utilities for billing charge processing
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - BRL amounts with precise decimal arithmetic
//! - CPF tax identifiers with checksum validation
//! - Calendar types for due dates and reference months
//! - Record identifiers and the port error taxonomy

pub mod money;
pub mod tax_id;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{BrlAmount, MoneyError};
pub use tax_id::{TaxId, TaxIdError};
pub use temporal::{DateRange, MonthReference, TemporalError, Timezone};
pub use identifiers::{BillingRecordId, CustomerId};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
