//! Billing Charge Domain
//!
//! Records and queries monthly charges ("cobranças") raised against a
//! customer identified by CPF, and requests a downstream consumption
//! calculation each time a new charge is accepted.
//!
//! # Write path
//!
//! ```text
//! BillingRecordRequest ─► BillingRecordValidator ─► BillingRecordFactory
//!                              │ (CustomerPort)           │
//!                              ▼                          ▼
//!                       RejectionReason          BillingRecordPort::insert
//!                                                         │
//!                                                         ▼
//!                                       ConsumptionEventPublisher::publish
//! ```
//!
//! Validation is fail-fast and ordered: the first failing check decides the
//! rejection reason. A record is never stored unless it passed every check,
//! and the event is published only after storage succeeded.
//!
//! # Read paths
//!
//! Reads skip validation and publishing entirely: the [`request`] module turns
//! raw filter strings into typed values, [`query::BillingQuery`] expresses the
//! filter and the storage port executes it.

pub mod error;
pub mod events;
pub mod ports;
pub mod query;
pub mod record;
pub mod request;
pub mod service;
pub mod validation;
pub mod validators;

pub use error::{BillingError, RejectionReason};
pub use events::{ChannelEventPublisher, ConsumptionCalculationEvent, ConsumptionEventPublisher};
pub use ports::BillingRecordPort;
pub use query::{BillingLookup, BillingQuery, BillingQueryEngine};
pub use record::{BillingRecord, BillingRecordFactory};
pub use request::{parse_record_id, ListFilterRequest};
pub use service::BillingService;
pub use validation::{BillingRecordRequest, BillingRecordValidator, ValidatedBillingRecord};
