//! Test Utilities Crate
//!
//! Shared test infrastructure for the billing charge test suite.
//!
//! # Modules
//!
//! - `fixtures`: known-good CPFs, amounts and a pre-registered customer set
//! - `builders`: builders for requests and records, plus a wired in-memory service
//! - `assertions`: assertion helpers with readable failure messages
//! - `generators`: proptest strategies for CPFs, BRL literals and reference months

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
