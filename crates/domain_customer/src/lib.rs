//! Customer Registry Domain
//!
//! Billing records may only be raised against customers that are already
//! registered. This crate holds the customer aggregate and the port through
//! which the billing domain asks "is this CPF one of ours?".
//!
//! # Examples
//!
//! ```rust
//! use domain_customer::Customer;
//!
//! let customer = Customer::new("52998224725", "Maria Souza").unwrap();
//! assert_eq!(customer.tax_id.formatted(), "529.982.247-25");
//! ```

pub mod customer;
pub mod error;
pub mod ports;

pub use customer::Customer;
pub use error::CustomerError;
pub use ports::CustomerPort;
