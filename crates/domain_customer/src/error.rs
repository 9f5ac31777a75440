//! Customer domain errors

use core_kernel::TaxIdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Invalid customer tax id: {0}")]
    InvalidTaxId(#[from] TaxIdError),

    #[error("Customer name may not be blank")]
    BlankName,

    #[error("Customer not found: {0}")]
    NotFound(String),
}
