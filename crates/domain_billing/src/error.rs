//! Billing domain errors

use core_kernel::{BillingRecordId, PortError};
use serde::Serialize;
use thiserror::Error;

/// Why a caller's input was refused
///
/// The `Display` text is the human-readable message returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("None of the fields may be blank")]
    AllFieldsBlank,

    #[error("Due date may not be longer than 10 characters")]
    DueDateTooLong,

    #[error("Amount may not be empty")]
    AmountBlank,

    #[error("Amount is not a valid BRL currency value")]
    AmountMalformed,

    #[error("Invalid CPF")]
    InvalidTaxId,

    #[error("CPF is not registered")]
    CustomerNotRegistered,

    #[error("Invalid reference month")]
    InvalidMonthReference,

    #[error("Either a CPF or a reference month must be supplied")]
    NoFilterSupplied,

    #[error("Malformed billing record id")]
    MalformedId,
}

impl RejectionReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::AllFieldsBlank => "all_fields_blank",
            RejectionReason::DueDateTooLong => "due_date_too_long",
            RejectionReason::AmountBlank => "amount_blank",
            RejectionReason::AmountMalformed => "amount_malformed",
            RejectionReason::InvalidTaxId => "invalid_tax_id",
            RejectionReason::CustomerNotRegistered => "customer_not_registered",
            RejectionReason::InvalidMonthReference => "invalid_month_reference",
            RejectionReason::NoFilterSupplied => "no_filter_supplied",
            RejectionReason::MalformedId => "malformed_id",
        }
    }
}

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// The input was refused; nothing was stored
    #[error("{0}")]
    Rejected(#[from] RejectionReason),

    /// The customer registry could not be consulted
    #[error("Customer lookup failed: {0}")]
    CustomerLookup(#[source] PortError),

    /// Reading or writing billing records failed
    #[error("Billing record storage failed: {0}")]
    Storage(#[source] PortError),

    /// The record was stored but the consumption event was not delivered
    #[error("Billing record {record_id} was stored but its consumption event could not be published: {source}")]
    Publish {
        record_id: BillingRecordId,
        #[source]
        source: PortError,
    },
}

impl BillingError {
    /// The rejection reason, if this is a caller input error
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            BillingError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        self.rejection().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(RejectionReason::InvalidTaxId.to_string(), "Invalid CPF");
        assert_eq!(
            RejectionReason::NoFilterSupplied.to_string(),
            "Either a CPF or a reference month must be supplied"
        );
        assert_eq!(
            BillingError::from(RejectionReason::AmountBlank).to_string(),
            "Amount may not be empty"
        );
    }

    #[test]
    fn test_rejection_accessor() {
        let rejected = BillingError::Rejected(RejectionReason::MalformedId);
        assert_eq!(rejected.rejection(), Some(RejectionReason::MalformedId));

        let storage = BillingError::Storage(PortError::internal("disk full"));
        assert!(!storage.is_rejection());
    }

    #[test]
    fn test_publish_error_names_record() {
        let record_id = BillingRecordId::new_v7();
        let err = BillingError::Publish {
            record_id,
            source: PortError::unavailable("consumption-events"),
        };
        assert!(err.to_string().contains(&record_id.to_string()));
    }
}
