//! Billing record validation
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. all fields empty (or no request at all) → `AllFieldsBlank`
//! 2. due date longer than 10 characters → `DueDateTooLong`
//! 3. amount empty → `AmountBlank`
//! 4. amount not a BRL literal → `AmountMalformed`
//! 5. CPF fails the checksum → `InvalidTaxId`
//! 6. no customer holds the CPF → `CustomerNotRegistered`
//!
//! Steps 1-5 are pure and exposed as [`BillingRecordValidator::check_fields`].
//! Step 6 costs exactly one registry lookup.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{BrlAmount, TaxId, Timezone};
use domain_customer::CustomerPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{BillingError, RejectionReason};
use crate::validators::{validate_currency, validate_tax_id};

/// Maximum accepted length of the submitted due date
pub const MAX_DUE_DATE_LEN: usize = 10;

/// Raw charge input as received at the boundary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecordRequest {
    pub due_date: String,
    pub tax_id: String,
    pub amount: String,
}

impl BillingRecordRequest {
    pub fn new(
        due_date: impl Into<String>,
        tax_id: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            due_date: due_date.into(),
            tax_id: tax_id.into(),
            amount: amount.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.due_date.is_empty() && self.tax_id.is_empty() && self.amount.is_empty()
    }
}

/// Parsed fields of a request that passed the pure checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedFields {
    pub tax_id: TaxId,
    pub amount: BrlAmount,
    pub submitted_due_date: String,
}

/// A request that passed every check, ready for the factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBillingRecord {
    pub tax_id: TaxId,
    pub amount: BrlAmount,
    /// Due date as the caller sent it; informational only
    pub submitted_due_date: String,
    /// Date the charge falls due, which is the acceptance date in the billing timezone
    pub due_date: NaiveDate,
    pub accepted_at: DateTime<Utc>,
}

/// Validates charge requests against field rules and the customer registry
pub struct BillingRecordValidator {
    customers: Arc<dyn CustomerPort>,
    timezone: Timezone,
}

impl BillingRecordValidator {
    pub fn new(customers: Arc<dyn CustomerPort>) -> Self {
        Self {
            customers,
            timezone: Timezone::billing(),
        }
    }

    /// Overrides the timezone used to derive the due date
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Runs the field checks, without touching the registry
    pub fn check_fields(request: &BillingRecordRequest) -> Result<CheckedFields, RejectionReason> {
        if request.is_blank() {
            return Err(RejectionReason::AllFieldsBlank);
        }
        if request.due_date.chars().count() > MAX_DUE_DATE_LEN {
            return Err(RejectionReason::DueDateTooLong);
        }
        if request.amount.is_empty() {
            return Err(RejectionReason::AmountBlank);
        }
        if !validate_currency(&request.amount) {
            return Err(RejectionReason::AmountMalformed);
        }
        // Shape is fine but the value may still exceed the storable maximum
        let amount =
            BrlAmount::parse(&request.amount).map_err(|_| RejectionReason::AmountMalformed)?;
        if !validate_tax_id(&request.tax_id) {
            return Err(RejectionReason::InvalidTaxId);
        }
        let tax_id = TaxId::parse(&request.tax_id).map_err(|_| RejectionReason::InvalidTaxId)?;

        Ok(CheckedFields {
            tax_id,
            amount,
            submitted_due_date: request.due_date.clone(),
        })
    }

    /// Validates a request end to end
    ///
    /// # Errors
    ///
    /// `BillingError::Rejected` with the first failing check, or
    /// `BillingError::CustomerLookup` if the registry could not be consulted.
    #[instrument(skip(self, request))]
    pub async fn validate(
        &self,
        request: Option<BillingRecordRequest>,
    ) -> Result<ValidatedBillingRecord, BillingError> {
        let request = request.ok_or(RejectionReason::AllFieldsBlank)?;
        let fields = Self::check_fields(&request)?;

        match self.customers.find_by_tax_id(&fields.tax_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Err(RejectionReason::CustomerNotRegistered.into()),
            Err(e) if e.is_not_found() => {
                return Err(RejectionReason::CustomerNotRegistered.into())
            }
            Err(e) => return Err(BillingError::CustomerLookup(e)),
        }

        let accepted_at = Utc::now();
        debug!(tax_id = %fields.tax_id, amount = %fields.amount, "Billing request accepted");

        Ok(ValidatedBillingRecord {
            tax_id: fields.tax_id,
            amount: fields.amount,
            submitted_due_date: fields.submitted_due_date,
            due_date: self.timezone.date_of(accepted_at),
            accepted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_customer::ports::mock::MockCustomerPort;
    use domain_customer::Customer;

    const REGISTERED: &str = "50974463051";

    fn request(due_date: &str, tax_id: &str, amount: &str) -> BillingRecordRequest {
        BillingRecordRequest::new(due_date, tax_id, amount)
    }

    fn check(due_date: &str, tax_id: &str, amount: &str) -> Result<CheckedFields, RejectionReason> {
        BillingRecordValidator::check_fields(&request(due_date, tax_id, amount))
    }

    async fn validator() -> BillingRecordValidator {
        let customer = Customer::new(REGISTERED, "Maria Souza").unwrap();
        let port = MockCustomerPort::with_customers(vec![customer]).await;
        BillingRecordValidator::new(Arc::new(port))
    }

    #[test]
    fn test_check_order() {
        assert_eq!(check("", "", ""), Err(RejectionReason::AllFieldsBlank));
        assert_eq!(
            check("24/08/2022 10:00", "bad", ""),
            Err(RejectionReason::DueDateTooLong)
        );
        assert_eq!(check("24/08/2022", "bad", ""), Err(RejectionReason::AmountBlank));
        assert_eq!(
            check("24/08/2022", "bad", "150"),
            Err(RejectionReason::AmountMalformed)
        );
        assert_eq!(
            check("24/08/2022", "12345678900", "R$150,00"),
            Err(RejectionReason::InvalidTaxId)
        );
    }

    #[test]
    fn test_single_blank_field_is_not_all_blank() {
        assert_eq!(
            check("", REGISTERED, "R$150,00").map(|f| f.amount),
            Ok(BrlAmount::from_cents(15000))
        );
        assert_eq!(check("24/08/2022", "", "1,00"), Err(RejectionReason::InvalidTaxId));
    }

    #[test]
    fn test_check_fields_parses_values() {
        let fields = check("24/08/2022", REGISTERED, "R$ 1.234,56").unwrap();
        assert_eq!(fields.tax_id.as_str(), REGISTERED);
        assert_eq!(fields.amount, BrlAmount::from_cents(123456));
        assert_eq!(fields.submitted_due_date, "24/08/2022");
    }

    #[test]
    fn test_amount_above_storage_bound_is_malformed() {
        let max = check("24/08/2022", REGISTERED, "R$ 999.999.999.999,99").unwrap();
        assert_eq!(max.amount, BrlAmount::maximum());
        assert_eq!(
            check("24/08/2022", REGISTERED, "R$ 1.000.000.000.000,00"),
            Err(RejectionReason::AmountMalformed)
        );
    }

    #[tokio::test]
    async fn test_absent_request() {
        let err = validator().await.validate(None).await.unwrap_err();
        assert_eq!(err.rejection(), Some(RejectionReason::AllFieldsBlank));
    }

    #[tokio::test]
    async fn test_unregistered_customer() {
        let err = validator()
            .await
            .validate(Some(request("24/08/2022", "52998224725", "R$150,00")))
            .await
            .unwrap_err();
        assert_eq!(err.rejection(), Some(RejectionReason::CustomerNotRegistered));
    }

    #[tokio::test]
    async fn test_registry_failure_is_not_a_rejection() {
        let port = MockCustomerPort::new();
        port.set_unavailable(true);
        let validator = BillingRecordValidator::new(Arc::new(port));

        let err = validator
            .validate(Some(request("24/08/2022", REGISTERED, "R$150,00")))
            .await
            .unwrap_err();
        assert!(matches!(err, BillingError::CustomerLookup(_)));
    }

    #[tokio::test]
    async fn test_due_date_is_acceptance_date() {
        let validator = validator().await.with_timezone(Timezone::new(chrono_tz::UTC));
        let validated = validator
            .validate(Some(request("24/08/2022", REGISTERED, "R$150,00")))
            .await
            .unwrap();

        assert_eq!(validated.due_date, validated.accepted_at.date_naive());
        assert_eq!(validated.submitted_due_date, "24/08/2022");
    }
}
