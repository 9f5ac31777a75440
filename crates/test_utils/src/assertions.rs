//! Custom Test Assertions

use core_kernel::BrlAmount;
use domain_billing::{BillingError, BillingRecord, ConsumptionCalculationEvent, RejectionReason};

/// Asserts that an operation was rejected for exactly `expected`
///
/// # Panics
///
/// Panics if the result is `Ok`, a non-rejection error, or another reason
pub fn assert_rejected<T: std::fmt::Debug>(
    result: Result<T, BillingError>,
    expected: RejectionReason,
) {
    match result {
        Err(BillingError::Rejected(reason)) => assert_eq!(
            reason, expected,
            "Expected rejection {:?}, got {:?}",
            expected, reason
        ),
        other => panic!("Expected rejection {:?}, got {:?}", expected, other),
    }
}

/// Asserts the amount rendered the pt-BR way, e.g. `"150,00"`
pub fn assert_amount(amount: &BrlAmount, expected: &str) {
    assert_eq!(
        amount.to_string(),
        expected,
        "Amount mismatch: actual={}, expected={}",
        amount,
        expected
    );
}

/// Asserts that exactly one event was published, for `record`
pub fn assert_single_event_for(events: &[ConsumptionCalculationEvent], record: &BillingRecord) {
    assert_eq!(events.len(), 1, "Expected exactly one event, got {:?}", events);
    assert_eq!(events[0].billing_record_id, record.id, "Event names another record");
    assert_eq!(
        events[0].customer_tax_id, record.customer_tax_id,
        "Event names another customer"
    );
}
