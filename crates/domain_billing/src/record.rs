//! Billing record entity and factory

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{BillingRecordId, BrlAmount, MonthReference, TaxId};
use serde::{Deserialize, Serialize};

use crate::validation::ValidatedBillingRecord;

/// An accepted charge
///
/// Records are immutable once built and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    pub id: BillingRecordId,
    pub due_date: NaiveDate,
    pub customer_tax_id: TaxId,
    /// Stored without currency symbol
    pub amount: BrlAmount,
    pub created_at: DateTime<Utc>,
}

impl BillingRecord {
    /// Month the charge belongs to, as `MM/YYYY`
    pub fn month_reference(&self) -> MonthReference {
        MonthReference::containing(self.due_date)
    }
}

/// Builds records from validated input
pub struct BillingRecordFactory;

impl BillingRecordFactory {
    /// Assigns identity and creation time; no I/O
    pub fn build(validated: ValidatedBillingRecord) -> BillingRecord {
        BillingRecord {
            id: BillingRecordId::new_v7(),
            due_date: validated.due_date,
            customer_tax_id: validated.tax_id,
            amount: validated.amount,
            created_at: validated.accepted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validated() -> ValidatedBillingRecord {
        let accepted_at = Utc::now();
        ValidatedBillingRecord {
            tax_id: TaxId::parse("50974463051").unwrap(),
            amount: BrlAmount::parse("R$ 150,00").unwrap(),
            submitted_due_date: "24/08/2022".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            accepted_at,
        }
    }

    #[test]
    fn test_build_copies_validated_fields() {
        let input = validated();
        let record = BillingRecordFactory::build(input.clone());

        assert_eq!(record.customer_tax_id, input.tax_id);
        assert_eq!(record.amount.to_string(), "150,00");
        assert_eq!(record.due_date, input.due_date);
        assert_eq!(record.created_at, input.accepted_at);
        assert_eq!(record.month_reference().to_string(), "03/2024");
    }

    #[test]
    fn test_build_assigns_fresh_ids() {
        let first = BillingRecordFactory::build(validated());
        let second = BillingRecordFactory::build(validated());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = BillingRecordFactory::build(validated());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["customerTaxId"], "50974463051");
        assert_eq!(json["amount"], "150,00");
        assert_eq!(json["dueDate"], "2024-03-15");
    }
}
