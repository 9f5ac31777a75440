//! Billing record queries
//!
//! A [`BillingQuery`] is a plain filter value: a CPF, an inclusive due-date
//! range, both, or neither. Storage adapters execute it; the in-memory mock
//! uses [`BillingQuery::matches`] directly and the SQL adapter translates the
//! same two predicates into a `WHERE` clause. Because the query is a value,
//! re-executing it restarts the result sequence.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{BillingRecordId, DateRange, MonthReference, TaxId};
use tracing::{debug, instrument};

use crate::error::{BillingError, RejectionReason};
use crate::ports::BillingRecordPort;
use crate::record::BillingRecord;

/// Filter over billing records; absent criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingQuery {
    pub tax_id: Option<TaxId>,
    pub due_between: Option<DateRange>,
}

impl BillingQuery {
    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_tax_id(tax_id: TaxId) -> Self {
        Self {
            tax_id: Some(tax_id),
            due_between: None,
        }
    }

    pub fn due_within(range: DateRange) -> Self {
        Self {
            tax_id: None,
            due_between: Some(range),
        }
    }

    /// Narrows the query to one customer
    pub fn and_tax_id(mut self, tax_id: Option<TaxId>) -> Self {
        self.tax_id = tax_id;
        self
    }

    /// True if the record satisfies every present criterion
    pub fn matches(&self, record: &BillingRecord) -> bool {
        let tax_id_ok = self
            .tax_id
            .as_ref()
            .map_or(true, |tax_id| &record.customer_tax_id == tax_id);
        let due_ok = self
            .due_between
            .map_or(true, |range| range.contains(record.due_date));
        tax_id_ok && due_ok
    }
}

/// Parsed list filter: a CPF, a reference month, or both
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingLookup {
    pub tax_id: Option<TaxId>,
    pub month_ref: Option<MonthReference>,
}

impl BillingLookup {
    /// The query this lookup runs; a CPF takes precedence over the month
    pub fn to_query(&self) -> Option<BillingQuery> {
        match (&self.tax_id, &self.month_ref) {
            (Some(tax_id), _) => Some(BillingQuery::for_tax_id(tax_id.clone())),
            (None, Some(month)) => Some(BillingQuery::due_within(month.date_range())),
            (None, None) => None,
        }
    }
}

/// Answers billing record lookups against a storage port
pub struct BillingQueryEngine {
    records: Arc<dyn BillingRecordPort>,
}

impl BillingQueryEngine {
    pub fn new(records: Arc<dyn BillingRecordPort>) -> Self {
        Self { records }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(
        &self,
        id: BillingRecordId,
    ) -> Result<Option<BillingRecord>, BillingError> {
        self.records.find_by_id(id).await.map_err(BillingError::Storage)
    }

    /// Records of one customer
    pub async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Vec<BillingRecord>, BillingError> {
        self.run(&BillingQuery::for_tax_id(tax_id.clone())).await
    }

    /// Records of one customer if a CPF is given, otherwise records due in the month
    ///
    /// # Errors
    ///
    /// `RejectionReason::NoFilterSupplied` when both are absent.
    pub async fn find_by_tax_id_or_month(
        &self,
        tax_id: Option<&TaxId>,
        month_ref: Option<&MonthReference>,
    ) -> Result<Vec<BillingRecord>, BillingError> {
        let lookup = BillingLookup {
            tax_id: tax_id.cloned(),
            month_ref: month_ref.copied(),
        };
        self.find_by_lookup(&lookup).await
    }

    pub async fn find_by_lookup(
        &self,
        lookup: &BillingLookup,
    ) -> Result<Vec<BillingRecord>, BillingError> {
        let query = lookup.to_query().ok_or(RejectionReason::NoFilterSupplied)?;
        self.run(&query).await
    }

    /// Records due between `start` and `end` inclusive, optionally for one customer
    ///
    /// An inverted range (`start > end`) matches nothing and is not an error.
    pub async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        tax_id: Option<&TaxId>,
    ) -> Result<Vec<BillingRecord>, BillingError> {
        let Ok(range) = DateRange::new(start, end) else {
            debug!(%start, %end, "Inverted date range, returning no records");
            return Ok(Vec::new());
        };
        self.run(&BillingQuery::due_within(range).and_tax_id(tax_id.cloned()))
            .await
    }

    async fn run(&self, query: &BillingQuery) -> Result<Vec<BillingRecord>, BillingError> {
        let records = self.records.find(query).await.map_err(BillingError::Storage)?;
        debug!(count = records.len(), "Billing query executed");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::BrlAmount;

    fn record(tax_id: &str, due_date: NaiveDate) -> BillingRecord {
        BillingRecord {
            id: BillingRecordId::new_v7(),
            due_date,
            customer_tax_id: TaxId::parse(tax_id).unwrap(),
            amount: BrlAmount::from_cents(15000),
            created_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(BillingQuery::all().matches(&record("50974463051", date(2024, 1, 1))));
    }

    #[test]
    fn test_combined_criteria() {
        let tax_id = TaxId::parse("50974463051").unwrap();
        let january = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let query = BillingQuery::due_within(january).and_tax_id(Some(tax_id));

        assert!(query.matches(&record("50974463051", date(2024, 1, 31))));
        assert!(!query.matches(&record("50974463051", date(2024, 2, 1))));
        assert!(!query.matches(&record("52998224725", date(2024, 1, 15))));
    }

    #[test]
    fn test_lookup_prefers_tax_id() {
        let tax_id = TaxId::parse("50974463051").unwrap();
        let lookup = BillingLookup {
            tax_id: Some(tax_id.clone()),
            month_ref: Some(MonthReference::parse("02/2024").unwrap()),
        };
        assert_eq!(lookup.to_query(), Some(BillingQuery::for_tax_id(tax_id)));
    }

    #[test]
    fn test_lookup_by_month_covers_whole_month() {
        let lookup = BillingLookup {
            tax_id: None,
            month_ref: Some(MonthReference::parse("02/2024").unwrap()),
        };
        let query = lookup.to_query().unwrap();

        assert!(query.matches(&record("50974463051", date(2024, 2, 1))));
        assert!(query.matches(&record("52998224725", date(2024, 2, 29))));
        assert!(!query.matches(&record("52998224725", date(2024, 3, 1))));
    }

    #[test]
    fn test_lookup_without_filters() {
        let lookup = BillingLookup { tax_id: None, month_ref: None };
        assert!(lookup.to_query().is_none());
    }
}
