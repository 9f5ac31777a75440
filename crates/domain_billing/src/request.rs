//! Boundary parsing
//!
//! Turns the loosely typed strings callers send into domain values. Empty
//! strings count as absent, which is how blank query parameters arrive.

use core_kernel::{BillingRecordId, MonthReference, TaxId};
use serde::{Deserialize, Serialize};

use crate::error::RejectionReason;
use crate::query::BillingLookup;

/// Raw list filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilterRequest {
    pub tax_id: Option<String>,
    pub month_ref: Option<String>,
}

impl ListFilterRequest {
    pub fn new(tax_id: Option<String>, month_ref: Option<String>) -> Self {
        Self { tax_id, month_ref }
    }

    /// Parses the filter
    ///
    /// # Errors
    ///
    /// Checked in order: a present but invalid CPF gives `InvalidTaxId`, a
    /// present but invalid month gives `InvalidMonthReference`, and nothing
    /// supplied at all gives `NoFilterSupplied`.
    pub fn into_lookup(self) -> Result<BillingLookup, RejectionReason> {
        let tax_id = parse_tax_id_filter(self.tax_id.as_deref())?;
        let month_ref = non_empty(self.month_ref.as_deref())
            .map(|text| {
                MonthReference::parse(text).map_err(|_| RejectionReason::InvalidMonthReference)
            })
            .transpose()?;

        if tax_id.is_none() && month_ref.is_none() {
            return Err(RejectionReason::NoFilterSupplied);
        }
        Ok(BillingLookup { tax_id, month_ref })
    }
}

/// Parses an optional CPF filter; empty means no filter
pub fn parse_tax_id_filter(text: Option<&str>) -> Result<Option<TaxId>, RejectionReason> {
    non_empty(text)
        .map(|text| TaxId::parse(text).map_err(|_| RejectionReason::InvalidTaxId))
        .transpose()
}

/// Parses a record id in either `BOL-<uuid>` or bare UUID form
pub fn parse_record_id(text: &str) -> Result<BillingRecordId, RejectionReason> {
    text.trim()
        .parse()
        .map_err(|_| RejectionReason::MalformedId)
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
