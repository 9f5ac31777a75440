//! Field validators
//!
//! Pure predicates over raw boundary strings. The patterns live in
//! process-wide statics owned by the `core_kernel` value types, so each
//! check is a single regex match or checksum pass.

use core_kernel::{BrlAmount, MonthReference, TaxId};

/// True if `tax_id` is exactly eleven digits with matching CPF check digits
///
/// Repeated-digit sequences such as `11111111111` satisfy the arithmetic but
/// are never issued and are rejected.
pub fn validate_tax_id(tax_id: &str) -> bool {
    TaxId::is_valid(tax_id)
}

/// True if `text` is a Brazilian Real literal: `R$ 1.234,56`, `R$150,00`, `150,00`
pub fn validate_currency(text: &str) -> bool {
    BrlAmount::is_valid_literal(text)
}

/// True if `text` is `MM/YYYY` with a month between 01 and 12
pub fn validate_month_reference(text: &str) -> bool {
    MonthReference::is_valid(text)
}
