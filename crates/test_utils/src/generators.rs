//! Property-Based Test Generators

use core_kernel::TaxId;
use proptest::prelude::*;

/// Check digit over `digits`, weights running from `len + 1` down to 2
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        rest => 11 - rest,
    }
}

/// Strategy for checksum-valid, non-repeated CPF strings
pub fn valid_cpf_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(0u32..10, 9)
        .prop_filter("repeated digits", |d| d.iter().any(|x| *x != d[0]))
        .prop_map(|mut digits| {
            let first = cpf_check_digit(&digits);
            digits.push(first);
            let second = cpf_check_digit(&digits);
            digits.push(second);
            digits.iter().map(|d| char::from_digit(*d, 10).unwrap_or('0')).collect()
        })
}

/// Strategy for parsed CPFs
pub fn tax_id_strategy() -> impl Strategy<Value = TaxId> {
    valid_cpf_strategy().prop_filter_map("checksum", |text| TaxId::parse(&text).ok())
}

/// Strategy for BRL literals with grouped thousands and optional `R$` prefix
pub fn brl_literal_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("R$"), Just("R$ ")],
        1u32..1000,
        prop::collection::vec(0u32..1000, 0..3),
        0u32..100,
    )
        .prop_map(|(prefix, head, groups, cents)| {
            let mut text = format!("{}{}", prefix, head);
            for group in groups {
                text.push_str(&format!(".{:03}", group));
            }
            text.push_str(&format!(",{:02}", cents));
            text
        })
}

/// Strategy for valid `MM/YYYY` reference months
pub fn month_reference_strategy() -> impl Strategy<Value = String> {
    (1u32..=12, 1900u32..2100).prop_map(|(month, year)| format!("{:02}/{}", month, year))
}
