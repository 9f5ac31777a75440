//! Tests for BRL amounts
//!
//! Cover literal shape acceptance, parsing into decimals, the pt-BR
//! rendering used for storage and the serde representation.

use core_kernel::{BrlAmount, MoneyError};
use proptest::prelude::*;
use rust_decimal_macros::dec;

mod literal_shape {
    use super::*;

    #[test]
    fn test_accepts_symbol_with_and_without_space() {
        assert!(BrlAmount::is_valid_literal("R$150,00"));
        assert!(BrlAmount::is_valid_literal("R$ 150,00"));
        assert!(BrlAmount::is_valid_literal("R$ 1.234,56"));
    }

    #[test]
    fn test_accepts_bare_amounts() {
        assert!(BrlAmount::is_valid_literal("0,00"));
        assert!(BrlAmount::is_valid_literal("150,00"));
        assert!(BrlAmount::is_valid_literal("12.345.678,90"));
    }

    #[test]
    fn test_rejects_wrong_fraction_length() {
        assert!(!BrlAmount::is_valid_literal("150,0"));
        assert!(!BrlAmount::is_valid_literal("150,000"));
        assert!(!BrlAmount::is_valid_literal("150"));
    }

    #[test]
    fn test_rejects_misplaced_separators() {
        assert!(!BrlAmount::is_valid_literal("1234,56"));
        assert!(!BrlAmount::is_valid_literal("1.23,45"));
        assert!(!BrlAmount::is_valid_literal("150.00"));
        assert!(!BrlAmount::is_valid_literal("R$  150,00"));
        assert!(!BrlAmount::is_valid_literal("US$ 150,00"));
        assert!(!BrlAmount::is_valid_literal("-150,00"));
        assert!(!BrlAmount::is_valid_literal("150,00 "));
        assert!(!BrlAmount::is_valid_literal(""));
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        // Arabic-Indic and fullwidth digits
        assert!(!BrlAmount::is_valid_literal("١٥٠,٠٠"));
        assert!(!BrlAmount::is_valid_literal("R$ ١٥٠,٠٠"));
        assert!(!BrlAmount::is_valid_literal("１５０,００"));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_strips_symbol() {
        let amount = BrlAmount::parse("R$150,00").unwrap();
        assert_eq!(amount.amount(), dec!(150.00));
        assert_eq!(amount.to_string(), "150,00");
    }

    #[test]
    fn test_parse_thousands() {
        let amount = BrlAmount::parse("R$ 1.234.567,89").unwrap();
        assert_eq!(amount.amount(), dec!(1234567.89));
    }

    #[test]
    fn test_parse_keeps_two_fractional_digits() {
        let amount = BrlAmount::parse("10,50").unwrap();
        assert_eq!(amount.amount().scale(), 2);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            BrlAmount::parse("abc"),
            Err(MoneyError::Malformed(_))
        ));
    }

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        let amount = BrlAmount::from_decimal(dec!(10.005)).unwrap();
        assert_eq!(amount.amount().scale(), 2);
        assert_eq!(amount.to_string(), "10,00");
    }

    #[test]
    fn test_parse_at_storage_bound() {
        let max = BrlAmount::parse("R$ 999.999.999.999,99").unwrap();
        assert_eq!(max, BrlAmount::maximum());
        assert_eq!(max.amount(), dec!(999999999999.99));
    }

    #[test]
    fn test_parse_above_storage_bound() {
        assert!(matches!(
            BrlAmount::parse("R$ 1.000.000.000.000,00"),
            Err(MoneyError::TooLarge { .. })
        ));
        assert!(matches!(
            BrlAmount::from_decimal(dec!(1000000000000)),
            Err(MoneyError::TooLarge { .. })
        ));
    }
}

proptest! {
    #[test]
    fn grouped_literals_are_accepted(
        head in 1u32..1000u32,
        groups in proptest::collection::vec(0u32..1000u32, 0..4),
        cents in 0u32..100u32,
        symbol in prop_oneof![Just(""), Just("R$"), Just("R$ ")],
    ) {
        let mut literal = format!("{}{}", symbol, head);
        for group in &groups {
            literal.push_str(&format!(".{:03}", group));
        }
        literal.push_str(&format!(",{:02}", cents));

        prop_assert!(BrlAmount::is_valid_literal(&literal));
        prop_assert!(BrlAmount::parse(&literal).is_ok());
    }

    #[test]
    fn one_or_three_fraction_digits_are_rejected(
        head in 0u32..1000u32,
        fraction in prop_oneof![
            (0u32..10u32).prop_map(|d| format!("{}", d)),
            (0u32..1000u32).prop_map(|d| format!("{:03}", d)),
        ],
    ) {
        let bare = format!("{},{}", head, fraction);
        let prefixed = format!("R$ {}", bare);
        prop_assert!(!BrlAmount::is_valid_literal(&bare));
        prop_assert!(!BrlAmount::is_valid_literal(&prefixed));
    }
}
