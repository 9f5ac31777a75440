//! Pre-built Test Fixtures

use chrono::NaiveDate;
use core_kernel::{BrlAmount, TaxId};
use domain_customer::Customer;

/// CPF fixtures
pub struct TaxIdFixtures;

impl TaxIdFixtures {
    /// The CPF used in the reference acceptance scenario
    pub const REGISTERED: &'static str = "50974463051";

    /// A second registered customer
    pub const REGISTERED_OTHER: &'static str = "52998224725";

    /// Checksum-valid but never registered
    pub const UNREGISTERED: &'static str = "11144477735";

    /// Fails the checksum
    pub const INVALID: &'static str = "12345678900";

    pub fn registered() -> TaxId {
        Self::parse(Self::REGISTERED)
    }

    pub fn registered_other() -> TaxId {
        Self::parse(Self::REGISTERED_OTHER)
    }

    pub fn unregistered() -> TaxId {
        Self::parse(Self::UNREGISTERED)
    }

    fn parse(text: &str) -> TaxId {
        TaxId::parse(text).unwrap_or_else(|e| panic!("fixture CPF {text} is invalid: {e}"))
    }
}

/// Amount fixtures
pub struct AmountFixtures;

impl AmountFixtures {
    pub const LITERAL: &'static str = "R$150,00";
    pub const GROUPED_LITERAL: &'static str = "R$ 1.234,56";

    pub fn one_fifty() -> BrlAmount {
        BrlAmount::from_cents(15_000)
    }

    pub fn grouped() -> BrlAmount {
        BrlAmount::from_cents(123_456)
    }
}

/// Date fixtures
pub struct DateFixtures;

impl DateFixtures {
    /// Due date sent in the reference scenario
    pub const SUBMITTED_DUE_DATE: &'static str = "24/08/2022";

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
    }
}

/// Customer fixtures
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// The customers every test registry starts with
    pub fn registered() -> Vec<Customer> {
        vec![
            Self::customer(TaxIdFixtures::REGISTERED, "Maria Souza"),
            Self::customer(TaxIdFixtures::REGISTERED_OTHER, "João Lima"),
        ]
    }

    pub fn customer(tax_id: &str, name: &str) -> Customer {
        Customer::new(tax_id, name)
            .unwrap_or_else(|e| panic!("fixture customer {tax_id} is invalid: {e}"))
            .with_state("SP")
    }
}
