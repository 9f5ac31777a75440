//! Customer aggregate

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, TaxId};
use serde::{Deserialize, Serialize};

use crate::error::CustomerError;

/// A registered customer, keyed for billing purposes by CPF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub tax_id: TaxId,
    pub name: String,
    /// Two-letter state code (UF), when known
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Registers a new customer from a raw CPF string
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::InvalidTaxId` if the CPF fails validation and
    /// `CustomerError::BlankName` if the name is empty after trimming.
    pub fn new(tax_id: &str, name: impl Into<String>) -> Result<Self, CustomerError> {
        let tax_id = TaxId::parse(tax_id)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CustomerError::BlankName);
        }

        Ok(Self {
            id: CustomerId::new_v7(),
            tax_id,
            name: name.trim().to_string(),
            state: None,
            created_at: Utc::now(),
        })
    }

    /// Sets the state of residence
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into().to_uppercase());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer() {
        let customer = Customer::new("11144477735", "  João Silva ").unwrap();
        assert_eq!(customer.tax_id.as_str(), "11144477735");
        assert_eq!(customer.name, "João Silva");
        assert!(customer.state.is_none());
    }

    #[test]
    fn test_rejects_invalid_tax_id() {
        let result = Customer::new("12345678900", "Someone");
        assert!(matches!(result, Err(CustomerError::InvalidTaxId(_))));
    }

    #[test]
    fn test_rejects_blank_name() {
        let result = Customer::new("11144477735", "   ");
        assert!(matches!(result, Err(CustomerError::BlankName)));
    }

    #[test]
    fn test_with_state() {
        let customer = Customer::new("11144477735", "João").unwrap().with_state("sp");
        assert_eq!(customer.state.as_deref(), Some("SP"));
    }
}
