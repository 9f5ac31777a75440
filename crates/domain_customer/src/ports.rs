//! Customer Port Definition
//!
//! The billing domain only needs a read side of the registry: resolve a CPF
//! to a customer, or learn that nobody with that CPF is registered.

use async_trait::async_trait;
use core_kernel::{DomainPort, HealthCheckable, PortError, TaxId};

use crate::customer::Customer;

/// Port for customer registry lookups
///
/// Implementations:
/// - `PostgresCustomerAdapter` (infra_db): reads the `customers` table
/// - `MockCustomerPort`: in-memory registry for tests
#[async_trait]
pub trait CustomerPort: DomainPort + HealthCheckable {
    /// Finds a customer by CPF
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no customer holds the CPF; `Err` only when the registry
    /// itself could not be consulted.
    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<Customer>, PortError>;
}

/// In-memory customer registry for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[derive(Debug, Default)]
    pub struct MockCustomerPort {
        customers: Arc<RwLock<HashMap<TaxId, Customer>>>,
        unavailable: AtomicBool,
    }

    impl MockCustomerPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the registry
        pub async fn with_customers(customers: Vec<Customer>) -> Self {
            let port = Self::new();
            {
                let mut store = port.customers.write().await;
                for customer in customers {
                    store.insert(customer.tax_id.clone(), customer);
                }
            }
            port
        }

        /// Makes every subsequent lookup fail as if the registry were down
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::unavailable("customer-registry"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockCustomerPort {}

    #[async_trait]
    impl HealthCheckable for MockCustomerPort {
        async fn health_check(&self) -> HealthCheckResult {
            let mut result = HealthCheckResult::healthy("mock-customer-port");
            if self.unavailable.load(Ordering::SeqCst) {
                result.status = AdapterHealth::Unhealthy;
                result.message = Some("Registry switched off".to_string());
            }
            result
        }
    }

    #[async_trait]
    impl CustomerPort for MockCustomerPort {
        async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<Customer>, PortError> {
            self.check_available()?;
            Ok(self.customers.read().await.get(tax_id).cloned())
        }
    }
}
