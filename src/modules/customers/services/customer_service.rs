use std::sync::Arc;

use crate::core::password::hash_password;
use crate::core::{AppError, Result};
use crate::modules::customers::models::{Customer, CustomerPatch, NewCustomer};
use crate::modules::customers::repositories::CustomerRepository;

/// Service for customer registration and maintenance
pub struct CustomerService {
    customer_repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customer_repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customer_repo }
    }

    /// Register a new customer
    ///
    /// The password is replaced by its Argon2 hash before storage. Duplicate
    /// cpf or email is rejected by the store as `AppError::Conflict`.
    pub async fn save(&self, customer: NewCustomer) -> Result<Customer> {
        let password = hash_password(&customer.password)?;
        let customer = NewCustomer {
            password,
            ..customer
        };

        let created = self.customer_repo.create(&customer).await?;
        tracing::info!(customer_id = created.id, "Customer registered");

        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Customer> {
        self.customer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Id {} not found", id)))
    }

    /// Overwrite name, income and address of an existing customer
    pub async fn update(&self, id: i64, patch: CustomerPatch) -> Result<Customer> {
        let mut customer = self.find_by_id(id).await?;
        customer.apply(patch);

        let updated = self.customer_repo.update(&customer).await?;
        tracing::info!(customer_id = id, "Customer updated");

        Ok(updated)
    }

    /// Delete a customer together with all of their credits
    pub async fn delete(&self, id: i64) -> Result<()> {
        let customer = self.find_by_id(id).await?;
        self.customer_repo.delete(customer.id).await?;
        tracing::info!(customer_id = id, "Customer deleted");

        Ok(())
    }
}
