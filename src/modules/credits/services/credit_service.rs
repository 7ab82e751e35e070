use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::credits::models::{
    ensure_first_installment_within_limit, Credit, CreditDetails, NewCredit,
};
use crate::modules::credits::repositories::CreditRepository;
use crate::modules::customers::services::CustomerService;

/// Service for credit creation and lookup
pub struct CreditService {
    credit_repo: Arc<dyn CreditRepository>,
    customer_service: Arc<CustomerService>,
}

impl CreditService {
    pub fn new(
        credit_repo: Arc<dyn CreditRepository>,
        customer_service: Arc<CustomerService>,
    ) -> Self {
        Self {
            credit_repo,
            customer_service,
        }
    }

    /// Today's date as seen by the installment rule
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Create a credit for an existing customer
    ///
    /// Fails with `Business("Invalid Date")` when the first installment is
    /// more than one month away, and with `NotFound` when the customer does
    /// not exist. Nothing is stored in either case.
    pub async fn save(&self, credit: NewCredit) -> Result<CreditDetails> {
        if let Err(err) =
            ensure_first_installment_within_limit(credit.day_first_installment, Self::today())
        {
            tracing::warn!(
                customer_id = credit.customer_id,
                day_first_installment = %credit.day_first_installment,
                "Credit rejected: first installment too far ahead"
            );
            return Err(err);
        }

        let customer = self.customer_service.find_by_id(credit.customer_id).await?;
        let credit = self.credit_repo.create(&credit).await?;

        tracing::info!(
            credit_code = %credit.credit_code,
            customer_id = customer.id,
            "Credit created"
        );

        Ok(CreditDetails { credit, customer })
    }

    /// All credits of a customer; empty when there are none
    pub async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>> {
        self.credit_repo.find_all_by_customer(customer_id).await
    }

    /// Look up a credit by code on behalf of `customer_id`
    ///
    /// A code that exists but belongs to someone else is a
    /// `ConsistencyViolation`, not a missing credit.
    pub async fn find_by_credit_code(
        &self,
        customer_id: i64,
        credit_code: Uuid,
    ) -> Result<CreditDetails> {
        let credit = self
            .credit_repo
            .find_by_credit_code(credit_code)
            .await?
            .ok_or_else(|| AppError::business(format!("Creditcode {} not found", credit_code)))?;

        if credit.customer_id != customer_id {
            tracing::warn!(
                credit_code = %credit_code,
                requested_customer_id = customer_id,
                "Credit code requested under a customer that does not own it"
            );
            return Err(AppError::consistency("Contact admin"));
        }

        let customer = self.customer_service.find_by_id(credit.customer_id).await?;

        Ok(CreditDetails { credit, customer })
    }
}
