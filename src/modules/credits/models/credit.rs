// Credit model, creation payload and views
//
// A credit belongs to exactly one customer through `customer_id`. Its code is
// a random UUID assigned on creation and never changes afterwards.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::validation::FieldErrors;
use crate::core::{AppError, Result};
use crate::modules::customers::models::Customer;

pub const MIN_INSTALLMENTS: i32 = 1;
pub const MAX_INSTALLMENTS: i32 = 48;

/// Credit status lifecycle
///
/// Every credit starts `InProgress`; the terminal states are set outside
/// this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    #[default]
    InProgress,
    Approved,
    Reject,
}

impl std::fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditStatus::InProgress => write!(f, "IN_PROGRESS"),
            CreditStatus::Approved => write!(f, "APPROVED"),
            CreditStatus::Reject => write!(f, "REJECT"),
        }
    }
}

impl std::str::FromStr for CreditStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(CreditStatus::InProgress),
            "APPROVED" => Ok(CreditStatus::Approved),
            "REJECT" => Ok(CreditStatus::Reject),
            _ => Err(format!("Invalid credit status: {}", s)),
        }
    }
}

/// A stored credit
#[derive(Debug, Clone, PartialEq)]
pub struct Credit {
    pub id: i64,
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub customer_id: i64,
}

/// A credit that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewCredit {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub customer_id: i64,
}

impl NewCredit {
    /// Build an `InProgress` credit with a fresh credit code
    pub fn new(
        credit_value: Decimal,
        day_first_installment: NaiveDate,
        number_of_installments: i32,
        customer_id: i64,
    ) -> Self {
        Self {
            credit_code: Uuid::new_v4(),
            credit_value,
            day_first_installment,
            number_of_installments,
            status: CreditStatus::InProgress,
            customer_id,
        }
    }
}

/// Reject a first installment later than one calendar month after `today`
///
/// Month arithmetic clamps to the end of shorter months, so from Jan 31 the
/// latest accepted day is Feb 28 (or 29).
pub fn ensure_first_installment_within_limit(
    day_first_installment: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let limit = today
        .checked_add_months(Months::new(1))
        .ok_or_else(|| AppError::business("Invalid Date"))?;

    if day_first_installment > limit {
        return Err(AppError::business("Invalid Date"));
    }

    Ok(())
}

/// A credit together with the customer that owns it
#[derive(Debug, Clone, PartialEq)]
pub struct CreditDetails {
    pub credit: Credit,
    pub customer: Customer,
}

/// Request body for POST /api/credits
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub credit_value: Option<Decimal>,
    #[serde(default)]
    pub day_first_of_installment: Option<NaiveDate>,
    #[serde(default)]
    pub number_of_installments: Option<i32>,
    #[serde(default)]
    pub customer_id: Option<i64>,
}

impl CreditRequest {
    /// Validate every field against `today` and build the credit
    pub fn into_new_credit(self, today: NaiveDate) -> Result<NewCredit> {
        let mut errors = FieldErrors::new();

        let credit_value = errors.required("creditValue", self.credit_value);
        if let Some(value) = credit_value {
            errors.check("creditValue", value > Decimal::ZERO, "must be greater than 0");
            errors.amount("creditValue", value);
        }

        let day_first_installment =
            errors.required("dayFirstOfInstallment", self.day_first_of_installment);
        if let Some(day) = day_first_installment {
            errors.check("dayFirstOfInstallment", day > today, "must be a future date");
        }

        let number_of_installments =
            errors.required("numberOfInstallments", self.number_of_installments);
        if let Some(n) = number_of_installments {
            errors.check(
                "numberOfInstallments",
                (MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&n),
                "must be between 1 and 48",
            );
        }

        let customer_id = errors.required("customerId", self.customer_id);

        let (Some(credit_value), Some(day), Some(n), Some(customer_id), true) = (
            credit_value,
            day_first_installment,
            number_of_installments,
            customer_id,
            errors.is_empty(),
        ) else {
            return Err(errors.into_error());
        };

        Ok(NewCredit::new(credit_value, day, n, customer_id))
    }
}

/// Entry of GET /api/credits?customerId=
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummaryView {
    pub credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_value: Decimal,
    pub number_of_installments: i32,
}

impl From<Credit> for CreditSummaryView {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}

/// Full credit view including the owner's contact and income
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_value: Decimal,
    pub number_of_installment: i32,
    pub status: CreditStatus,
    pub email_customer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income_customer: Decimal,
}

impl From<CreditDetails> for CreditView {
    fn from(details: CreditDetails) -> Self {
        Self {
            credit_code: details.credit.credit_code,
            credit_value: details.credit.credit_value,
            number_of_installment: details.credit.number_of_installments,
            status: details.credit.status,
            email_customer: details.customer.email,
            income_customer: details.customer.income,
        }
    }
}
