// Credit store
//
// Credits are keyed by an auto-increment id and by a unique credit code
// (CHAR(36) hyphenated UUID). Each row carries the owning customer's id as a
// foreign key with ON DELETE CASCADE.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::credits::models::{Credit, CreditStatus, NewCredit};

/// Persistence operations for credits
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// Insert a credit, returning it with its generated id
    async fn create(&self, credit: &NewCredit) -> Result<Credit>;

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>>;

    /// All credits owned by a customer, in store order
    async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>>;
}

pub const CREDIT_CONFLICT: &str = "Credit code already in use or customer no longer exists";

/// MySQL-backed credit store
#[derive(Clone)]
pub struct MySqlCreditRepository {
    pool: MySqlPool,
}

impl MySqlCreditRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CreditRow {
    id: i64,
    credit_code: String,
    credit_value: Decimal,
    day_first_installment: NaiveDate,
    number_of_installments: i32,
    status: String,
    customer_id: i64,
}

impl TryFrom<CreditRow> for Credit {
    type Error = AppError;

    fn try_from(row: CreditRow) -> Result<Self> {
        let credit_code = Uuid::parse_str(&row.credit_code).map_err(|e| {
            AppError::internal(format!("Invalid credit code '{}': {}", row.credit_code, e))
        })?;
        let status = row
            .status
            .parse::<CreditStatus>()
            .map_err(AppError::Internal)?;

        Ok(Credit {
            id: row.id,
            credit_code,
            credit_value: row.credit_value,
            day_first_installment: row.day_first_installment,
            number_of_installments: row.number_of_installments,
            status,
            customer_id: row.customer_id,
        })
    }
}

#[async_trait]
impl CreditRepository for MySqlCreditRepository {
    async fn create(&self, credit: &NewCredit) -> Result<Credit> {
        let result = sqlx::query(
            r#"
            INSERT INTO credits (
                credit_code, credit_value, day_first_installment,
                number_of_installments, status, customer_id
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(credit.credit_code.hyphenated().to_string())
        .bind(credit.credit_value)
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments)
        .bind(credit.status.to_string())
        .bind(credit.customer_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, CREDIT_CONFLICT))?;

        Ok(Credit {
            id: result.last_insert_id() as i64,
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            day_first_installment: credit.day_first_installment,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            customer_id: credit.customer_id,
        })
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>> {
        let row = sqlx::query_as::<_, CreditRow>(
            r#"
            SELECT id, credit_code, credit_value, day_first_installment,
                   number_of_installments, status, customer_id
            FROM credits
            WHERE credit_code = ?
            "#,
        )
        .bind(credit_code.hyphenated().to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Credit::try_from).transpose()
    }

    async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>> {
        let rows = sqlx::query_as::<_, CreditRow>(
            r#"
            SELECT id, credit_code, credit_value, day_first_installment,
                   number_of_installments, status, customer_id
            FROM credits
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Credit::try_from).collect()
    }
}
