// Customer store
//
// Customers are keyed by an auto-increment id and unique on cpf and email.
// Uniqueness is enforced by the table's unique keys; violations surface as
// `AppError::Conflict`. Deleting a customer cascades to its credits through
// the `credits.customer_id` foreign key.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Address, Customer, NewCustomer};

/// Persistence operations for customers
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a customer, returning it with its generated id
    async fn create(&self, customer: &NewCustomer) -> Result<Customer>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>>;

    /// Persist the mutable fields of an existing customer
    async fn update(&self, customer: &Customer) -> Result<Customer>;

    /// Delete a customer and, through the store, all of its credits
    async fn delete(&self, id: i64) -> Result<()>;
}

pub const DUPLICATE_CUSTOMER: &str = "Customer already registered with this cpf or email";

/// MySQL-backed customer store
#[derive(Clone)]
pub struct MySqlCustomerRepository {
    pool: MySqlPool,
}

impl MySqlCustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    cpf: String,
    email: String,
    password: String,
    income: Decimal,
    zip_code: String,
    street: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            cpf: row.cpf,
            email: row.email,
            password_hash: row.password,
            income: row.income,
            address: Address {
                zip_code: row.zip_code,
                street: row.street,
            },
        }
    }
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn create(&self, customer: &NewCustomer) -> Result<Customer> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (
                first_name, last_name, cpf, email, password, income, zip_code, street
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.cpf)
        .bind(&customer.email)
        .bind(&customer.password)
        .bind(customer.income)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_CUSTOMER))?;

        Ok(Customer {
            id: result.last_insert_id() as i64,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            cpf: customer.cpf.clone(),
            email: customer.email.clone(),
            password_hash: customer.password.clone(),
            income: customer.income,
            address: customer.address.clone(),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, cpf, email, password, income, zip_code, street
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn update(&self, customer: &Customer) -> Result<Customer> {
        sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?, last_name = ?, income = ?, zip_code = ?, street = ?
            WHERE id = ?
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.income)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .bind(customer.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_CUSTOMER))?;

        Ok(customer.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
