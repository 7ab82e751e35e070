// Customer model, registration/update payloads and the customer view
//
// A customer is identified by a store-generated id and is unique on both
// cpf and email. Only name, income and address may change after
// registration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::validation::{self, FieldErrors, INVALID_CPF, INVALID_EMAIL};
use crate::core::Result;

/// Postal address embedded in a customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub zip_code: String,
    pub street: String,
}

/// A registered customer
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    /// Argon2 PHC string, never the submitted password
    pub password_hash: String,
    pub income: Decimal,
    pub address: Address,
}

impl Customer {
    /// Overwrite the mutable fields from a patch
    pub fn apply(&mut self, patch: CustomerPatch) {
        self.first_name = patch.first_name;
        self.last_name = patch.last_name;
        self.income = patch.income;
        self.address = patch.address;
    }
}

/// A customer that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    /// Plain text as submitted; `CustomerService::save` hashes it before the
    /// store sees it
    pub password: String,
    pub income: Decimal,
    pub address: Address,
}

/// Fields a customer may change after registration
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerPatch {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub address: Address,
}

/// Request body for POST /api/customers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub street: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub income: Option<Decimal>,
}

impl CustomerRequest {
    /// Validate every field and build the registration
    pub fn into_new_customer(self) -> Result<NewCustomer> {
        let mut errors = FieldErrors::new();
        errors.not_blank("firstName", &self.first_name);
        errors.not_blank("lastName", &self.last_name);
        let cpf = validation::canonical_cpf(&self.cpf);
        errors.check("cpf", cpf.is_some(), INVALID_CPF);
        errors.check("email", validation::is_valid_email(&self.email), INVALID_EMAIL);
        errors.not_blank("password", &self.password);
        errors.not_blank("zipCode", &self.zip_code);
        errors.not_blank("street", &self.street);
        let income = errors.required("income", self.income);
        if let Some(income) = income {
            errors.amount("income", income);
        }

        let (Some(cpf), Some(income), true) = (cpf, income, errors.is_empty()) else {
            return Err(errors.into_error());
        };

        Ok(NewCustomer {
            first_name: self.first_name,
            last_name: self.last_name,
            cpf,
            email: self.email,
            password: self.password,
            income,
            address: Address {
                zip_code: self.zip_code,
                street: self.street,
            },
        })
    }
}

/// Request body for PATCH /api/customers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub income: Option<Decimal>,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub street: String,
}

impl CustomerUpdateRequest {
    pub fn into_patch(self) -> Result<CustomerPatch> {
        let mut errors = FieldErrors::new();
        errors.not_blank("firstName", &self.first_name);
        errors.not_blank("lastName", &self.last_name);
        let income = errors.required("income", self.income);
        if let Some(income) = income {
            errors.amount("income", income);
        }
        errors.not_blank("zipCode", &self.zip_code);
        errors.not_blank("street", &self.street);

        let (Some(income), true) = (income, errors.is_empty()) else {
            return Err(errors.into_error());
        };

        Ok(CustomerPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            income,
            address: Address {
                zip_code: self.zip_code,
                street: self.street,
            },
        })
    }
}

/// Customer as returned by the API; the password hash is never exposed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            email: customer.email,
            income: customer.income,
            zip_code: customer.address.zip_code,
            street: customer.address.street,
        }
    }
}
