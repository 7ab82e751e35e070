//! Field-level request validation
//!
//! Request DTOs run their checks through [`FieldErrors`], which collects every
//! failing field so a client sees all problems in one response.

use rust_decimal::Decimal;

use super::error::{AppError, FieldError};

pub const NOT_BLANK: &str = "must not be blank";
pub const NOT_NULL: &str = "must not be null";
pub const INVALID_CPF: &str = "invalid Brazilian individual taxpayer registry number (CPF)";
pub const INVALID_EMAIL: &str = "must be a well-formed email address";
pub const INVALID_AMOUNT: &str = "must have at most 2 decimal places and be below 1000000000000000";

/// Largest monetary amount (exclusive) accepted from requests; the
/// `DECIMAL(19, 2)` columns hold up to 17 integer digits
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Accumulator for field constraint violations
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn not_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, NOT_BLANK);
        }
    }

    /// Record a violation when `value` is missing; hands the value back otherwise
    pub fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, NOT_NULL);
        }
        value
    }

    pub fn check(&mut self, field: &str, valid: bool, message: &str) {
        if !valid {
            self.push(field, message);
        }
    }

    /// Monetary amounts must fit the store: two decimal places at most and
    /// below [`MAX_AMOUNT`]
    pub fn amount(&mut self, field: &str, value: Decimal) {
        let fits = value.normalize().scale() <= 2 && value.abs() < MAX_AMOUNT;
        self.check(field, fits, INVALID_AMOUNT);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_error(self) -> AppError {
        AppError::Validation(self.errors)
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

/// Compute the two CPF check digits for a nine-digit base
pub fn cpf_check_digits(base: &[u32; 9]) -> [u32; 2] {
    let digit = |digits: &[u32]| {
        let weight_start = digits.len() as u32 + 1;
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, d)| d * (weight_start - i as u32))
            .sum();
        match sum % 11 {
            0 | 1 => 0,
            rest => 11 - rest,
        }
    };

    let first = digit(base);
    let mut with_first = base.to_vec();
    with_first.push(first);
    [first, digit(&with_first)]
}

/// Validate a Brazilian CPF, either bare (`01742760520`) or punctuated
/// (`017.427.605-20`)
pub fn is_valid_cpf(cpf: &str) -> bool {
    canonical_cpf(cpf).is_some()
}

/// The bare 11-digit form of a valid CPF, `None` when it is invalid
///
/// Both accepted spellings of a CPF map to the same string, so this is the
/// form that is stored and compared for uniqueness.
pub fn canonical_cpf(cpf: &str) -> Option<String> {
    let digits = cpf_digits(cpf)?;

    // Repeated digits pass the checksum but are never issued
    if digits.iter().all(|d| *d == digits[0]) {
        return None;
    }

    let mut base = [0u32; 9];
    base.copy_from_slice(&digits[..9]);
    if cpf_check_digits(&base) != [digits[9], digits[10]] {
        return None;
    }

    digits
        .iter()
        .map(|d| char::from_digit(*d, 10))
        .collect()
}

fn cpf_digits(cpf: &str) -> Option<Vec<u32>> {
    let cpf = cpf.trim();
    let bare: String = if cpf.len() == 14 {
        let bytes = cpf.as_bytes();
        if bytes[3] != b'.' || bytes[7] != b'.' || bytes[11] != b'-' {
            return None;
        }
        cpf.chars().filter(|c| !matches!(c, '.' | '-')).collect()
    } else {
        cpf.to_string()
    };

    if bare.len() != 11 {
        return None;
    }
    bare.chars().map(|c| c.to_digit(10)).collect()
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
