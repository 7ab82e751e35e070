pub mod error;
pub mod password;
pub mod validation;

pub use error::{AppError, ErrorBody, FieldError, Result};
pub use validation::FieldErrors;
