use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// A single entry of the `details` list in an error body.
///
/// `field` is the camelCase request field the message refers to, or `None`
/// when the failure is not tied to a particular field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Request fields failing their constraints
    #[error("Validation error: {}", describe_fields(.0))]
    Validation(Vec<FieldError>),

    /// Domain rule violated
    #[error("{0}")]
    Business(String),

    /// Entity id absent from the store
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness or referential constraint rejected by the store
    #[error("{0}")]
    Conflict(String),

    /// Credit code resolved under a customer that does not own it
    #[error("{0}")]
    ConsistencyViolation(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| match &f.field {
            Some(field) => format!("{}: {}", field, f.message),
            None => f.message.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub exception: String,
    pub details: Vec<FieldError>,
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn business(msg: impl Into<String>) -> Self {
        AppError::Business(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn consistency(msg: impl Into<String>) -> Self {
        AppError::ConsistencyViolation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Map a failed write, turning unique and foreign key violations into
    /// `Conflict` with the given message
    pub fn from_write(err: sqlx::Error, conflict_message: impl Into<String>) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                tracing::warn!("Constraint violation: {}", db_err.message());
                return AppError::Conflict(conflict_message.into());
            }
        }
        AppError::Database(err)
    }

    /// Name reported in the `exception` field of the error body
    pub fn exception_name(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::Business(_) => "BusinessError",
            AppError::NotFound(_) => "NotFoundError",
            AppError::Conflict(_) => "IntegrityError",
            AppError::ConsistencyViolation(_) => "ConsistencyViolation",
            AppError::Database(_) => "DatabaseError",
            AppError::Configuration(_) => "ConfigurationError",
            AppError::Internal(_) => "InternalError",
        }
    }

    fn title(status: StatusCode) -> &'static str {
        if status == StatusCode::CONFLICT {
            "Conflict! Consult the documentation"
        } else if status.is_server_error() {
            "Internal Server Error! Contact the administrator"
        } else {
            "Bad Request! Consult the documentation"
        }
    }

    fn details(&self) -> Vec<FieldError> {
        match self {
            AppError::Validation(fields) => fields.clone(),
            AppError::Business(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ConsistencyViolation(msg) => vec![FieldError::general(msg.clone())],
            // Store and configuration failures are logged, not echoed to clients
            AppError::Database(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                vec![FieldError::general("Unexpected server error")]
            }
        }
    }

    /// Build the structured body for this error
    pub fn to_body(&self) -> ErrorBody {
        let status = self.status_code();
        ErrorBody {
            title: Self::title(status).to_string(),
            timestamp: Utc::now(),
            status: status.as_u16(),
            exception: self.exception_name().to_string(),
            details: self.details(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(exception = self.exception_name(), "Request failed: {}", self);
        } else {
            tracing::debug!(exception = self.exception_name(), "Request rejected: {}", self);
        }

        HttpResponse::build(status_code).json(self.to_body())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Business(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ConsistencyViolation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
