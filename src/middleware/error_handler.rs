use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    HttpRequest,
};

use crate::core::{AppError, FieldError};

/// Turn a rejected JSON body into a validation error response
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_error(req, &err);
    AppError::Validation(vec![FieldError::general(err.to_string())]).into()
}

/// Turn a malformed query string (e.g. missing `customerId`) into a validation error
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_error(req, &err);
    AppError::Validation(vec![FieldError::general(err.to_string())]).into()
}

/// Turn an unparsable path segment (e.g. a non-numeric id) into a validation error
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log_error(req, &err);
    AppError::Validation(vec![FieldError::general(err.to_string())]).into()
}

pub fn log_error(req: &HttpRequest, err: &dyn std::fmt::Display) {
    tracing::debug!(
        method = %req.method(),
        path = %req.path(),
        "Rejected request input: {}",
        err
    );
}
