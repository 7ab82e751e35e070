use actix_web::web;

use crate::middleware::error_handler::{json_error_handler, path_error_handler, query_error_handler};

pub mod credits;
pub mod customers;
pub mod health;

/// Register every route plus the extractor configuration that turns malformed
/// bodies, query strings and path segments into validation errors.
///
/// Callers provide `web::Data<Arc<CustomerService>>` and
/// `web::Data<Arc<CreditService>>` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(health::controllers::configure)
        .configure(customers::controllers::configure)
        .configure(credits::controllers::configure);
}
