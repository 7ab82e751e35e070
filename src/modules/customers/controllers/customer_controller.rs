use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::customers::models::{CustomerRequest, CustomerUpdateRequest, CustomerView};
use crate::modules::customers::services::CustomerService;

/// `?customerId=` query parameter shared by the customer and credit routes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdQuery {
    pub customer_id: i64,
}

/// Register a customer
/// POST /api/customers
pub async fn save_customer(
    service: web::Data<Arc<CustomerService>>,
    request: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let new_customer = request.into_inner().into_new_customer()?;
    let customer = service.save(new_customer).await?;

    Ok(HttpResponse::Created().json(CustomerView::from(customer)))
}

/// GET /api/customers/{id}
pub async fn get_customer(
    service: web::Data<Arc<CustomerService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer = service.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(CustomerView::from(customer)))
}

/// Update name, income and address
/// PATCH /api/customers?customerId={id}
pub async fn update_customer(
    service: web::Data<Arc<CustomerService>>,
    query: web::Query<CustomerIdQuery>,
    request: web::Json<CustomerUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let patch = request.into_inner().into_patch()?;
    let customer = service.update(query.customer_id, patch).await?;

    Ok(HttpResponse::Ok().json(CustomerView::from(customer)))
}

/// DELETE /api/customers/{id}
pub async fn delete_customer(
    service: web::Data<Arc<CustomerService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/customers")
            .route("", web::post().to(save_customer))
            .route("", web::patch().to(update_customer))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::delete().to(delete_customer)),
    );
}
