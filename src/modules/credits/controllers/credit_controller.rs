use std::sync::Arc;

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::core::error::AppError;
use crate::modules::credits::models::{CreditRequest, CreditSummaryView, CreditView};
use crate::modules::credits::services::CreditService;
use crate::modules::customers::controllers::CustomerIdQuery;

/// Create a credit
/// POST /api/credits
pub async fn save_credit(
    service: web::Data<Arc<CreditService>>,
    request: web::Json<CreditRequest>,
) -> Result<HttpResponse, AppError> {
    let credit = request.into_inner().into_new_credit(CreditService::today())?;
    let details = service.save(credit).await?;

    Ok(HttpResponse::Created().json(CreditView::from(details)))
}

/// List a customer's credits
/// GET /api/credits?customerId={id}
pub async fn list_credits(
    service: web::Data<Arc<CreditService>>,
    query: web::Query<CustomerIdQuery>,
) -> Result<HttpResponse, AppError> {
    let credits: Vec<CreditSummaryView> = service
        .find_all_by_customer(query.customer_id)
        .await?
        .into_iter()
        .map(CreditSummaryView::from)
        .collect();

    Ok(HttpResponse::Ok().json(credits))
}

/// GET /api/credits/{creditCode}?customerId={id}
pub async fn get_credit(
    service: web::Data<Arc<CreditService>>,
    path: web::Path<Uuid>,
    query: web::Query<CustomerIdQuery>,
) -> Result<HttpResponse, AppError> {
    let details = service
        .find_by_credit_code(query.customer_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(CreditView::from(details)))
}

/// Configure credit routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/credits")
            .route("", web::post().to(save_credit))
            .route("", web::get().to(list_credits))
            .route("/{credit_code}", web::get().to(get_credit)),
    );
}
