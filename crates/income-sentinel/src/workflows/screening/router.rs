use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::TaxpayerDeclaration;
use super::service::ScreeningService;
use super::tax::{slab_of, tax_on, TaxSlab};
use super::ScreeningError;

/// Router builder exposing screening and tax endpoints.
pub fn screening_router(service: Arc<ScreeningService>) -> Router {
    Router::new()
        .route("/api/v1/screenings", post(screen_handler))
        .route("/api/v1/tax/liability", post(tax_liability_handler))
        .with_state(service)
}

pub(crate) async fn screen_handler(
    State(service): State<Arc<ScreeningService>>,
    Json(declaration): Json<TaxpayerDeclaration>,
) -> Response {
    match service.screen(declaration) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(&error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaxLiabilityRequest {
    income: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct TaxLiabilityResponse {
    income: f64,
    slab: TaxSlab,
    tax_due: f64,
}

pub(crate) async fn tax_liability_handler(Json(request): Json<TaxLiabilityRequest>) -> Response {
    let income = request.income;
    if !income.is_finite() || income < 0.0 {
        let payload = json!({
            "error": format!("income must be a finite non-negative amount (found {income})"),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let response = TaxLiabilityResponse {
        income,
        slab: slab_of(income),
        tax_due: tax_on(income),
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn error_response(error: &ScreeningError) -> Response {
    let status = if error.is_caller_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
