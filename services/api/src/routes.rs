use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use income_sentinel::workflows::screening::{screening_router, ScreeningService};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) fn with_screening_routes(service: Arc<ScreeningService>) -> axum::Router {
    screening_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/model/reload",
            axum::routing::post(model_reload_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let listening = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let model_loaded = state.model.is_loaded();

    let (status, payload) = match (listening, model_loaded) {
        (true, true) => (
            StatusCode::OK,
            json!({ "status": "ready", "model": state.model.model_name() }),
        ),
        (true, false) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "status": "model_unavailable" }),
        ),
        (false, _) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "status": "initializing" }),
        ),
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn model_reload_endpoint(Extension(state): Extension<AppState>) -> Response {
    let Some(path) = state.model_path.clone() else {
        let payload = json!({ "error": "no model artifact path configured" });
        return (StatusCode::CONFLICT, Json(payload)).into_response();
    };

    match state.model.reload(&path) {
        Ok(()) => {
            info!(path = %path.display(), "income model reloaded");
            let payload = json!({
                "status": "reloaded",
                "model": state.model.model_name(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => {
            warn!(error = %err, path = %path.display(), "income model reload failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
