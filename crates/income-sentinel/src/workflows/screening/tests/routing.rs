use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::screening::ModelHandle;

async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request");

    let response = router.oneshot(request).await.expect("router dispatch");
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload: Value = serde_json::from_slice(&body).expect("json");
    (status, payload)
}

#[tokio::test]
async fn post_screening_returns_report() {
    let router = router_with(fixed_model(738_000.0));
    let body = serde_json::to_value(declaration()).expect("serialize declaration");

    let (status, payload) = post_json(router, "/api/v1/screenings", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["verdict"]["tier"], json!("none"));
    assert_eq!(payload["verdict"]["color_hint"], json!("green"));
    assert_eq!(payload["reported_slab"], json!("10%"));
    assert_eq!(payload["occupation"], json!("Salaried"));
}

#[tokio::test]
async fn post_screening_rejects_unknown_occupation() {
    let router = router_with(fixed_model(738_000.0));
    let mut body = serde_json::to_value(declaration()).expect("serialize declaration");
    body["occupation"] = json!("Freelancer");

    let (status, payload) = post_json(router, "/api/v1/screenings", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(payload["error"]
        .as_str()
        .is_some_and(|error| error.contains("Freelancer")));
}

#[tokio::test]
async fn post_screening_without_model_is_unavailable() {
    let router = router_with(ModelHandle::empty());
    let body = serde_json::to_value(declaration()).expect("serialize declaration");

    let (status, _) = post_json(router, "/api/v1/screenings", body).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn post_tax_liability_returns_slab_and_tax() {
    let router = router_with(ModelHandle::empty());

    let (status, payload) =
        post_json(router, "/api/v1/tax/liability", json!({ "income": 500000.0 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["slab"], json!("5%"));
    assert_eq!(payload["tax_due"], json!(13000.0));
}

#[tokio::test]
async fn post_tax_liability_rejects_negative_income() {
    let router = router_with(ModelHandle::empty());

    let (status, _) =
        post_json(router, "/api/v1/tax/liability", json!({ "income": -1.0 })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
