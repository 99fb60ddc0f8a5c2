use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use estate_guard::policies::address::{
    listing_router, CollaborationLookup, ListingCatalog, ListingDisclosureService,
};
use estate_guard::policies::password_history::{
    password_router, CredentialHasher, CredentialRepository, PasswordRotationService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_policy_routes<R, H, C, L>(
    password_service: Arc<PasswordRotationService<R, H>>,
    listing_service: Arc<ListingDisclosureService<C, L>>,
) -> axum::Router
where
    R: CredentialRepository + 'static,
    H: CredentialHasher + 'static,
    C: ListingCatalog + 'static,
    L: CollaborationLookup + 'static,
{
    password_router(password_service)
        .merge(listing_router(listing_service))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
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
