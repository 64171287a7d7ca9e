use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;
use talapker::intake::{contact_router, ContactRepository, ContactService};
use talapker::psychometrics::{
    content_admin_router, psychometric_router, PsychometricService, ResultRepository,
};

/// Public quiz and contact routes plus probes. The content reload endpoint is operator-only
/// and is mounted only when `reload_route` is set.
pub(crate) fn build_router<R, C>(
    quiz: Arc<PsychometricService<R>>,
    contact: Arc<ContactService<C>>,
    reload_route: bool,
) -> Router
where
    R: ResultRepository + 'static,
    C: ContactRepository + 'static,
{
    let mut router = psychometric_router(quiz.clone()).merge(contact_router(contact));
    if reload_route {
        router = router.merge(content_admin_router(quiz));
    }

    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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
