use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::QuizSubmission;
use super::repository::{RepositoryError, ResultId, ResultRepository};
use super::scoring::SubmissionError;
use super::service::{PsychometricService, PsychometricServiceError};

/// `?locale=` or the legacy `?lang=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
    pub lang: Option<String>,
}

impl LocaleQuery {
    fn tag(&self) -> Option<&str> {
        self.locale.as_deref().or(self.lang.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_ref: String,
}

/// Router builder exposing the quiz endpoints.
pub fn psychometric_router<R>(service: Arc<PsychometricService<R>>) -> Router
where
    R: ResultRepository + 'static,
{
    Router::new()
        .route("/api/v1/test/questions", get(questions_handler::<R>))
        .route("/api/v1/test/submit", post(submit_handler::<R>))
        .route("/api/v1/test/results", get(user_results_handler::<R>))
        .route(
            "/api/v1/test/results/:result_id",
            get(result_handler::<R>),
        )
        .route(
            "/api/v1/test/types/:type_code",
            get(recommendation_handler::<R>),
        )
        .with_state(service)
}

/// Operator endpoint that re-reads content. Kept off the public router; the binary mounts
/// it only when configured to.
pub fn content_admin_router<R>(service: Arc<PsychometricService<R>>) -> Router
where
    R: ResultRepository + 'static,
{
    Router::new()
        .route("/api/v1/test/content/reload", post(reload_handler::<R>))
        .with_state(service)
}

pub(crate) async fn questions_handler<R>(
    State(service): State<Arc<PsychometricService<R>>>,
    Query(query): Query<LocaleQuery>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let view = service.questions(query.tag());
    (
        StatusCode::OK,
        [(header::CONTENT_LANGUAGE, view.locale.as_str())],
        Json(view.questions),
    )
        .into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<PsychometricService<R>>>,
    payload: Result<Json<QuizSubmission>, JsonRejection>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            let error = SubmissionError::Malformed(rejection.body_text());
            tracing::warn!(%error, "rejected quiz submission");
            return error_response(StatusCode::BAD_REQUEST, error.to_string());
        }
    };

    match service.submit(submission) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(PsychometricServiceError::InvalidSubmission(error)) => {
            error_response(StatusCode::BAD_REQUEST, error.to_string())
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn result_handler<R>(
    State(service): State<Arc<PsychometricService<R>>>,
    Path(result_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
{
    match service.get(&ResultId(result_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(PsychometricServiceError::Repository(RepositoryError::NotFound)) => {
            error_response(StatusCode::NOT_FOUND, "result not found".to_string())
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn user_results_handler<R>(
    State(service): State<Arc<PsychometricService<R>>>,
    Query(query): Query<UserQuery>,
) -> Response
where
    R: ResultRepository + 'static,
{
    match service.for_user(&query.user_ref) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn recommendation_handler<R>(
    State(service): State<Arc<PsychometricService<R>>>,
    Path(type_code): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let bundle = service.recommendation(&type_code, query.tag());
    (StatusCode::OK, Json(bundle)).into_response()
}

pub(crate) async fn reload_handler<R>(State(service): State<Arc<PsychometricService<R>>>) -> Response
where
    R: ResultRepository + 'static,
{
    match service.reload() {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => {
            tracing::error!(%error, "content reload failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "content reload failed".to_string(),
            )
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
