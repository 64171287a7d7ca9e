use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::domain::{thank_you, try_again_later, ContactSubmission};
use super::repository::ContactRepository;
use super::service::{ContactService, IntakeServiceError};

pub fn contact_router<C>(service: Arc<ContactService<C>>) -> Router
where
    C: ContactRepository + 'static,
{
    Router::new()
        .route("/api/v1/contact", post(contact_handler::<C>))
        .with_state(service)
}

pub(crate) async fn contact_handler<C>(
    State(service): State<Arc<ContactService<C>>>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Response
where
    C: ContactRepository + 'static,
{
    // An unreadable body is treated like an empty form.
    let submission = payload.map(|Json(form)| form).unwrap_or_default();
    let locale = service.locale_for(&submission);

    match service.submit(submission) {
        Ok(_) => {
            let payload = json!({ "status": "ok", "message": thank_you(locale) });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(IntakeServiceError::Invalid(error)) => {
            tracing::debug!(%error, "contact form rejected");
            let payload = json!({ "status": "error", "message": error.localized(locale) });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(IntakeServiceError::Repository(error)) => {
            tracing::error!(%error, "failed to store contact message");
            let payload = json!({ "status": "error", "message": try_again_later(locale) });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::intake::domain::ContactMessage;
    use crate::intake::repository::ContactRepositoryError;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct MemoryContacts {
        messages: Mutex<Vec<ContactMessage>>,
    }

    impl MemoryContacts {
        fn stored(&self) -> Vec<ContactMessage> {
            self.messages.lock().expect("contacts mutex poisoned").clone()
        }
    }

    impl ContactRepository for MemoryContacts {
        fn insert(&self, message: ContactMessage) -> Result<ContactMessage, ContactRepositoryError> {
            self.messages
                .lock()
                .expect("contacts mutex poisoned")
                .push(message.clone());
            Ok(message)
        }
    }

    struct OfflineContacts;

    impl ContactRepository for OfflineContacts {
        fn insert(&self, _message: ContactMessage) -> Result<ContactMessage, ContactRepositoryError> {
            Err(ContactRepositoryError::Unavailable(
                "connection refused by db-primary:5432".to_string(),
            ))
        }
    }

    fn router<C: ContactRepository + 'static>(repository: Arc<C>) -> Router {
        contact_router(Arc::new(ContactService::new(repository, Locale::Ru)))
    }

    async fn post(router: Router, body: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post("/api/v1/contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).expect("json payload"))
    }

    #[tokio::test]
    async fn stores_complete_forms_and_thanks_in_requested_locale() {
        let repository = Arc::new(MemoryContacts::default());
        let (status, payload) = post(
            router(repository.clone()),
            r#"{"name":"Aigerim","email":"aigerim@example.kz","message":"Hello","lang":"kk"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["message"], "Рахмет, біз сізбен хабарласамыз.");

        let stored = repository.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].locale, Locale::Kk);
    }

    #[tokio::test]
    async fn incomplete_forms_get_localized_error() {
        let repository = Arc::new(MemoryContacts::default());
        let (status, payload) = post(router(repository.clone()), r#"{"name":"Aigerim"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["message"], "Заполните все поля");
        assert!(repository.stored().is_empty());
    }

    #[tokio::test]
    async fn unreadable_body_is_an_incomplete_form() {
        let (status, payload) = post(router(Arc::new(MemoryContacts::default())), "{").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["message"], "Заполните все поля");
    }

    #[tokio::test]
    async fn storage_failures_do_not_leak_details() {
        let (status, payload) = post(
            router(Arc::new(OfflineContacts)),
            r#"{"name":"Dana","email":"dana@example.kz","message":"Hi","locale":"en"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["message"], try_again_later(Locale::En));
        assert!(payload.get("error").is_none());
        assert!(!payload.to_string().contains("db-primary"));
    }
}
