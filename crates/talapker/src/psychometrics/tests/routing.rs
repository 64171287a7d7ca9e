use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use crate::psychometrics::router::{content_admin_router, psychometric_router, submit_handler};
use crate::psychometrics::service::PsychometricService;

fn router() -> axum::Router {
    let (service, _) = build_service();
    psychometric_router(Arc::new(service))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn questions_route_honors_legacy_lang_parameter() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/test/questions?lang=en")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_LANGUAGE),
        Some(&header::HeaderValue::from_static("en"))
    );
    let payload = read_json_body(response).await;
    assert!(payload.is_array());
    assert_eq!(payload.as_array().map(Vec::len), Some(20));
    assert_eq!(payload[0]["id"], 1);
    assert_eq!(payload[0]["options"][4], "Strongly agree");
    assert!(payload[0].get("axis").is_none());
}

#[tokio::test]
async fn questions_route_returns_bare_list_for_default_locale() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/test/questions")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(
        response.headers().get(header::CONTENT_LANGUAGE),
        Some(&header::HeaderValue::from_static("ru"))
    );
    let payload = read_json_body(response).await;
    assert!(payload.is_array());
    assert!(payload[0]["text"].as_str().is_some_and(|text| !text.is_empty()));
}

#[tokio::test]
async fn submit_route_returns_type_and_recommendation() {
    let body = serde_json::to_string(&introvert_submission()).expect("serializes");
    let response = router()
        .oneshot(post_json("/api/v1/test/submit", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["type_code"], "INFP");
    assert_eq!(payload["recommendation"]["title"], "Mediator");
    assert_eq!(payload["recommendation"]["percentages"]["JP"], 0);
    assert!(payload["result_id"].as_str().is_some());
}

#[tokio::test]
async fn submit_route_accepts_legacy_answer_shape() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/test/submit",
            r#"{"answers":[{"id":1,"value":1}]}"#,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["type_code"], "ISTJ");
}

#[tokio::test]
async fn submit_route_rejects_out_of_range_values() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/test/submit",
            r#"{"locale":"ru","answers":[{"question_id":1,"value":0}]}"#,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("between 1 and 5")));
}

#[tokio::test]
async fn submit_route_rejects_malformed_payloads() {
    for body in [r#"{"answers": 5}"#, "not json", r#"{"answers":[{"value":3}]}"#] {
        let response = router()
            .oneshot(post_json("/api/v1/test/submit", body))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
    }
}

#[tokio::test]
async fn submit_route_rejects_missing_answers() {
    let (service, repository) = build_service();
    let app = psychometric_router(Arc::new(service));

    for body in ["{}", r#"{"locale":"en"}"#, r#"{"user_ref":"applicant-17"}"#] {
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/test/submit", body))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
    }
    assert_eq!(repository.len(), 0);

    let response = app
        .oneshot(post_json("/api/v1/test/submit", r#"{"answers":[]}"#))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["type_code"], "ESTJ");
}

#[tokio::test]
async fn submit_handler_maps_storage_failure_to_internal_error() {
    let service = Arc::new(PsychometricService::new(
        content_store(),
        Arc::new(UnavailableResults),
    ));

    let response = submit_handler::<UnavailableResults>(
        State(service),
        Ok(axum::Json(introvert_submission())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn result_routes_return_stored_records_and_404() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let outcome = service
        .submit(introvert_submission())
        .expect("submission succeeds");

    let found = psychometric_router(service.clone())
        .oneshot(
            Request::get(format!("/api/v1/test/results/{}", outcome.result_id.0))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(found.status(), StatusCode::OK);
    let payload = read_json_body(found).await;
    assert_eq!(payload["type_code"], "INFP");
    assert_eq!(payload["answers"][0]["value"], 1);

    let listed = psychometric_router(service.clone())
        .oneshot(
            Request::get("/api/v1/test/results?user_ref=applicant-17")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(listed.status(), StatusCode::OK);
    let payload = read_json_body(listed).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));

    let missing = psychometric_router(service)
        .oneshot(
            Request::get("/api/v1/test/results/res-999999")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn type_route_resolves_unknown_codes_gracefully() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/test/types/QQQQ?locale=kk")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["title"], "Тип анықталмады");
    assert_eq!(payload["professions"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn reload_is_not_mounted_on_public_router() {
    let response = router()
        .oneshot(
            Request::post("/api/v1/test/content/reload")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reload_route_reports_content_summary() {
    let (service, _) = build_service();
    let response = content_admin_router(Arc::new(service))
        .oneshot(
            Request::post("/api/v1/test/content/reload")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["questions"], 20);
    assert_eq!(payload["types"], 16);
    assert_eq!(payload["locales"], serde_json::json!(["ru", "kk", "en"]));
}
