use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryContactRepository, InMemoryResultRepository};
use crate::routes::build_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use talapker::config::AppConfig;
use talapker::error::AppError;
use talapker::intake::ContactService;
use talapker::psychometrics::{ContentStore, ContentSummary, PsychometricService};
use talapker::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dir) = args.content_dir.take() {
        config.content.content_dir = Some(dir);
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let content = Arc::new(ContentStore::load(config.content.clone())?);
    let summary = ContentSummary::from(content.snapshot().as_ref());
    info!(
        questions = summary.questions,
        types = summary.types,
        locales = ?summary.locales,
        "psychometric content loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let quiz_service = Arc::new(PsychometricService::new(
        content,
        Arc::new(InMemoryResultRepository::default()),
    ));
    let contact_service = Arc::new(ContactService::new(
        Arc::new(InMemoryContactRepository::default()),
        config.content.default_locale,
    ));

    if config.server.reload_route {
        info!("content reload endpoint enabled");
    }

    let app = build_router(quiz_service, contact_service, config.server.reload_route)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admissions portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
