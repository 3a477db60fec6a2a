use crate::cli::ServeArgs;
use crate::infra::{default_tuning, seed_catalog, AppState, InMemorySourceRepository};
use crate::routes::with_match_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use funding_match::config::AppConfig;
use funding_match::error::AppError;
use funding_match::matching::{CatalogImporter, MatchService};
use funding_match::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let sources = match args.catalog.take() {
        Some(path) => CatalogImporter::from_path(path)?,
        None => seed_catalog(),
    };
    let source_count = sources.len();

    let repository = Arc::new(InMemorySourceRepository::with_sources(sources));
    let service = Arc::new(MatchService::new(repository.clone(), default_tuning()));

    let app = with_match_routes(service, repository)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, source_count, "funding match service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
