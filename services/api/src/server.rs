use crate::cli::ServeArgs;
use crate::infra::{in_memory_catalog, seed_catalog, AppState};
use crate::routes::with_api_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cluster_points::config::AppConfig;
use cluster_points::error::AppError;
use cluster_points::telemetry;
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
    if let Some(seed_csv) = args.seed_csv.take() {
        config.catalog.seed_csv = Some(seed_csv);
    }

    telemetry::init(&config.telemetry)?;

    let catalog = in_memory_catalog();
    if let Some(path) = config.catalog.seed_csv.as_deref() {
        seed_catalog(&catalog, path)?;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog,
    };

    let app = with_api_routes(&app_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "cluster points service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
