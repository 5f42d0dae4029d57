use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_quote_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use medigap_quotes::config::AppConfig;
use medigap_quotes::error::AppError;
use medigap_quotes::quotes::{QuoteAggregationEngine, StaticCarrierRegistry};
use medigap_quotes::telemetry;
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
    if let Some(bucket_count) = args.bucket_count.take().filter(|count| *count > 0) {
        config.quoting.bucket_count = bucket_count;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registry = Arc::new(StaticCarrierRegistry::seeded());
    let engine = Arc::new(QuoteAggregationEngine::new(registry));

    let app = with_quote_routes(engine, config.quoting.bucket_count)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "quote aggregation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
