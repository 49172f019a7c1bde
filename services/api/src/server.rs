use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCenter};
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use cop_backoffice::config::AppConfig;
use cop_backoffice::dashboard::DashboardState;
use cop_backoffice::error::AppError;
use cop_backoffice::telemetry;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
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
        dashboard: Arc::new(Mutex::new(DashboardState::Idle)),
        center: Arc::new(InMemoryCenter::seeded()),
        loading_timeout: config.dashboard.loading_timeout(),
    };

    let app = router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "cop back-office service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
