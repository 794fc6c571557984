use crate::cli::ServeArgs;
use crate::infra::{load_profile_store, AppState};
use crate::routes::with_decision_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_engine::config::AppConfig;
use loan_engine::error::AppError;
use loan_engine::lending::LoanDecisionService;
use loan_engine::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(load_profile_store(&config.profiles)?);
    let decision_service = Arc::new(LoanDecisionService::new(store, config.product.clone()));

    let app = with_decision_routes(decision_service)
        .layer(Extension(app_state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_loan_amount = %config.product.max_loan_amount,
        min_period_months = config.product.min_period_months,
        max_period_months = config.product.max_period_months,
        "loan decision engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
