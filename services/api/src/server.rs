use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryMortgageRepository};
use crate::routes::with_rating_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mortgage_rating::book::MortgageBook;
use mortgage_rating::config::AppConfig;
use mortgage_rating::error::AppError;
use mortgage_rating::rating::RatingService;
use mortgage_rating::telemetry;
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

    let policy = config.rating.policy()?;
    let ratings = Arc::new(RatingService::new(policy)?);
    let book = Arc::new(MortgageBook::new(
        Arc::new(InMemoryMortgageRepository::default()),
        ratings.clone(),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_rating_routes(ratings, book)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        policy = ?config.rating.policy_path,
        "mortgage rating service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
