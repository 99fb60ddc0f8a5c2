use crate::cli::ServeArgs;
use crate::infra::{seed_listings, AppState, InMemoryCredentialRepository};
use crate::routes::with_policy_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use estate_guard::config::AppConfig;
use estate_guard::error::AppError;
use estate_guard::policies::address::ListingDisclosureService;
use estate_guard::policies::password_history::{Argon2Hasher, PasswordRotationService};
use estate_guard::telemetry;
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

    let hasher = Arc::new(Argon2Hasher::new(&config.password_hash)?);
    let credentials = Arc::new(InMemoryCredentialRepository::default());
    let password_service = Arc::new(PasswordRotationService::new(credentials, hasher));

    let (catalog, collaborations) = seed_listings();
    let listing_service = Arc::new(ListingDisclosureService::new(
        Arc::new(catalog),
        Arc::new(collaborations),
    ));

    let app = with_policy_routes(password_service, listing_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "estate guard policies ready");

    axum::serve(listener, app).await?;
    Ok(())
}
