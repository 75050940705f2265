use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryStudentRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use college_predictor::admissions::{AdmissionCatalog, CsvDatasetProvider};
use college_predictor::config::AppConfig;
use college_predictor::error::AppError;
use college_predictor::registration::RegistrationService;
use college_predictor::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dataset) = args.dataset.take() {
        config.dataset.path = dataset;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(AdmissionCatalog::new(
        CsvDatasetProvider::new(config.dataset.path.clone()),
        config.dataset.default_category.clone(),
    ));
    let loader = catalog.clone();
    match tokio::task::spawn_blocking(move || loader.load()).await {
        Ok(Ok(_)) => {}
        Ok(Err(err)) => {
            warn!(error = %err, "serving without admission data until a reload succeeds")
        }
        Err(err) => warn!(error = %err, "initial dataset load task failed"),
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: catalog.clone(),
    };

    let registrations = Arc::new(RegistrationService::new(Arc::new(
        InMemoryStudentRepository::default(),
    )));

    let app = with_service_routes(catalog, registrations)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        dataset = %config.dataset.path.display(),
        "college predictor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
