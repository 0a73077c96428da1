use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryShareOutbox};
use crate::routes::with_order_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cupcake_order::config::AppConfig;
use cupcake_order::error::AppError;
use cupcake_order::telemetry;
use cupcake_order::workflows::order::{OrderController, OrderWizard};
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

    let controller = OrderController::new(config.order.locale.clone(), config.order.clock());
    let locale = controller.locale().tag();
    let wizard = Arc::new(OrderWizard::new(controller));
    let outbox = Arc::new(InMemoryShareOutbox::default());

    let app = with_order_routes(wizard, outbox)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        locale,
        "cupcake order service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
