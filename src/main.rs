//! PayPal relay HTTP entrypoint.
//!
//! Loads configuration from `PAYPAL_RELAY__*` environment variables (and
//! `.env`), wires the PayPal adapter into the application services, and
//! serves the API until SIGINT or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use paypal_relay::adapters::events::LoggingEventSink;
use paypal_relay::adapters::http::{app_router, apply_layers, AppState, OrdersAppState, ServiceInfo, WebhooksAppState};
use paypal_relay::adapters::paypal::{PayPalConfig, PayPalPaymentAdapter};
use paypal_relay::application::handlers::{
    EventDispatcher, ObservingEventHandler, OrderFacade, WebhookVerifier,
};
use paypal_relay::config::AppConfig;
use paypal_relay::domain::payment::HandlerRegistry;
use paypal_relay::ports::PaymentProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = config.server.environment.as_str(),
        mode = ?config.paypal.mode,
        api_base_url = config.paypal.effective_base_url(),
        "Configuration loaded"
    );

    let paypal_config = PayPalConfig::new(
        config.paypal.client_id.clone(),
        config.paypal.client_secret.clone(),
    )
    .with_base_url(config.paypal.effective_base_url())
    .with_timeout(Duration::from_secs(config.paypal.request_timeout_secs));
    let provider: Arc<dyn PaymentProvider> = Arc::new(PayPalPaymentAdapter::from_config(paypal_config)?);

    let registry = HandlerRegistry::new().with_handler(Arc::new(ObservingEventHandler::new(
        Arc::new(LoggingEventSink::new()),
    )));
    let dispatcher = EventDispatcher::new(
        WebhookVerifier::new(provider.clone(), config.paypal.webhook_id.clone()),
        registry,
    );

    let state = AppState {
        orders: OrdersAppState::new(OrderFacade::new(provider))
            .with_diagnostic(config.server.is_diagnostic()),
        webhooks: WebhooksAppState::new(Arc::new(dispatcher)),
        service: ServiceInfo {
            environment: config.server.environment,
            webhook_path: config.webhook.path.clone(),
        },
    };
    let app = apply_layers(app_router(state), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        webhook_path = %config.webhook.path,
        "PayPal relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
