//! API server entry point.

use domain::{InMemoryProductCatalog, InMemoryStoreDirectory, Product, Store};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use api::config::Config;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Seed directory/catalog data for standalone runs. In a full deployment
/// these are maintained from store and catalog change events.
fn seeded_directories() -> (InMemoryStoreDirectory, InMemoryProductCatalog) {
    let stores = InMemoryStoreDirectory::new()
        .with_store(Store::new("grocery-west", "Grocery West", "123 Main St"))
        .with_store(Store::new("hardware-central", "Hardware Central", "9 Elm Ave"));
    let products = InMemoryProductCatalog::new()
        .with_product(Product::new("milk", "Whole Milk"))
        .with_product(Product::new("eggs", "Dozen Eggs"))
        .with_product(Product::new("hammer", "Claw Hammer"));
    (stores, products)
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let (stores, products) = seeded_directories();
    let state = api::create_default_state(stores, products);
    let app = api::create_app(state, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting depot API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
