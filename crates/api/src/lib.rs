//! HTTP API server for the depot system.
//!
//! Mirrors the command channel as REST endpoints for shopping list
//! management, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::{
    DepotApp, DepotService, InMemoryProductCatalog, InMemoryStoreDirectory,
    LoggingEventPublisher, ShoppingList,
};
use metrics_exporter_prometheus::PrometheusHandle;
use repository::InMemoryRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::shopping_lists::AppState;

/// The application type served by the standalone binary.
pub type DefaultApp = DepotService<
    InMemoryRepository<ShoppingList>,
    InMemoryStoreDirectory,
    InMemoryProductCatalog,
    LoggingEventPublisher,
>;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<A: DepotApp + 'static>(
    state: Arc<AppState<A>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/shopping-lists", post(routes::shopping_lists::create::<A>))
        .route("/shopping-lists/{id}", get(routes::shopping_lists::get::<A>))
        .route(
            "/shopping-lists/{id}/cancel",
            post(routes::shopping_lists::cancel::<A>),
        )
        .route(
            "/shopping-lists/{id}/assign",
            post(routes::shopping_lists::assign::<A>),
        )
        .route(
            "/shopping-lists/{id}/complete",
            post(routes::shopping_lists::complete::<A>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires the default application state: in-memory persistence, the provided
/// store directory and product catalog, and log-only event publication.
pub fn create_default_state(
    stores: InMemoryStoreDirectory,
    products: InMemoryProductCatalog,
) -> Arc<AppState<DefaultApp>> {
    let app = DepotService::new(
        InMemoryRepository::new(),
        stores,
        products,
        LoggingEventPublisher::new(),
    );
    Arc::new(AppState { app })
}
