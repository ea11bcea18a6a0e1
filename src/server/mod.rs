pub mod config;
pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub use config::ServerConfig;
pub use errors::AppError;
pub use handlers::{AppState, Clock};

/// Build the HTTP router with tracing, CORS, body-size limits, and panic recovery.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/api/v1/financing/calculate", post(handlers::calculate))
        .route("/api/v1/financing/schedule", post(handlers::schedule))
        .route("/api/v1/financing/reference", get(handlers::reference))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(config.request_body_limit)));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .with_state(Arc::new(state))
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
