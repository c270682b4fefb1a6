// Library exports for binaries and tests
pub mod config;
pub mod db;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

/// Allow localhost during development plus the configured origin, if any.
fn cors_layer(config: &Config) -> CorsLayer {
    let allowed = config.cors_origin.clone();
    let origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let Ok(o) = origin.to_str() else {
            return false;
        };
        if o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") {
            return true;
        }
        allowed.as_deref() == Some(o)
    });

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .allow_origin(origin)
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        .route("/users", post(routes::users::create_user))
        .route("/meals", get(routes::meals::list_meals).post(routes::meals::create_meal))
        .route("/meals/summary", get(routes::meals::get_summary))
        .route(
            "/meals/{id}",
            get(routes::meals::get_meal)
                .put(routes::meals::update_meal)
                .delete(routes::meals::delete_meal),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
