pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod validation;
pub mod workflow;

use crate::config::Config;
use crate::db::DbPool;
use crate::db::repositories::{PgPurchaseRequestRepository, PurchaseRequestRepository};
use crate::middleware::{TokenService, request_tracking_middleware};
use axum::{Router, http::HeaderValue, middleware::from_fn};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::EnvFilter;

pub struct AppState {
    pub db: DbPool,
    pub requests: Arc<dyn PurchaseRequestRepository>,
    pub config: Arc<Config>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let requests = Arc::new(PgPurchaseRequestRepository::new(db.clone()));
        Self::with_repository(db, requests, config)
    }

    /// State whose purchase requests live in `requests` instead of the
    /// database. Admin records still go through `db`.
    pub fn with_repository(db: DbPool, requests: Arc<dyn PurchaseRequestRepository>, config: Config) -> Self {
        let tokens = TokenService::new(&config.auth());
        Self {
            db,
            requests,
            config: Arc::new(config),
            tokens,
        }
    }
}

pub fn init_tracing(config: &Config) {
    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.log_format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);
    routes::create_router(state)
        .layer(cors)
        .layer(from_fn(request_tracking_middleware))
}
