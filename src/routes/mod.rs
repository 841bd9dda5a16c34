pub mod auth;
pub mod dashboard;
pub mod health;
pub mod managers;
pub mod mayors;
pub mod municipalities;
pub mod purchase_requests;
pub mod sectors;
pub mod users;
pub mod workflows;

use crate::AppState;
use crate::middleware::auth_middleware;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route(
            "/purchase-requests",
            get(purchase_requests::list_purchase_requests).post(purchase_requests::create_purchase_request),
        )
        .route(
            "/purchase-requests/:id",
            get(purchase_requests::get_purchase_request)
                .put(purchase_requests::update_purchase_request)
                .delete(purchase_requests::delete_purchase_request),
        )
        .route(
            "/purchase-requests/:id/status",
            put(purchase_requests::update_purchase_request_status),
        )
        .route("/purchase-requests/:id/workflow", get(workflows::get_workflow))
        .route(
            "/purchase-requests/:id/workflow/steps/:index",
            put(workflows::update_workflow_step),
        )
        .route("/dashboard/sectors", get(dashboard::sector_summaries))
        .route("/dashboard/monthly", get(dashboard::monthly_spend))
        .route(
            "/municipalities",
            get(municipalities::list_municipalities).post(municipalities::create_municipality),
        )
        .route(
            "/municipalities/:id",
            get(municipalities::get_municipality)
                .put(municipalities::update_municipality)
                .delete(municipalities::delete_municipality),
        )
        .route("/sectors", get(sectors::list_sectors).post(sectors::create_sector))
        .route(
            "/sectors/:id",
            get(sectors::get_sector)
                .put(sectors::update_sector)
                .delete(sectors::delete_sector),
        )
        .route("/managers", get(managers::list_managers).post(managers::create_manager))
        .route(
            "/managers/:id",
            get(managers::get_manager)
                .put(managers::update_manager)
                .delete(managers::delete_manager),
        )
        .route("/mayors", get(mayors::list_mayors).post(mayors::create_mayor))
        .route(
            "/mayors/:id",
            get(mayors::get_mayor)
                .put(mayors::update_mayor)
                .delete(mayors::delete_mayor),
        )
        .route("/users", post(users::create_user))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    public_routes.merge(protected_routes).with_state(state)
}
