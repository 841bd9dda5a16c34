use axum::Json;
use serde_json::{Value, json};

use crate::db::models::api::ApiResponse;

pub async fn health() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(
        json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }),
        "Service is healthy",
    ))
}
