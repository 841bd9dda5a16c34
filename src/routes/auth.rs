use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::auth::{AuthenticatedUser, LoginRequest, LoginResponse};
use crate::db::with_conn;
use crate::error::AppResult;
use crate::services::AuthService;
use crate::validation::ValidatedJson;

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let tokens = state.tokens.clone();
    let response = with_conn(&state.db, move |conn| AuthService::login(conn, &tokens, &payload)).await?;
    Ok(Json(ApiResponse::success(response, "Login successful")))
}

pub async fn me(user: AuthenticatedUser) -> Json<ApiResponse<AuthenticatedUser>> {
    Json(ApiResponse::success(user, "Current user retrieved successfully"))
}
