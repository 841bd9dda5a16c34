use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::auth::{CreateUserRequest, UserResponse};
use crate::db::with_conn;
use crate::error::AppResult;
use crate::services::{AuthService, RequestContext};
use crate::validation::ValidatedJson;

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let cost = state.config.bcrypt_cost;
    let user = with_conn(&state.db, move |conn| AuthService::create_user(conn, &ctx, &payload, cost)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(user, "User created successfully")),
    ))
}
