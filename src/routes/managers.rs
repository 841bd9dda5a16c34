use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::manager::{CreateManagerRequest, Manager, ManagerQuery, UpdateManagerRequest};
use crate::db::with_conn;
use crate::error::AppResult;
use crate::services::{ManagersService, RequestContext};
use crate::validation::ValidatedJson;

pub async fn list_managers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ManagerQuery>,
) -> AppResult<Json<ApiResponse<Vec<Manager>>>> {
    let managers = with_conn(&state.db, move |conn| ManagersService::list(conn, &query)).await?;
    Ok(Json(ApiResponse::success(managers, "Managers retrieved successfully")))
}

pub async fn get_manager(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Manager>>> {
    let manager = with_conn(&state.db, move |conn| ManagersService::get(conn, id)).await?;
    Ok(Json(ApiResponse::success(manager, "Manager retrieved successfully")))
}

pub async fn create_manager(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateManagerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Manager>>)> {
    let created = with_conn(&state.db, move |conn| ManagersService::create(conn, &ctx, &payload)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(created, "Manager created successfully")),
    ))
}

pub async fn update_manager(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateManagerRequest>,
) -> AppResult<Json<ApiResponse<Manager>>> {
    let updated = with_conn(&state.db, move |conn| ManagersService::update(conn, &ctx, id, &payload)).await?;
    Ok(Json(ApiResponse::success(updated, "Manager updated successfully")))
}

pub async fn delete_manager(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    with_conn(&state.db, move |conn| ManagersService::delete(conn, &ctx, id)).await?;
    Ok(Json(ApiResponse::ok("Manager deleted successfully")))
}
