use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::mayor::{CreateMayorRequest, MayorResponse, UpdateMayorRequest};
use crate::db::with_conn;
use crate::error::AppResult;
use crate::services::{MayorsService, RequestContext};
use crate::validation::ValidatedJson;

#[derive(Deserialize)]
pub struct MayorQueryParams {
    pub municipality_id: Option<Uuid>,
}

pub async fn list_mayors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MayorQueryParams>,
) -> AppResult<Json<ApiResponse<Vec<MayorResponse>>>> {
    let mayors = with_conn(&state.db, move |conn| MayorsService::list(conn, params.municipality_id)).await?;
    let today = Utc::now().date_naive();
    let data = mayors.into_iter().map(|m| MayorResponse::new(m, today)).collect();
    Ok(Json(ApiResponse::success(data, "Mayors retrieved successfully")))
}

pub async fn get_mayor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MayorResponse>>> {
    let mayor = with_conn(&state.db, move |conn| MayorsService::get(conn, id)).await?;
    Ok(Json(ApiResponse::success(
        MayorResponse::new(mayor, Utc::now().date_naive()),
        "Mayor retrieved successfully",
    )))
}

pub async fn create_mayor(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateMayorRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MayorResponse>>)> {
    let created = with_conn(&state.db, move |conn| MayorsService::create(conn, &ctx, &payload)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            MayorResponse::new(created, Utc::now().date_naive()),
            "Mayor created successfully",
        )),
    ))
}

pub async fn update_mayor(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateMayorRequest>,
) -> AppResult<Json<ApiResponse<MayorResponse>>> {
    let updated = with_conn(&state.db, move |conn| MayorsService::update(conn, &ctx, id, &payload)).await?;
    Ok(Json(ApiResponse::success(
        MayorResponse::new(updated, Utc::now().date_naive()),
        "Mayor updated successfully",
    )))
}

pub async fn delete_mayor(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    with_conn(&state.db, move |conn| MayorsService::delete(conn, &ctx, id)).await?;
    Ok(Json(ApiResponse::ok("Mayor deleted successfully")))
}
