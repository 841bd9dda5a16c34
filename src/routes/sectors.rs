use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::sector::{CreateSectorRequest, SectorResponse, UpdateSectorRequest};
use crate::db::with_conn;
use crate::error::AppResult;
use crate::services::{RequestContext, SectorsService};
use crate::validation::ValidatedJson;

#[derive(Deserialize)]
pub struct SectorQueryParams {
    pub municipality_id: Option<Uuid>,
}

pub async fn list_sectors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SectorQueryParams>,
) -> AppResult<Json<ApiResponse<Vec<SectorResponse>>>> {
    let sectors = with_conn(&state.db, move |conn| SectorsService::list(conn, params.municipality_id)).await?;
    let data = sectors.into_iter().map(SectorResponse::from).collect();
    Ok(Json(ApiResponse::success(data, "Sectors retrieved successfully")))
}

pub async fn get_sector(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SectorResponse>>> {
    let sector = with_conn(&state.db, move |conn| SectorsService::get(conn, id)).await?;
    Ok(Json(ApiResponse::success(sector.into(), "Sector retrieved successfully")))
}

pub async fn create_sector(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateSectorRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SectorResponse>>)> {
    let created = with_conn(&state.db, move |conn| SectorsService::create(conn, &ctx, &payload)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(created.into(), "Sector created successfully")),
    ))
}

pub async fn update_sector(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateSectorRequest>,
) -> AppResult<Json<ApiResponse<SectorResponse>>> {
    let updated = with_conn(&state.db, move |conn| SectorsService::update(conn, &ctx, id, &payload)).await?;
    Ok(Json(ApiResponse::success(updated.into(), "Sector updated successfully")))
}

pub async fn delete_sector(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    with_conn(&state.db, move |conn| SectorsService::delete(conn, &ctx, id)).await?;
    Ok(Json(ApiResponse::ok("Sector deleted successfully")))
}
