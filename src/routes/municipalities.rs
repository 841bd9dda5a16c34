use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::municipality::{CreateMunicipalityRequest, Municipality, UpdateMunicipalityRequest};
use crate::db::with_conn;
use crate::error::AppResult;
use crate::services::{MunicipalitiesService, RequestContext};
use crate::validation::ValidatedJson;

pub async fn list_municipalities(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<Vec<Municipality>>>> {
    let list = with_conn(&state.db, MunicipalitiesService::list).await?;
    Ok(Json(ApiResponse::success(list, "Municipalities retrieved successfully")))
}

pub async fn get_municipality(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Municipality>>> {
    let municipality = with_conn(&state.db, move |conn| MunicipalitiesService::get(conn, id)).await?;
    Ok(Json(ApiResponse::success(municipality, "Municipality retrieved successfully")))
}

pub async fn create_municipality(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateMunicipalityRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Municipality>>)> {
    let created = with_conn(&state.db, move |conn| MunicipalitiesService::create(conn, &ctx, &payload)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(created, "Municipality created successfully")),
    ))
}

pub async fn update_municipality(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateMunicipalityRequest>,
) -> AppResult<Json<ApiResponse<Municipality>>> {
    let updated =
        with_conn(&state.db, move |conn| MunicipalitiesService::update(conn, &ctx, id, &payload)).await?;
    Ok(Json(ApiResponse::success(updated, "Municipality updated successfully")))
}

pub async fn delete_municipality(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    with_conn(&state.db, move |conn| MunicipalitiesService::delete(conn, &ctx, id)).await?;
    Ok(Json(ApiResponse::ok("Municipality deleted successfully")))
}
