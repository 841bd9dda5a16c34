use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use crate::dashboard::{DashboardOverview, MonthlySpend};
use crate::db::models::api::ApiResponse;
use crate::db::with_conn;
use crate::error::{AppError, AppResult};
use crate::services::{DashboardService, RequestContext, SectorsService};

#[derive(Deserialize)]
pub struct MonthlyQueryParams {
    pub year: Option<i32>,
}

pub async fn sector_summaries(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> AppResult<Json<ApiResponse<DashboardOverview>>> {
    let budgets = with_conn(&state.db, SectorsService::budgets).await?;
    let overview = DashboardService::sectors(state.requests.as_ref(), &ctx, budgets).await?;
    Ok(Json(ApiResponse::success(overview, "Dashboard retrieved successfully")))
}

pub async fn monthly_spend(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(params): Query<MonthlyQueryParams>,
) -> AppResult<Json<ApiResponse<Vec<MonthlySpend>>>> {
    let year = params.year.unwrap_or_else(|| Utc::now().year());
    if !(1970..=9999).contains(&year) {
        return Err(AppError::validation("Year must be between 1970 and 9999"));
    }
    let series = DashboardService::monthly(state.requests.as_ref(), &ctx, year).await?;
    Ok(Json(ApiResponse::success(series, "Monthly spend retrieved successfully")))
}
