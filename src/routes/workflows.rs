use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::purchase_request::WorkflowView;
use crate::error::AppResult;
use crate::services::{RequestContext, WorkflowsService};
use crate::validation::ValidatedJson;
use crate::workflow::StepChanges;

pub async fn get_workflow(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<WorkflowView>>> {
    let view = WorkflowsService::get(state.requests.as_ref(), &ctx, id).await?;
    Ok(Json(ApiResponse::success(view, "Workflow retrieved successfully")))
}

pub async fn update_workflow_step(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((id, index)): Path<(Uuid, usize)>,
    ValidatedJson(changes): ValidatedJson<StepChanges>,
) -> AppResult<Json<ApiResponse<WorkflowView>>> {
    let view =
        WorkflowsService::edit_step(state.requests.as_ref(), &ctx, id, index, changes, Utc::now()).await?;
    Ok(Json(ApiResponse::success(view, "Workflow step updated successfully")))
}
