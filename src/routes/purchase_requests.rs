use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::{ApiResponse, Pagination, ResponseMeta};
use crate::db::models::purchase_request::{
    CreatePurchaseRequest, PurchaseRequestQuery, PurchaseRequestResponse, UpdatePurchaseRequest,
    UpdateStatusRequest,
};
use crate::error::AppResult;
use crate::services::{PurchaseRequestsService, RequestContext};
use crate::validation::ValidatedJson;

type Envelope<T> = Json<ApiResponse<T>>;

pub async fn list_purchase_requests(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(query): Query<PurchaseRequestQuery>,
) -> AppResult<Envelope<Vec<PurchaseRequestResponse>>> {
    let (page, paging) = PurchaseRequestsService::list(state.requests.as_ref(), &ctx, query).await?;
    let meta = ResponseMeta {
        request_id: ctx.request_id,
        pagination: Some(Pagination::new(paging.page, paging.per_page, page.total)),
        total_count: Some(page.total),
    };
    let data = page.items.into_iter().map(PurchaseRequestResponse::from).collect();
    Ok(Json(ApiResponse::success_with_meta(
        data,
        "Purchase requests retrieved successfully",
        meta,
    )))
}

pub async fn create_purchase_request(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreatePurchaseRequest>,
) -> AppResult<(StatusCode, Envelope<PurchaseRequestResponse>)> {
    let created = PurchaseRequestsService::create(state.requests.as_ref(), &ctx, payload, Utc::now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(created.into(), "Purchase request created successfully")),
    ))
}

pub async fn get_purchase_request(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> AppResult<Envelope<PurchaseRequestResponse>> {
    let request = PurchaseRequestsService::get(state.requests.as_ref(), &ctx, id).await?;
    Ok(Json(ApiResponse::success(
        request.into(),
        "Purchase request retrieved successfully",
    )))
}

pub async fn update_purchase_request(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePurchaseRequest>,
) -> AppResult<Envelope<PurchaseRequestResponse>> {
    let updated =
        PurchaseRequestsService::update(state.requests.as_ref(), &ctx, id, payload, Utc::now()).await?;
    Ok(Json(ApiResponse::success(
        updated.into(),
        "Purchase request updated successfully",
    )))
}

pub async fn update_purchase_request_status(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> AppResult<Envelope<PurchaseRequestResponse>> {
    let updated =
        PurchaseRequestsService::update_status(state.requests.as_ref(), &ctx, id, payload.status, Utc::now())
            .await?;
    Ok(Json(ApiResponse::success(
        updated.into(),
        "Purchase request status updated successfully",
    )))
}

pub async fn delete_purchase_request(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> AppResult<Envelope<()>> {
    PurchaseRequestsService::delete(state.requests.as_ref(), &ctx, id).await?;
    Ok(Json(ApiResponse::ok("Purchase request deleted successfully")))
}
