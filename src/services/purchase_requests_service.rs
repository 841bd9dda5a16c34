use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::db::enums::{RequestStatus, UserRole};
use crate::db::models::api::error_codes;
use crate::db::models::purchase_request::{
    CreatePurchaseRequest, LineItemInput, PurchaseRequest, PurchaseRequestQuery, UpdatePurchaseRequest,
};
use crate::db::repositories::{Page, PageRequest, PurchaseRequestFilter, PurchaseRequestRepository};
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::permissions;
use crate::validation::purchase_request::{
    validate_create_purchase_request, validate_update_purchase_request,
};
use crate::workflow::{apply_status, project};

pub struct PurchaseRequestsService;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl PurchaseRequestsService {
    pub async fn list(
        repo: &dyn PurchaseRequestRepository,
        ctx: &RequestContext,
        query: PurchaseRequestQuery,
    ) -> AppResult<(Page<PurchaseRequest>, PageRequest)> {
        let page = PageRequest::new(query.page, query.per_page);
        let filter = PurchaseRequestFilter {
            visible_sectors: permissions::visible_sectors(&ctx.user),
            sector_id: query.sector_id,
            status: query.status,
            requester_id: query.requester_id,
            search: query.search,
            created_between: None,
            page: Some(page),
        };
        Ok((repo.list(&filter).await?, page))
    }

    /// Requests outside the caller's sectors are reported as missing.
    pub async fn get(
        repo: &dyn PurchaseRequestRepository,
        ctx: &RequestContext,
        id: Uuid,
    ) -> AppResult<PurchaseRequest> {
        repo.find(id)
            .await?
            .filter(|request| permissions::can_view_request(&ctx.user, request))
            .ok_or_else(|| AppError::not_found("purchase request"))
    }

    pub async fn create(
        repo: &dyn PurchaseRequestRepository,
        ctx: &RequestContext,
        req: CreatePurchaseRequest,
        now: DateTime<Utc>,
    ) -> AppResult<PurchaseRequest> {
        validate_create_purchase_request(&req)?;
        if !permissions::can_create_request(&ctx.user, req.sector_id) {
            return Err(AppError::forbidden(
                "You can only create purchase requests for your own sectors",
            ));
        }

        let number = repo.next_number(now.year()).await?;
        let mut request = PurchaseRequest {
            id: Uuid::new_v4(),
            number,
            description: req.description.trim().to_string(),
            justification: optional_text(req.justification),
            sector_id: req.sector_id,
            requester_id: ctx.user.id,
            funding_source: req.funding_source.trim().to_string(),
            total_value: req.total_value.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            status: RequestStatus::Pending,
            items: req.items.into_iter().map(LineItemInput::into_item).collect(),
            workflow: Some(project(RequestStatus::Pending, now)),
            created_at: now,
            updated_at: now,
        };
        request.recompute_total();

        let created = repo.add(request).await?;
        tracing::info!(
            request_id = ?ctx.request_id,
            purchase_request_id = %created.id,
            number = %created.number,
            user_id = %ctx.user.id,
            "Purchase request created"
        );
        Ok(created)
    }

    pub async fn update(
        repo: &dyn PurchaseRequestRepository,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdatePurchaseRequest,
        now: DateTime<Utc>,
    ) -> AppResult<PurchaseRequest> {
        validate_update_purchase_request(&req)?;
        let mut request = Self::get(repo, ctx, id).await?;
        if !permissions::can_edit_request(&ctx.user, &request) {
            return Err(AppError::forbidden("You cannot edit this purchase request"));
        }

        if let Some(sector_id) = req.sector_id {
            if !permissions::can_create_request(&ctx.user, sector_id) {
                return Err(AppError::forbidden(
                    "You cannot move a purchase request to a sector you do not belong to",
                ));
            }
            request.sector_id = sector_id;
        }
        if let Some(description) = req.description {
            request.description = description.trim().to_string();
        }
        if req.justification.is_some() {
            request.justification = optional_text(req.justification);
        }
        if let Some(funding_source) = req.funding_source {
            request.funding_source = funding_source.trim().to_string();
        }
        if let Some(priority) = req.priority {
            request.priority = priority;
        }
        if let Some(items) = req.items {
            request.items = items.into_iter().map(LineItemInput::into_item).collect();
        }
        if let Some(total_value) = req.total_value {
            request.total_value = total_value;
        }
        request.recompute_total();
        if request.items.is_empty() && request.total_value <= 0.0 {
            return Err(AppError::validation(
                "Total value must be greater than zero when no items are given",
            ));
        }
        request.updated_at = now;

        repo.update(request).await
    }

    /// Sets the status and re-projects the workflow from it. A request
    /// without a stored workflow gets one here.
    pub async fn update_status(
        repo: &dyn PurchaseRequestRepository,
        ctx: &RequestContext,
        id: Uuid,
        status: RequestStatus,
        now: DateTime<Utc>,
    ) -> AppResult<PurchaseRequest> {
        let mut request = Self::get(repo, ctx, id).await?;
        if !permissions::can_change_status(&ctx.user, &request) {
            return Err(status_change_denied(ctx, &request));
        }

        let previous = request.status;
        match request.workflow.as_mut() {
            Some(workflow) => apply_status(workflow, status, now),
            None => request.workflow = Some(project(status, now)),
        }
        request.status = status;
        request.updated_at = now;

        let updated = repo.update(request).await?;
        tracing::info!(
            request_id = ?ctx.request_id,
            purchase_request_id = %updated.id,
            from = %previous,
            to = %status,
            user_id = %ctx.user.id,
            "Purchase request status changed"
        );
        Ok(updated)
    }

    pub async fn delete(repo: &dyn PurchaseRequestRepository, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let request = Self::get(repo, ctx, id).await?;
        if !permissions::can_delete_request(&ctx.user, &request) {
            return Err(AppError::forbidden("You cannot delete this purchase request"));
        }
        if !repo.remove(id).await? {
            return Err(AppError::not_found("purchase request"));
        }
        tracing::info!(
            request_id = ?ctx.request_id,
            purchase_request_id = %id,
            user_id = %ctx.user.id,
            "Purchase request deleted"
        );
        Ok(())
    }
}

pub(crate) fn status_change_denied(ctx: &RequestContext, request: &PurchaseRequest) -> AppError {
    let is_sector_manager = ctx.user.role == UserRole::Manager && ctx.user.belongs_to(request.sector_id);
    if is_sector_manager && request.status.is_terminal() {
        AppError::conflict_with_code(
            format!("Purchase request is {} and can no longer change", request.status.label()),
            Some("status".to_string()),
            error_codes::DFD_STATUS_FINAL,
        )
    } else {
        AppError::forbidden("You cannot change the status of this purchase request")
    }
}
