use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::models::purchase_request::WorkflowView;
use crate::db::repositories::PurchaseRequestRepository;
use crate::error::AppResult;
use crate::services::context::RequestContext;
use crate::services::permissions;
use crate::services::purchase_requests_service::{PurchaseRequestsService, status_change_denied};
use crate::workflow::{StepChanges, edit_step, project};

pub struct WorkflowsService;

impl WorkflowsService {
    /// Stored workflow of the request, or its projection when none is
    /// stored yet. Reading never persists anything.
    pub async fn get(repo: &dyn PurchaseRequestRepository, ctx: &RequestContext, id: Uuid) -> AppResult<WorkflowView> {
        let request = PurchaseRequestsService::get(repo, ctx, id).await?;
        let workflow = request
            .workflow
            .unwrap_or_else(|| project(request.status, request.updated_at));
        Ok(WorkflowView::new(request.id, request.status, workflow))
    }

    /// Manual edit of one step. Leaves the request status, `etapa_atual`
    /// and `percent` untouched.
    pub async fn edit_step(
        repo: &dyn PurchaseRequestRepository,
        ctx: &RequestContext,
        id: Uuid,
        index: usize,
        changes: StepChanges,
        now: DateTime<Utc>,
    ) -> AppResult<WorkflowView> {
        let mut request = PurchaseRequestsService::get(repo, ctx, id).await?;
        if !permissions::can_change_status(&ctx.user, &request) {
            return Err(status_change_denied(ctx, &request));
        }

        let mut workflow = request
            .workflow
            .take()
            .unwrap_or_else(|| project(request.status, now));
        edit_step(&mut workflow, index, changes, now)?;
        request.workflow = Some(workflow);
        request.updated_at = now;

        let updated = repo.update(request).await?;
        tracing::info!(
            request_id = ?ctx.request_id,
            purchase_request_id = %updated.id,
            step = index,
            user_id = %ctx.user.id,
            "Workflow step edited"
        );

        let workflow = updated
            .workflow
            .unwrap_or_else(|| project(updated.status, now));
        Ok(WorkflowView::new(updated.id, updated.status, workflow))
    }
}
