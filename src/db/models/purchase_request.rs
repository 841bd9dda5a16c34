use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::{Priority, RequestStatus, StepKind};
use crate::db::models::workflow::{WorkflowStepRow, workflow_from_rows};
use crate::workflow::Workflow;

/// A purchase request (DFD) with its line items and projected workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub id: Uuid,
    pub number: String,
    pub description: String,
    pub justification: Option<String>,
    pub sector_id: Uuid,
    pub requester_id: Uuid,
    pub funding_source: String,
    pub total_value: f64,
    pub priority: Priority,
    pub status: RequestStatus,
    pub items: Vec<LineItem>,
    /// Absent only on records created before workflows were tracked; filled
    /// in on the next status change.
    pub workflow: Option<Workflow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseRequest {
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// When the request has line items, its value is their sum.
    pub fn recompute_total(&mut self) {
        if !self.items.is_empty() {
            self.total_value = round_cents(self.items_total());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Row models
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Clone, Debug)]
#[diesel(table_name = crate::schema::purchase_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct PurchaseRequestRow {
    pub id: Uuid,
    pub number: String,
    pub description: String,
    pub justification: Option<String>,
    pub sector_id: Uuid,
    pub requester_id: Uuid,
    pub funding_source: String,
    pub total_value: f64,
    pub priority: Priority,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::purchase_request_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LineItemRow {
    pub id: Uuid,
    pub purchase_request_id: Uuid,
    pub position: i32,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
}

impl PurchaseRequestRow {
    pub fn from_domain(request: &PurchaseRequest) -> Self {
        Self {
            id: request.id,
            number: request.number.clone(),
            description: request.description.clone(),
            justification: request.justification.clone(),
            sector_id: request.sector_id,
            requester_id: request.requester_id,
            funding_source: request.funding_source.clone(),
            total_value: request.total_value,
            priority: request.priority,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }

    /// `items` and `steps` must belong to this request; they are ordered by
    /// position here.
    pub fn into_domain(self, mut items: Vec<LineItemRow>, steps: Vec<WorkflowStepRow>) -> PurchaseRequest {
        items.sort_by_key(|item| item.position);
        let workflow = workflow_from_rows(self.status, steps);
        PurchaseRequest {
            id: self.id,
            number: self.number,
            description: self.description,
            justification: self.justification,
            sector_id: self.sector_id,
            requester_id: self.requester_id,
            funding_source: self.funding_source,
            total_value: self.total_value,
            priority: self.priority,
            status: self.status,
            items: items.into_iter().map(LineItem::from).collect(),
            workflow,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        LineItem {
            id: row.id,
            description: row.description,
            quantity: row.quantity,
            unit: row.unit,
            unit_price: row.unit_price,
        }
    }
}

impl LineItemRow {
    pub fn from_domain(request_id: Uuid, position: usize, item: &LineItem) -> Self {
        Self {
            id: item.id,
            purchase_request_id: request_id,
            position: position as i32,
            description: item.description.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            unit_price: item.unit_price,
        }
    }
}

// Request/Response models
#[derive(Deserialize, Serialize, Validate, Clone, Debug)]
pub struct LineItemInput {
    #[validate(length(min = 1, max = 500, message = "Item description must be between 1 and 500 characters"))]
    pub description: String,
    pub quantity: f64,
    #[validate(length(min = 1, max = 16, message = "Unit must be between 1 and 16 characters"))]
    pub unit: String,
    pub unit_price: f64,
}

impl LineItemInput {
    pub fn into_item(self) -> LineItem {
        LineItem {
            id: Uuid::new_v4(),
            description: self.description.trim().to_string(),
            quantity: self.quantity,
            unit: self.unit.trim().to_string(),
            unit_price: self.unit_price,
        }
    }
}

#[derive(Deserialize, Serialize, Validate, Clone, Debug)]
pub struct CreatePurchaseRequest {
    #[validate(length(min = 1, max = 2000, message = "Description must be between 1 and 2000 characters"))]
    pub description: String,
    #[validate(length(max = 5000, message = "Justification is too long (max 5000 characters)"))]
    pub justification: Option<String>,
    pub sector_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Funding source is required"))]
    pub funding_source: String,
    pub total_value: Option<f64>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub items: Vec<LineItemInput>,
}

#[derive(Deserialize, Serialize, Validate, Clone, Debug, Default)]
pub struct UpdatePurchaseRequest {
    #[validate(length(min = 1, max = 2000, message = "Description must be between 1 and 2000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 5000, message = "Justification is too long (max 5000 characters)"))]
    pub justification: Option<String>,
    pub sector_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "Funding source cannot be empty"))]
    pub funding_source: Option<String>,
    pub total_value: Option<f64>,
    pub priority: Option<Priority>,
    pub items: Option<Vec<LineItemInput>>,
}

#[derive(Deserialize, Serialize, Validate, Clone, Debug)]
pub struct UpdateStatusRequest {
    pub status: RequestStatus,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct PurchaseRequestQuery {
    pub sector_id: Option<Uuid>,
    pub status: Option<RequestStatus>,
    pub requester_id: Option<Uuid>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Serialize, Clone, Debug)]
pub struct PurchaseRequestResponse {
    #[serde(flatten)]
    pub request: PurchaseRequest,
    pub status_label: &'static str,
    pub status_color: &'static str,
}

impl From<PurchaseRequest> for PurchaseRequestResponse {
    fn from(request: PurchaseRequest) -> Self {
        PurchaseRequestResponse {
            status_label: request.status.label(),
            status_color: request.status.color(),
            request,
        }
    }
}

/// Workflow as shown on the request detail page.
#[derive(Serialize, Clone, Debug)]
pub struct WorkflowView {
    pub request_id: Uuid,
    pub status: RequestStatus,
    #[serde(flatten)]
    pub workflow: Workflow,
    pub step_progress: u8,
    pub editable: [bool; crate::workflow::STEP_COUNT],
    pub labels: [&'static str; crate::workflow::STEP_COUNT],
}

impl WorkflowView {
    pub fn new(request_id: Uuid, status: RequestStatus, workflow: Workflow) -> Self {
        WorkflowView {
            request_id,
            status,
            step_progress: workflow.step_progress(),
            editable: crate::workflow::editable_steps(&workflow.steps),
            labels: StepKind::ALL.map(|kind| kind.label()),
            workflow,
        }
    }
}
