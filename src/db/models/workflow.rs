use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::{RequestStatus, StepKind, StepStatus};
use crate::workflow::{STEP_COUNT, Workflow, WorkflowStep, projection_for};

/// One persisted workflow step, keyed by `(purchase_request_id, position)`.
#[derive(Queryable, Selectable, Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::workflow_steps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkflowStepRow {
    pub purchase_request_id: Uuid,
    pub position: i32,
    pub stage: StepKind,
    pub status: StepStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
}

impl WorkflowStepRow {
    pub fn from_step(request_id: Uuid, step: &WorkflowStep) -> Self {
        Self {
            purchase_request_id: request_id,
            position: step.kind.position() as i32,
            stage: step.kind,
            status: step.status,
            started_at: step.started_at,
            completed_at: step.completed_at,
            responsible: step.responsible.clone(),
            notes: step.notes.clone(),
        }
    }
}

pub fn workflow_rows(request_id: Uuid, workflow: &Workflow) -> Vec<WorkflowStepRow> {
    workflow
        .steps
        .iter()
        .map(|step| WorkflowStepRow::from_step(request_id, step))
        .collect()
}

/// Rebuilds a workflow from its stored steps. `etapa_atual` and `percent`
/// are not stored; they come from the request status.
///
/// Returns `None` unless there is exactly one row per stage.
pub fn workflow_from_rows(status: RequestStatus, rows: Vec<WorkflowStepRow>) -> Option<Workflow> {
    if rows.len() != STEP_COUNT {
        return None;
    }

    let mut workflow = Workflow::blank();
    let mut seen = [false; STEP_COUNT];
    for row in rows {
        let index = row.stage.position();
        if row.position as usize != index || seen[index] {
            tracing::warn!(
                purchase_request_id = %row.purchase_request_id,
                position = row.position,
                stage = %row.stage,
                "Inconsistent workflow step row, ignoring stored workflow"
            );
            return None;
        }
        seen[index] = true;
        workflow.steps[index] = WorkflowStep {
            kind: row.stage,
            status: row.status,
            started_at: row.started_at,
            completed_at: row.completed_at,
            responsible: row.responsible,
            notes: row.notes,
        };
    }

    let projection = projection_for(status);
    workflow.current_step = projection.current_step;
    workflow.percent = projection.percent;
    Some(workflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::project;

    #[test]
    fn rows_rebuild_the_same_workflow() {
        let id = Uuid::new_v4();
        let mut original = project(RequestStatus::InProgress, Utc::now());
        original.steps[3].responsible = Some("Setor de Compras".to_string());

        let mut rows = workflow_rows(id, &original);
        rows.reverse();
        let rebuilt = workflow_from_rows(RequestStatus::InProgress, rows).unwrap();

        assert_eq!(rebuilt, original);
    }

    #[test]
    fn missing_or_duplicated_rows_yield_no_workflow() {
        let id = Uuid::new_v4();
        let wf = project(RequestStatus::Pending, Utc::now());

        let mut rows = workflow_rows(id, &wf);
        rows.pop();
        assert!(workflow_from_rows(RequestStatus::Pending, rows).is_none());

        let mut rows = workflow_rows(id, &wf);
        rows[5] = rows[4].clone();
        assert!(workflow_from_rows(RequestStatus::Pending, rows).is_none());
    }
}
