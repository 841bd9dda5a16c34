use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use super::{Workflow, WorkflowError, can_edit_step};
use crate::db::enums::StepStatus;

/// Manual edit of a single step.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StepChanges {
    pub status: Option<StepStatus>,
    #[serde(alias = "responsavel")]
    #[validate(length(max = 255, message = "Responsible party is too long (max 255 characters)"))]
    pub responsible: Option<String>,
    #[validate(length(max = 2000, message = "Notes are too long (max 2000 characters)"))]
    pub notes: Option<String>,
}

impl StepChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.responsible.is_none() && self.notes.is_none()
    }
}

/// Applies `changes` to step `index`.
///
/// `etapa_atual` and `percent` are left alone: they belong to the request
/// status, and this edit never changes that status. The next status change
/// re-projects the steps and overrides whatever was set here.
pub fn edit_step(
    workflow: &mut Workflow,
    index: usize,
    changes: StepChanges,
    now: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    if index >= workflow.steps.len() {
        return Err(WorkflowError::StepOutOfRange { index });
    }
    if !can_edit_step(&workflow.steps, index) {
        return Err(WorkflowError::StepLocked { index });
    }
    if changes.is_empty() {
        return Err(WorkflowError::EmptyEdit { index });
    }

    let step = &mut workflow.steps[index];
    if let Some(status) = changes.status {
        if status != step.status {
            step.set_status(status, now);
        }
    }
    if let Some(responsible) = changes.responsible {
        step.responsible = non_blank(responsible);
    }
    if let Some(notes) = changes.notes {
        step.notes = non_blank(notes);
    }
    Ok(())
}

// An empty string clears the field.
fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::RequestStatus;
    use crate::workflow::{apply_status, project};

    fn now() -> DateTime<Utc> {
        "2026-05-02T09:30:00Z".parse().unwrap()
    }

    #[test]
    fn edit_sets_status_and_responsible() {
        let mut wf = project(RequestStatus::Approved, now());
        let changes = StepChanges {
            status: Some(StepStatus::Completed),
            responsible: Some("  Carlos Souza ".to_string()),
            notes: Some("Parecer favorável".to_string()),
        };

        edit_step(&mut wf, 2, changes, now()).unwrap();

        let step = &wf.steps[2];
        assert_eq!(step.status, StepStatus::Completed);
        assert_eq!(step.completed_at, Some(now()));
        assert_eq!(step.responsible.as_deref(), Some("Carlos Souza"));
        assert_eq!(step.notes.as_deref(), Some("Parecer favorável"));
    }

    #[test]
    fn edit_never_touches_percent_or_current_step() {
        let mut wf = project(RequestStatus::UnderReview, now());
        let changes = StepChanges {
            status: Some(StepStatus::Completed),
            ..Default::default()
        };

        edit_step(&mut wf, 1, changes, now()).unwrap();

        assert_eq!(wf.percent, 25);
        assert_eq!(wf.current_step, 2);
        // The step-derived figure moves, the status-derived one does not.
        assert_eq!(wf.step_progress(), 33);
    }

    #[test]
    fn locked_step_is_rejected() {
        let mut wf = project(RequestStatus::Pending, now());
        let changes = StepChanges {
            notes: Some("cedo demais".to_string()),
            ..Default::default()
        };
        assert_eq!(
            edit_step(&mut wf, 3, changes, now()),
            Err(WorkflowError::StepLocked { index: 3 })
        );
    }

    #[test]
    fn out_of_range_and_empty_edits_are_rejected() {
        let mut wf = project(RequestStatus::Pending, now());
        assert_eq!(
            edit_step(&mut wf, 6, StepChanges::default(), now()),
            Err(WorkflowError::StepOutOfRange { index: 6 })
        );
        assert_eq!(
            edit_step(&mut wf, 0, StepChanges::default(), now()),
            Err(WorkflowError::EmptyEdit { index: 0 })
        );
    }

    #[test]
    fn blank_text_clears_the_field() {
        let mut wf = project(RequestStatus::Pending, now());
        wf.steps[0].responsible = Some("Maria".to_string());
        let changes = StepChanges {
            responsible: Some("   ".to_string()),
            ..Default::default()
        };
        edit_step(&mut wf, 0, changes, now()).unwrap();
        assert_eq!(wf.steps[0].responsible, None);
    }

    #[test]
    fn rejection_overrides_a_manual_edit() {
        let mut wf = project(RequestStatus::Approved, now());
        edit_step(
            &mut wf,
            2,
            StepChanges {
                status: Some(StepStatus::InProgress),
                responsible: Some("Comissão".to_string()),
                ..Default::default()
            },
            now(),
        )
        .unwrap();

        apply_status(&mut wf, RequestStatus::Rejected, now());

        assert_eq!(wf.steps[2].status, StepStatus::Pending);
        assert_eq!(wf.steps[2].responsible.as_deref(), Some("Comissão"));
    }
}
