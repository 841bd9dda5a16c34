//! Six-step workflow tracking for purchase requests.
//!
//! The workflow is a projection of [`RequestStatus`]: the step pattern,
//! `etapa_atual` and the completion percentage are all looked up from the
//! status (see [`projector`]). Manual step edits ([`editor`]) may touch the
//! steps but never feed back into the status or the percentage.

pub mod editor;
pub mod gate;
pub mod projector;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::enums::{StepKind, StepStatus};

pub use editor::{StepChanges, edit_step};
pub use gate::{can_edit_step, editable_steps};
pub use projector::{Projection, apply_status, project, projection_for};

pub const STEP_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub kind: StepKind,
    pub status: StepStatus,
    #[serde(rename = "data_inicio")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "data_conclusao")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(rename = "responsavel")]
    pub responsible: Option<String>,
    pub notes: Option<String>,
}

impl WorkflowStep {
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            status: StepStatus::Pending,
            started_at: None,
            completed_at: None,
            responsible: None,
            notes: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == StepStatus::Completed
    }

    /// Moves the step to `status`, keeping timestamps consistent with it.
    pub(crate) fn set_status(&mut self, status: StepStatus, now: DateTime<Utc>) {
        match status {
            StepStatus::Pending => {
                self.started_at = None;
                self.completed_at = None;
            }
            StepStatus::InProgress => {
                self.started_at.get_or_insert(now);
                self.completed_at = None;
            }
            StepStatus::Completed => {
                self.completed_at.get_or_insert(now);
                if self.started_at.is_none() {
                    self.started_at = self.completed_at;
                }
            }
        }
        self.status = status;
    }
}

/// Derived view of a request's progress. Step identity and order are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub steps: [WorkflowStep; STEP_COUNT],
    #[serde(rename = "etapa_atual")]
    pub current_step: u8,
    pub percent: u8,
}

impl Workflow {
    /// A workflow with every step pending. Callers normally go through
    /// [`project`] instead.
    pub fn blank() -> Self {
        Self {
            steps: StepKind::ALL.map(WorkflowStep::new),
            current_step: 1,
            percent: 0,
        }
    }

    pub fn statuses(&self) -> [StepStatus; STEP_COUNT] {
        self.steps.each_ref().map(|s| s.status)
    }

    /// Progress measured from the step statuses alone:
    /// `(completed + 0.5 * in_progress) / total * 100`, rounded.
    ///
    /// Informational only. The request status is never inferred from it.
    pub fn step_progress(&self) -> u8 {
        let (completed, in_progress) =
            self.steps
                .iter()
                .fold((0u32, 0u32), |(c, p), step| match step.status {
                    StepStatus::Completed => (c + 1, p),
                    StepStatus::InProgress => (c, p + 1),
                    StepStatus::Pending => (c, p),
                });
        let half_steps = completed * 2 + in_progress;
        let total_half_steps = (STEP_COUNT as u32) * 2;
        ((half_steps * 100 + total_half_steps / 2) / total_half_steps) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("step index {index} is out of range")]
    StepOutOfRange { index: usize },

    #[error("step {index} cannot be edited until all previous steps are completed")]
    StepLocked { index: usize },

    #[error("no changes provided for step {index}")]
    EmptyEdit { index: usize },
}
