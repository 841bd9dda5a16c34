use super::{STEP_COUNT, WorkflowStep};

/// Step 0 is always editable; step `i > 0` only once every earlier step is
/// completed. Indexes past the end are never editable.
pub fn can_edit_step(steps: &[WorkflowStep], index: usize) -> bool {
    if index >= steps.len() {
        return false;
    }
    steps[..index].iter().all(WorkflowStep::is_completed)
}

pub fn editable_steps(steps: &[WorkflowStep; STEP_COUNT]) -> [bool; STEP_COUNT] {
    std::array::from_fn(|i| can_edit_step(steps, i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::{RequestStatus, StepStatus};
    use crate::workflow::{Workflow, project};

    fn with_statuses(statuses: [StepStatus; STEP_COUNT]) -> Workflow {
        let mut wf = Workflow::blank();
        for (step, status) in wf.steps.iter_mut().zip(statuses) {
            step.status = status;
        }
        wf
    }

    #[test]
    fn first_step_is_always_editable() {
        for status in [StepStatus::Pending, StepStatus::InProgress, StepStatus::Completed] {
            let wf = with_statuses([status; STEP_COUNT]);
            assert!(can_edit_step(&wf.steps, 0));
        }
    }

    #[test]
    fn later_steps_need_every_previous_step_completed() {
        use StepStatus::{Completed as C, InProgress as P, Pending as N};

        let wf = with_statuses([C, C, P, N, N, N]);
        assert!(can_edit_step(&wf.steps, 1));
        assert!(can_edit_step(&wf.steps, 2));
        assert!(!can_edit_step(&wf.steps, 3));
        assert!(!can_edit_step(&wf.steps, 5));

        // A gap anywhere before the index locks it.
        let wf = with_statuses([C, N, C, C, C, C]);
        assert!(can_edit_step(&wf.steps, 1));
        assert!(!can_edit_step(&wf.steps, 2));
        assert!(!can_edit_step(&wf.steps, 5));
    }

    #[test]
    fn out_of_range_is_not_editable() {
        let wf = Workflow::blank();
        assert!(!can_edit_step(&wf.steps, STEP_COUNT));
        assert!(!can_edit_step(&[], 0));
    }

    #[test]
    fn editable_flags_follow_the_projection() {
        let wf = project(RequestStatus::Approved, chrono::Utc::now());
        assert_eq!(editable_steps(&wf.steps), [true, true, true, false, false, false]);

        let wf = project(RequestStatus::Completed, chrono::Utc::now());
        assert_eq!(editable_steps(&wf.steps), [true; STEP_COUNT]);
    }
}
