use chrono::{DateTime, Duration, Utc};

use super::{STEP_COUNT, Workflow};
use crate::db::enums::{RequestStatus, StepStatus};

/// Categorical shape of a workflow for one request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    /// Steps `0..completed` are completed.
    pub completed: usize,
    pub in_progress: Option<usize>,
    pub current_step: u8,
    pub percent: u8,
}

pub const fn projection_for(status: RequestStatus) -> Projection {
    match status {
        RequestStatus::Pending => Projection {
            completed: 0,
            in_progress: Some(0),
            current_step: 1,
            percent: 10,
        },
        RequestStatus::UnderReview => Projection {
            completed: 1,
            in_progress: Some(1),
            current_step: 2,
            percent: 25,
        },
        RequestStatus::Approved => Projection {
            completed: 2,
            in_progress: Some(2),
            current_step: 3,
            percent: 40,
        },
        RequestStatus::InProgress => Projection {
            completed: 3,
            in_progress: Some(3),
            current_step: 4,
            percent: 60,
        },
        RequestStatus::Completed => Projection {
            completed: STEP_COUNT,
            in_progress: None,
            current_step: 6,
            percent: 100,
        },
        // Step 2 (approval) is where a rejection lands; it stays pending.
        RequestStatus::Rejected => Projection {
            completed: 2,
            in_progress: None,
            current_step: 2,
            percent: 30,
        },
    }
}

impl Projection {
    pub fn step_status(&self, index: usize) -> StepStatus {
        if index < self.completed {
            StepStatus::Completed
        } else if self.in_progress == Some(index) {
            StepStatus::InProgress
        } else {
            StepStatus::Pending
        }
    }
}

/// Fresh workflow for a request in `status`.
pub fn project(status: RequestStatus, now: DateTime<Utc>) -> Workflow {
    let mut workflow = Workflow::blank();
    apply_status(&mut workflow, status, now);
    workflow
}

/// Re-projects an existing workflow onto `status`.
///
/// Step statuses, `etapa_atual` and `percent` are overwritten from the lookup
/// table; `responsavel` and notes are kept. Timestamps already present on a
/// step that stays in the same state are not touched.
pub fn apply_status(workflow: &mut Workflow, status: RequestStatus, now: DateTime<Utc>) {
    let projection = projection_for(status);

    if status == RequestStatus::Completed {
        backdate_completions(workflow, now);
    }

    for (index, step) in workflow.steps.iter_mut().enumerate() {
        step.set_status(projection.step_status(index), now);
    }

    workflow.current_step = projection.current_step;
    workflow.percent = projection.percent;
}

/// Hours between the completion of step `index - 1` and step `index`.
/// Always within 12..=24 and fixed per index.
fn step_gap_hours(index: usize) -> i64 {
    12 + ((index as i64 * 7) % 13)
}

/// Fills synthetic completion times for steps that were never completed,
/// walking back from `now` so the last step finishes now and earlier ones
/// are spaced 12-24h apart.
///
/// A synthetic time never precedes the completion of an earlier step, so
/// completion times stay in step order even when the real ones are recent.
fn backdate_completions(workflow: &mut Workflow, now: DateTime<Utc>) {
    let mut synthetic = [false; STEP_COUNT];
    let mut cursor = now;
    for index in (0..STEP_COUNT).rev() {
        let step = &mut workflow.steps[index];
        if step.completed_at.is_none() || step.status != StepStatus::Completed {
            synthetic[index] = true;
            step.completed_at = Some(cursor);
            let started = cursor - Duration::hours(step_gap_hours(index));
            if step.started_at.map_or(true, |s| s > cursor) {
                step.started_at = Some(started);
            }
        }
        cursor = step.completed_at.unwrap_or(cursor) - Duration::hours(step_gap_hours(index));
    }

    let mut floor: Option<DateTime<Utc>> = None;
    for (step, synthetic) in workflow.steps.iter_mut().zip(synthetic) {
        if synthetic {
            if let (Some(min), Some(done)) = (floor, step.completed_at) {
                if done < min {
                    step.completed_at = Some(min);
                }
            }
        }
        floor = floor.max(step.completed_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::StepStatus::{Completed as C, InProgress as P, Pending as N};

    fn now() -> DateTime<Utc> {
        "2026-03-10T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn table_matches_every_status() {
        let expected: [(RequestStatus, [StepStatus; 6], u8, u8); 6] = [
            (RequestStatus::Pending, [P, N, N, N, N, N], 1, 10),
            (RequestStatus::UnderReview, [C, P, N, N, N, N], 2, 25),
            (RequestStatus::Approved, [C, C, P, N, N, N], 3, 40),
            (RequestStatus::InProgress, [C, C, C, P, N, N], 4, 60),
            (RequestStatus::Completed, [C, C, C, C, C, C], 6, 100),
            (RequestStatus::Rejected, [C, C, N, N, N, N], 2, 30),
        ];

        for (status, steps, current, percent) in expected {
            let wf = project(status, now());
            assert_eq!(wf.statuses(), steps, "steps for {status}");
            assert_eq!(wf.current_step, current, "etapa_atual for {status}");
            assert_eq!(wf.percent, percent, "percent for {status}");
        }
    }

    #[test]
    fn projecting_twice_keeps_the_categorical_pattern() {
        for status in RequestStatus::ALL {
            let mut wf = project(status, now());
            let first = (wf.statuses(), wf.current_step, wf.percent);
            apply_status(&mut wf, status, now() + Duration::hours(3));
            assert_eq!((wf.statuses(), wf.current_step, wf.percent), first);
        }
    }

    #[test]
    fn pending_to_under_review() {
        let mut wf = project(RequestStatus::Pending, now());
        assert_eq!(wf.statuses(), [P, N, N, N, N, N]);
        assert_eq!(wf.percent, 10);

        let later = now() + Duration::hours(5);
        apply_status(&mut wf, RequestStatus::UnderReview, later);

        assert_eq!(wf.statuses(), [C, P, N, N, N, N]);
        assert_eq!(wf.percent, 25);
        assert_eq!(wf.current_step, 2);
        assert_eq!(wf.steps[0].started_at, Some(now()));
        assert_eq!(wf.steps[0].completed_at, Some(later));
        assert_eq!(wf.steps[1].started_at, Some(later));
        assert_eq!(wf.steps[1].completed_at, None);
    }

    #[test]
    fn rejection_forces_approval_step_back_to_pending() {
        let mut wf = project(RequestStatus::Approved, now());
        wf.steps[2].status = StepStatus::InProgress;
        wf.steps[2].responsible = Some("Ana".to_string());

        apply_status(&mut wf, RequestStatus::Rejected, now());

        assert_eq!(wf.steps[2].status, StepStatus::Pending);
        assert_eq!(wf.steps[2].started_at, None);
        assert_eq!(wf.steps[2].responsible.as_deref(), Some("Ana"));
        assert_eq!(wf.current_step, 2);
        assert_eq!(wf.percent, 30);
    }

    #[test]
    fn completion_backdates_steps_twelve_to_twenty_four_hours_apart() {
        let wf = project(RequestStatus::Completed, now());

        assert_eq!(wf.steps[5].completed_at, Some(now()));
        for pair in wf.steps.windows(2) {
            let earlier = pair[0].completed_at.unwrap();
            let later = pair[1].completed_at.unwrap();
            let gap = later - earlier;
            assert!(gap >= Duration::hours(12) && gap <= Duration::hours(24), "gap {gap}");
        }
        for step in &wf.steps {
            assert!(step.started_at.unwrap() <= step.completed_at.unwrap());
        }
    }

    #[test]
    fn completion_keeps_real_timestamps_of_finished_steps() {
        let mut wf = project(RequestStatus::UnderReview, now());
        let first_done = wf.steps[0].completed_at;

        apply_status(&mut wf, RequestStatus::Completed, now() + Duration::days(10));

        assert_eq!(wf.steps[0].completed_at, first_done);
        assert!(wf.steps.iter().all(|s| s.is_completed()));
        for pair in wf.steps.windows(2) {
            assert!(pair[0].completed_at.unwrap() <= pair[1].completed_at.unwrap());
        }
    }

    #[test]
    fn completion_soon_after_a_real_step_stays_in_order() {
        let mut wf = project(RequestStatus::UnderReview, now());
        let finished = now() + Duration::hours(1);

        apply_status(&mut wf, RequestStatus::Completed, finished);

        assert_eq!(wf.steps[0].completed_at, Some(now()));
        assert_eq!(wf.steps[5].completed_at, Some(finished));
        for pair in wf.steps.windows(2) {
            let earlier = pair[0].completed_at.unwrap();
            let later = pair[1].completed_at.unwrap();
            assert!(earlier <= later, "{earlier} after {later}");
        }
        for step in &wf.steps {
            assert!(step.started_at.unwrap() <= step.completed_at.unwrap());
            assert!(step.completed_at.unwrap() >= now());
        }
    }

    #[test]
    fn gaps_stay_in_range() {
        for i in 0..STEP_COUNT {
            let gap = step_gap_hours(i);
            assert!((12..=24).contains(&gap));
        }
    }
}
