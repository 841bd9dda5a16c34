use chrono::{Duration, TimeZone, Utc};
use gecom::db::enums::{RequestStatus, StepStatus};
use gecom::workflow::{StepChanges, apply_status, can_edit_step, edit_step, project};

#[test]
fn projection_drives_percent_and_current_step() {
    let now = Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap();
    let expected = [
        (RequestStatus::Pending, 1, 10),
        (RequestStatus::UnderReview, 2, 25),
        (RequestStatus::Approved, 3, 40),
        (RequestStatus::InProgress, 4, 60),
        (RequestStatus::Completed, 6, 100),
        (RequestStatus::Rejected, 2, 30),
    ];
    for (status, step, percent) in expected {
        let wf = project(status, now);
        assert_eq!(wf.current_step, step, "{status}");
        assert_eq!(wf.percent, percent, "{status}");
        assert_eq!(wf.steps.len(), 6);
    }
}

#[test]
fn manual_edit_never_moves_the_percentage() {
    let now = Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap();
    let mut wf = project(RequestStatus::UnderReview, now);

    edit_step(
        &mut wf,
        1,
        StepChanges {
            status: Some(StepStatus::Completed),
            responsible: Some("Controladoria".to_string()),
            notes: None,
        },
        now + Duration::hours(2),
    )
    .unwrap();

    assert_eq!(wf.percent, 25);
    assert_eq!(wf.current_step, 2);
    assert_eq!(wf.step_progress(), 33);
    assert!(can_edit_step(&wf.steps, 2));

    // The next status change wins over the manual edit.
    apply_status(&mut wf, RequestStatus::Rejected, now + Duration::hours(3));
    assert_eq!(wf.steps[2].status, StepStatus::Pending);
    assert_eq!(wf.percent, 30);
    assert_eq!(wf.steps[1].responsible.as_deref(), Some("Controladoria"));
}

#[test]
fn locked_steps_reject_edits() {
    let now = Utc::now();
    let mut wf = project(RequestStatus::Pending, now);
    let err = edit_step(
        &mut wf,
        3,
        StepChanges {
            notes: Some("cedo demais".to_string()),
            ..Default::default()
        },
        now,
    )
    .unwrap_err();
    assert!(err.to_string().contains("step 3"));
    assert!(wf.steps[3].notes.is_none());
}
