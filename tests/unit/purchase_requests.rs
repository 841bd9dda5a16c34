use chrono::{Duration, Utc};
use gecom::db::enums::{RequestStatus, StepStatus, UserRole};
use gecom::db::models::auth::AuthenticatedUser;
use gecom::db::models::purchase_request::{CreatePurchaseRequest, LineItemInput, UpdatePurchaseRequest};
use gecom::db::repositories::{InMemoryPurchaseRequestRepository, PurchaseRequestRepository};
use gecom::error::AppError;
use gecom::services::{PurchaseRequestsService, RequestContext, WorkflowsService};
use gecom::workflow::StepChanges;
use uuid::Uuid;

fn ctx(role: UserRole, sectors: Vec<Uuid>) -> RequestContext {
    RequestContext::new(AuthenticatedUser {
        id: Uuid::new_v4(),
        email: format!("{}@gecom.test", role),
        name: role.to_string(),
        role,
        sector_ids: sectors,
    })
}

fn payload(sector_id: Uuid) -> CreatePurchaseRequest {
    CreatePurchaseRequest {
        description: "  Material de limpeza  ".to_string(),
        justification: Some("   ".to_string()),
        sector_id,
        funding_source: "Recursos próprios".to_string(),
        total_value: Some(999.0),
        priority: None,
        items: vec![
            LineItemInput {
                description: "Detergente".to_string(),
                quantity: 3.0,
                unit: "CX".to_string(),
                unit_price: 10.1,
            },
            LineItemInput {
                description: "Vassoura".to_string(),
                quantity: 2.0,
                unit: "UN".to_string(),
                unit_price: 15.0,
            },
        ],
    }
}

#[tokio::test]
async fn create_starts_pending_with_projected_workflow() {
    let repo = InMemoryPurchaseRequestRepository::new();
    let sector = Uuid::new_v4();
    let requester = ctx(UserRole::Requester, vec![sector]);
    let now = Utc::now();

    let created = PurchaseRequestsService::create(&repo, &requester, payload(sector), now)
        .await
        .unwrap();

    assert_eq!(created.status, RequestStatus::Pending);
    assert!(created.number.ends_with("-0001"));
    assert_eq!(created.description, "Material de limpeza");
    assert!(created.justification.is_none());
    assert_eq!(created.total_value, 60.3);
    assert_eq!(created.requester_id, requester.user.id);
    let workflow = created.workflow.unwrap();
    assert_eq!(workflow.percent, 10);
    assert_eq!(workflow.steps[0].status, StepStatus::InProgress);

    let second = PurchaseRequestsService::create(&repo, &requester, payload(sector), now)
        .await
        .unwrap();
    assert!(second.number.ends_with("-0002"));
}

#[tokio::test]
async fn create_outside_own_sector_is_forbidden() {
    let repo = InMemoryPurchaseRequestRepository::new();
    let requester = ctx(UserRole::Requester, vec![Uuid::new_v4()]);

    let err = PurchaseRequestsService::create(&repo, &requester, payload(Uuid::new_v4()), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));
}

#[tokio::test]
async fn status_change_reprojects_and_terminal_is_final_for_managers() {
    let repo = InMemoryPurchaseRequestRepository::new();
    let sector = Uuid::new_v4();
    let requester = ctx(UserRole::Requester, vec![sector]);
    let manager = ctx(UserRole::Manager, vec![sector]);
    let admin = ctx(UserRole::Admin, vec![]);
    let now = Utc::now();

    let created = PurchaseRequestsService::create(&repo, &requester, payload(sector), now)
        .await
        .unwrap();

    let err = PurchaseRequestsService::update_status(&repo, &requester, created.id, RequestStatus::Approved, now)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));

    let approved = PurchaseRequestsService::update_status(
        &repo,
        &manager,
        created.id,
        RequestStatus::Approved,
        now + Duration::hours(1),
    )
    .await
    .unwrap();
    assert_eq!(approved.workflow.as_ref().unwrap().percent, 40);

    let completed = PurchaseRequestsService::update_status(
        &repo,
        &manager,
        created.id,
        RequestStatus::Completed,
        now + Duration::days(3),
    )
    .await
    .unwrap();
    let workflow = completed.workflow.unwrap();
    assert_eq!(workflow.percent, 100);
    assert!(workflow.steps.iter().all(|s| s.completed_at.is_some()));

    let err = PurchaseRequestsService::update_status(&repo, &manager, created.id, RequestStatus::Rejected, now)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    let reopened = PurchaseRequestsService::update_status(&repo, &admin, created.id, RequestStatus::InProgress, now)
        .await
        .unwrap();
    assert_eq!(reopened.workflow.unwrap().current_step, 4);
}

#[tokio::test]
async fn missing_workflow_is_created_on_status_change() {
    let repo = InMemoryPurchaseRequestRepository::new();
    let sector = Uuid::new_v4();
    let manager = ctx(UserRole::Manager, vec![sector]);
    let now = Utc::now();

    let mut created = PurchaseRequestsService::create(&repo, &manager, payload(sector), now)
        .await
        .unwrap();
    created.workflow = None;
    repo.update(created.clone()).await.unwrap();

    let view = WorkflowsService::get(&repo, &manager, created.id).await.unwrap();
    assert_eq!(view.workflow.percent, 10);
    assert!(repo.find(created.id).await.unwrap().unwrap().workflow.is_none());

    let updated = PurchaseRequestsService::update_status(&repo, &manager, created.id, RequestStatus::UnderReview, now)
        .await
        .unwrap();
    assert_eq!(updated.workflow.unwrap().percent, 25);
}

#[tokio::test]
async fn step_edit_keeps_status_and_percent() {
    let repo = InMemoryPurchaseRequestRepository::new();
    let sector = Uuid::new_v4();
    let manager = ctx(UserRole::Manager, vec![sector]);
    let now = Utc::now();

    let created = PurchaseRequestsService::create(&repo, &manager, payload(sector), now)
        .await
        .unwrap();
    let view = WorkflowsService::edit_step(
        &repo,
        &manager,
        created.id,
        0,
        StepChanges {
            status: Some(StepStatus::Completed),
            responsible: Some("Almoxarifado".to_string()),
            notes: None,
        },
        now,
    )
    .await
    .unwrap();

    assert_eq!(view.status, RequestStatus::Pending);
    assert_eq!(view.workflow.percent, 10);
    assert_eq!(view.step_progress, 17);
    assert_eq!(view.editable, [true, true, false, false, false, false]);

    let err = WorkflowsService::edit_step(&repo, &manager, created.id, 4, StepChanges::default(), now)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn requester_loses_edit_rights_after_review_starts() {
    let repo = InMemoryPurchaseRequestRepository::new();
    let sector = Uuid::new_v4();
    let requester = ctx(UserRole::Requester, vec![sector]);
    let manager = ctx(UserRole::Manager, vec![sector]);
    let outsider = ctx(UserRole::Manager, vec![Uuid::new_v4()]);
    let now = Utc::now();

    let created = PurchaseRequestsService::create(&repo, &requester, payload(sector), now)
        .await
        .unwrap();

    let edit = UpdatePurchaseRequest {
        description: Some("Material de limpeza e higiene".to_string()),
        ..Default::default()
    };
    let updated = PurchaseRequestsService::update(&repo, &requester, created.id, edit.clone(), now)
        .await
        .unwrap();
    assert_eq!(updated.description, "Material de limpeza e higiene");

    PurchaseRequestsService::update_status(&repo, &manager, created.id, RequestStatus::UnderReview, now)
        .await
        .unwrap();
    let err = PurchaseRequestsService::update(&repo, &requester, created.id, edit, now)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));

    let err = PurchaseRequestsService::get(&repo, &outsider, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = PurchaseRequestsService::delete(&repo, &requester, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));
}
