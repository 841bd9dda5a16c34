//! Role checks. All of them are pure functions of the caller and the
//! record involved.

use uuid::Uuid;

use crate::db::enums::{RequestStatus, UserRole};
use crate::db::models::auth::AuthenticatedUser;
use crate::db::models::purchase_request::PurchaseRequest;
use crate::error::{AppError, AppResult};

fn manages(user: &AuthenticatedUser, sector_id: Uuid) -> bool {
    user.role == UserRole::Manager && user.belongs_to(sector_id)
}

fn is_pending_requester(user: &AuthenticatedUser, request: &PurchaseRequest) -> bool {
    request.requester_id == user.id && request.status == RequestStatus::Pending
}

/// Sectors whose requests the user may see; `None` means all of them.
pub fn visible_sectors(user: &AuthenticatedUser) -> Option<Vec<Uuid>> {
    if user.is_admin() {
        None
    } else {
        Some(user.sector_ids.clone())
    }
}

pub fn can_view_request(user: &AuthenticatedUser, request: &PurchaseRequest) -> bool {
    user.is_admin() || user.belongs_to(request.sector_id)
}

pub fn can_create_request(user: &AuthenticatedUser, sector_id: Uuid) -> bool {
    user.is_admin() || user.belongs_to(sector_id)
}

pub fn can_edit_request(user: &AuthenticatedUser, request: &PurchaseRequest) -> bool {
    user.is_admin() || manages(user, request.sector_id) || is_pending_requester(user, request)
}

/// Also governs manual workflow step edits. Completed and Rejected are
/// final for managers; only an admin can move a request out of them.
pub fn can_change_status(user: &AuthenticatedUser, request: &PurchaseRequest) -> bool {
    user.is_admin() || (manages(user, request.sector_id) && !request.status.is_terminal())
}

pub fn can_delete_request(user: &AuthenticatedUser, request: &PurchaseRequest) -> bool {
    user.is_admin() || is_pending_requester(user, request)
}

pub fn require_admin(user: &AuthenticatedUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Administrator access required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::Priority;
    use chrono::Utc;

    fn user(role: UserRole, sectors: Vec<Uuid>) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "user@gecom.test".to_string(),
            name: "User".to_string(),
            role,
            sector_ids: sectors,
        }
    }

    fn request(sector_id: Uuid, requester_id: Uuid, status: RequestStatus) -> PurchaseRequest {
        let now = Utc::now();
        PurchaseRequest {
            id: Uuid::new_v4(),
            number: "DFD-2026-0001".to_string(),
            description: "Cadeiras".to_string(),
            justification: None,
            sector_id,
            requester_id,
            funding_source: "Tesouro".to_string(),
            total_value: 100.0,
            priority: Priority::Low,
            status,
            items: Vec::new(),
            workflow: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_admin_sees_everything() {
        let admin = user(UserRole::Admin, vec![]);
        let req = request(Uuid::new_v4(), Uuid::new_v4(), RequestStatus::Completed);
        assert!(visible_sectors(&admin).is_none());
        assert!(can_view_request(&admin, &req));
        assert!(can_change_status(&admin, &req));
        assert!(can_delete_request(&admin, &req));
        assert!(require_admin(&admin).is_ok());
    }

    #[test]
    fn test_manager_is_bound_to_sector_and_terminal_states() {
        let sector = Uuid::new_v4();
        let manager = user(UserRole::Manager, vec![sector]);
        let open = request(sector, Uuid::new_v4(), RequestStatus::Approved);
        let closed = request(sector, Uuid::new_v4(), RequestStatus::Rejected);
        let elsewhere = request(Uuid::new_v4(), Uuid::new_v4(), RequestStatus::Pending);

        assert!(can_change_status(&manager, &open));
        assert!(can_edit_request(&manager, &open));
        assert!(!can_change_status(&manager, &closed));
        assert!(!can_view_request(&manager, &elsewhere));
        assert!(!can_change_status(&manager, &elsewhere));
        assert!(!can_delete_request(&manager, &open));
        assert!(require_admin(&manager).is_err());
    }

    #[test]
    fn test_requester_edits_only_own_pending_requests() {
        let sector = Uuid::new_v4();
        let requester = user(UserRole::Requester, vec![sector]);
        let own = request(sector, requester.id, RequestStatus::Pending);
        let mut reviewed = own.clone();
        reviewed.status = RequestStatus::UnderReview;
        let colleague = request(sector, Uuid::new_v4(), RequestStatus::Pending);

        assert!(can_create_request(&requester, sector));
        assert!(!can_create_request(&requester, Uuid::new_v4()));
        assert!(can_edit_request(&requester, &own));
        assert!(can_delete_request(&requester, &own));
        assert!(!can_edit_request(&requester, &reviewed));
        assert!(!can_edit_request(&requester, &colleague));
        assert!(can_view_request(&requester, &colleague));
        assert!(!can_change_status(&requester, &own));
    }
}
