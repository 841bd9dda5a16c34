use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::api::error_codes;
use crate::db::models::manager::{
    CreateManagerRequest, Manager, ManagerQuery, NewManager, UpdateManager, UpdateManagerRequest,
};
use crate::db::repositories::managers::ManagersRepo;
use crate::db::repositories::municipalities::MunicipalitiesRepo;
use crate::db::repositories::sectors::SectorsRepo;
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::permissions::require_admin;

pub struct ManagersService;

fn email_conflict() -> AppError {
    AppError::conflict_with_code(
        "A manager with this email already exists",
        Some("email".to_string()),
        error_codes::MANAGER_EMAIL_EXISTS,
    )
}

/// The sector has to exist and belong to the manager's municipality.
fn check_sector(conn: &mut PgConnection, municipality_id: Uuid, sector_id: Uuid) -> AppResult<()> {
    let sector = SectorsRepo::find_by_id(conn, sector_id)?.ok_or_else(|| AppError::not_found("sector"))?;
    if sector.municipality_id != municipality_id {
        return Err(AppError::validation("Sector belongs to another municipality"));
    }
    Ok(())
}

impl ManagersService {
    pub fn list(conn: &mut PgConnection, query: &ManagerQuery) -> AppResult<Vec<Manager>> {
        Ok(ManagersRepo::list(conn, query)?)
    }

    pub fn get(conn: &mut PgConnection, id: Uuid) -> AppResult<Manager> {
        ManagersRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("manager"))
    }

    pub fn create(conn: &mut PgConnection, ctx: &RequestContext, req: &CreateManagerRequest) -> AppResult<Manager> {
        require_admin(&ctx.user)?;
        if MunicipalitiesRepo::find_by_id(conn, req.municipality_id)?.is_none() {
            return Err(AppError::not_found("municipality"));
        }
        if let Some(sector_id) = req.sector_id {
            check_sector(conn, req.municipality_id, sector_id)?;
        }
        let email = req.email.trim().to_lowercase();
        if ManagersRepo::email_taken(conn, &email, None)? {
            return Err(email_conflict());
        }

        let created = ManagersRepo::insert(
            conn,
            &NewManager {
                municipality_id: req.municipality_id,
                sector_id: req.sector_id,
                name: req.name.trim().to_string(),
                email,
                phone: req.phone.as_ref().map(|p| p.trim().to_string()),
                active: true,
            },
        )?;
        tracing::info!(manager_id = %created.id, created_by = %ctx.user.id, "Manager created");
        Ok(created)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        req: &UpdateManagerRequest,
    ) -> AppResult<Manager> {
        require_admin(&ctx.user)?;
        let current = Self::get(conn, id)?;

        if let Some(sector_id) = req.sector_id {
            check_sector(conn, current.municipality_id, sector_id)?;
        }
        let email = req.email.as_ref().map(|e| e.trim().to_lowercase());
        if let Some(email) = &email {
            if ManagersRepo::email_taken(conn, email, Some(id))? {
                return Err(email_conflict());
            }
        }

        let changes = UpdateManager {
            sector_id: req.sector_id.map(Some),
            name: req.name.as_ref().map(|n| n.trim().to_string()),
            email,
            phone: req.phone.as_ref().map(|p| Some(p.trim().to_string())),
            active: req.active,
            updated_at: Some(Utc::now()),
        };
        Ok(ManagersRepo::update(conn, id, &changes)?)
    }

    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        require_admin(&ctx.user)?;
        if ManagersRepo::delete_by_id(conn, id)? == 0 {
            return Err(AppError::not_found("manager"));
        }
        tracing::info!(manager_id = %id, deleted_by = %ctx.user.id, "Manager deleted");
        Ok(())
    }
}
