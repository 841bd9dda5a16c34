use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::dashboard::SectorBudget;
use crate::db::models::api::error_codes;
use crate::db::models::sector::{CreateSectorRequest, NewSector, Sector, UpdateSector, UpdateSectorRequest};
use crate::db::repositories::municipalities::MunicipalitiesRepo;
use crate::db::repositories::sectors::SectorsRepo;
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::permissions::require_admin;

pub struct SectorsService;

fn name_conflict() -> AppError {
    AppError::conflict_with_code(
        "A sector with this name already exists in the municipality",
        Some("name".to_string()),
        error_codes::SECTOR_NAME_EXISTS,
    )
}

impl SectorsService {
    pub fn list(conn: &mut PgConnection, municipality_id: Option<Uuid>) -> AppResult<Vec<Sector>> {
        Ok(SectorsRepo::list(conn, municipality_id)?)
    }

    pub fn get(conn: &mut PgConnection, id: Uuid) -> AppResult<Sector> {
        SectorsRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("sector"))
    }

    /// Planned budgets of every active sector.
    pub fn budgets(conn: &mut PgConnection) -> AppResult<Vec<SectorBudget>> {
        Ok(SectorsRepo::list_active(conn)?.iter().map(SectorBudget::from).collect())
    }

    pub fn create(conn: &mut PgConnection, ctx: &RequestContext, req: &CreateSectorRequest) -> AppResult<Sector> {
        require_admin(&ctx.user)?;
        if MunicipalitiesRepo::find_by_id(conn, req.municipality_id)?.is_none() {
            return Err(AppError::not_found("municipality"));
        }
        let name = req.name.trim().to_string();
        if SectorsRepo::name_taken(conn, req.municipality_id, &name, None)? {
            return Err(name_conflict());
        }

        let created = SectorsRepo::insert(
            conn,
            &NewSector {
                municipality_id: req.municipality_id,
                name,
                kind: req.kind,
                planned_budget: req.planned_budget,
                active: true,
            },
        )?;
        tracing::info!(sector_id = %created.id, created_by = %ctx.user.id, "Sector created");
        Ok(created)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        req: &UpdateSectorRequest,
    ) -> AppResult<Sector> {
        require_admin(&ctx.user)?;
        let current = Self::get(conn, id)?;

        let name = req.name.as_ref().map(|n| n.trim().to_string());
        if let Some(name) = &name {
            if SectorsRepo::name_taken(conn, current.municipality_id, name, Some(id))? {
                return Err(name_conflict());
            }
        }

        let changes = UpdateSector {
            name,
            kind: req.kind,
            planned_budget: req.planned_budget,
            active: req.active,
            updated_at: Some(Utc::now()),
        };
        Ok(SectorsRepo::update(conn, id, &changes)?)
    }

    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        require_admin(&ctx.user)?;
        if SectorsRepo::delete_by_id(conn, id)? == 0 {
            return Err(AppError::not_found("sector"));
        }
        tracing::info!(sector_id = %id, deleted_by = %ctx.user.id, "Sector deleted");
        Ok(())
    }
}
