use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::api::error_codes;
use crate::db::models::municipality::{
    CreateMunicipalityRequest, Municipality, NewMunicipality, UpdateMunicipality, UpdateMunicipalityRequest,
};
use crate::db::repositories::municipalities::MunicipalitiesRepo;
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::permissions::require_admin;
use crate::validation::rules::normalize_cnpj;

pub struct MunicipalitiesService;

fn cnpj_conflict() -> AppError {
    AppError::conflict_with_code(
        "A municipality with this CNPJ already exists",
        Some("cnpj".to_string()),
        error_codes::MUNICIPALITY_CNPJ_EXISTS,
    )
}

impl MunicipalitiesService {
    pub fn list(conn: &mut PgConnection) -> AppResult<Vec<Municipality>> {
        Ok(MunicipalitiesRepo::list(conn)?)
    }

    pub fn get(conn: &mut PgConnection, id: Uuid) -> AppResult<Municipality> {
        MunicipalitiesRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("municipality"))
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateMunicipalityRequest,
    ) -> AppResult<Municipality> {
        require_admin(&ctx.user)?;
        let cnpj = normalize_cnpj(&req.cnpj);
        if MunicipalitiesRepo::cnpj_taken(conn, &cnpj, None)? {
            return Err(cnpj_conflict());
        }

        let created = MunicipalitiesRepo::insert(
            conn,
            &NewMunicipality {
                name: req.name.trim().to_string(),
                state: req.state.to_ascii_uppercase(),
                cnpj,
            },
        )?;
        tracing::info!(municipality_id = %created.id, created_by = %ctx.user.id, "Municipality created");
        Ok(created)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        req: &UpdateMunicipalityRequest,
    ) -> AppResult<Municipality> {
        require_admin(&ctx.user)?;
        Self::get(conn, id)?;

        let cnpj = req.cnpj.as_deref().map(normalize_cnpj);
        if let Some(cnpj) = &cnpj {
            if MunicipalitiesRepo::cnpj_taken(conn, cnpj, Some(id))? {
                return Err(cnpj_conflict());
            }
        }

        let changes = UpdateMunicipality {
            name: req.name.as_ref().map(|n| n.trim().to_string()),
            state: req.state.as_ref().map(|s| s.to_ascii_uppercase()),
            cnpj,
            updated_at: Some(Utc::now()),
        };
        Ok(MunicipalitiesRepo::update(conn, id, &changes)?)
    }

    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        require_admin(&ctx.user)?;
        if MunicipalitiesRepo::delete_by_id(conn, id)? == 0 {
            return Err(AppError::not_found("municipality"));
        }
        tracing::info!(municipality_id = %id, deleted_by = %ctx.user.id, "Municipality deleted");
        Ok(())
    }
}
