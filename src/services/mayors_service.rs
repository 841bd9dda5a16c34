use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::api::error_codes;
use crate::db::models::mayor::{CreateMayorRequest, Mayor, NewMayor, UpdateMayor, UpdateMayorRequest};
use crate::db::repositories::mayors::MayorsRepo;
use crate::db::repositories::municipalities::MunicipalitiesRepo;
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::permissions::require_admin;
use crate::validation::mayor::{terms_overlap, validate_term};

pub struct MayorsService;

/// One municipality has at most one mayor on any given day.
fn check_overlap(
    conn: &mut PgConnection,
    municipality_id: Uuid,
    term: (NaiveDate, NaiveDate),
    excluding: Option<Uuid>,
) -> AppResult<()> {
    let clash = MayorsRepo::list_for_municipality(conn, municipality_id)?
        .into_iter()
        .filter(|m| Some(m.id) != excluding)
        .any(|m| terms_overlap((m.term_start, m.term_end), term));
    if clash {
        return Err(AppError::conflict_with_code(
            "Term overlaps another mayor of this municipality",
            Some("term_start".to_string()),
            error_codes::MAYOR_TERM_OVERLAP,
        ));
    }
    Ok(())
}

impl MayorsService {
    pub fn list(conn: &mut PgConnection, municipality_id: Option<Uuid>) -> AppResult<Vec<Mayor>> {
        Ok(MayorsRepo::list(conn, municipality_id)?)
    }

    pub fn get(conn: &mut PgConnection, id: Uuid) -> AppResult<Mayor> {
        MayorsRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("mayor"))
    }

    pub fn create(conn: &mut PgConnection, ctx: &RequestContext, req: &CreateMayorRequest) -> AppResult<Mayor> {
        require_admin(&ctx.user)?;
        validate_term(req.term_start, req.term_end)?;
        if MunicipalitiesRepo::find_by_id(conn, req.municipality_id)?.is_none() {
            return Err(AppError::not_found("municipality"));
        }
        check_overlap(conn, req.municipality_id, (req.term_start, req.term_end), None)?;

        let created = MayorsRepo::insert(
            conn,
            &NewMayor {
                municipality_id: req.municipality_id,
                name: req.name.trim().to_string(),
                email: req.email.trim().to_lowercase(),
                term_start: req.term_start,
                term_end: req.term_end,
            },
        )?;
        tracing::info!(mayor_id = %created.id, created_by = %ctx.user.id, "Mayor created");
        Ok(created)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        req: &UpdateMayorRequest,
    ) -> AppResult<Mayor> {
        require_admin(&ctx.user)?;
        let current = Self::get(conn, id)?;

        if req.term_start.is_some() || req.term_end.is_some() {
            let term = (
                req.term_start.unwrap_or(current.term_start),
                req.term_end.unwrap_or(current.term_end),
            );
            validate_term(term.0, term.1)?;
            check_overlap(conn, current.municipality_id, term, Some(id))?;
        }

        let changes = UpdateMayor {
            name: req.name.as_ref().map(|n| n.trim().to_string()),
            email: req.email.as_ref().map(|e| e.trim().to_lowercase()),
            term_start: req.term_start,
            term_end: req.term_end,
            updated_at: Some(Utc::now()),
        };
        Ok(MayorsRepo::update(conn, id, &changes)?)
    }

    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        require_admin(&ctx.user)?;
        if MayorsRepo::delete_by_id(conn, id)? == 0 {
            return Err(AppError::not_found("mayor"));
        }
        tracing::info!(mayor_id = %id, deleted_by = %ctx.user.id, "Mayor deleted");
        Ok(())
    }
}
