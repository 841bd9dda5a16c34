use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::municipality::{Municipality, NewMunicipality, UpdateMunicipality};

pub struct MunicipalitiesRepo;

impl MunicipalitiesRepo {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<Municipality>, diesel::result::Error> {
        use crate::schema::municipalities::dsl::*;
        municipalities
            .select(Municipality::as_select())
            .order(name.asc())
            .load(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, target: Uuid) -> Result<Option<Municipality>, diesel::result::Error> {
        use crate::schema::municipalities::dsl::*;
        municipalities
            .find(target)
            .select(Municipality::as_select())
            .first(conn)
            .optional()
    }

    /// Whether another municipality already uses `target_cnpj`.
    pub fn cnpj_taken(
        conn: &mut PgConnection,
        target_cnpj: &str,
        excluding: Option<Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::municipalities::dsl::*;
        let matches: i64 = municipalities
            .filter(cnpj.eq(target_cnpj))
            .filter(id.ne(excluding.unwrap_or_else(Uuid::nil)))
            .count()
            .get_result(conn)?;
        Ok(matches > 0)
    }

    pub fn insert(conn: &mut PgConnection, new: &NewMunicipality) -> Result<Municipality, diesel::result::Error> {
        diesel::insert_into(crate::schema::municipalities::table)
            .values(new)
            .returning(Municipality::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        target: Uuid,
        changes: &UpdateMunicipality,
    ) -> Result<Municipality, diesel::result::Error> {
        use crate::schema::municipalities::dsl::*;
        diesel::update(municipalities.find(target))
            .set(changes)
            .returning(Municipality::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, target: Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::municipalities::dsl::*;
        diesel::delete(municipalities.find(target)).execute(conn)
    }
}
