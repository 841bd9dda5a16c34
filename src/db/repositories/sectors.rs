use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::sector::{NewSector, Sector, UpdateSector};

pub struct SectorsRepo;

impl SectorsRepo {
    pub fn list(conn: &mut PgConnection, municipality: Option<Uuid>) -> Result<Vec<Sector>, diesel::result::Error> {
        use crate::schema::sectors::dsl::*;
        let mut query = sectors.select(Sector::as_select()).into_boxed();
        if let Some(target) = municipality {
            query = query.filter(municipality_id.eq(target));
        }
        query.order(name.asc()).load(conn)
    }

    pub fn list_active(conn: &mut PgConnection) -> Result<Vec<Sector>, diesel::result::Error> {
        use crate::schema::sectors::dsl::*;
        sectors
            .filter(active.eq(true))
            .select(Sector::as_select())
            .order(name.asc())
            .load(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, target: Uuid) -> Result<Option<Sector>, diesel::result::Error> {
        use crate::schema::sectors::dsl::*;
        sectors.find(target).select(Sector::as_select()).first(conn).optional()
    }

    pub fn name_taken(
        conn: &mut PgConnection,
        municipality: Uuid,
        target_name: &str,
        excluding: Option<Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::sectors::dsl::*;
        let matches: i64 = sectors
            .filter(municipality_id.eq(municipality))
            .filter(name.ilike(target_name))
            .filter(id.ne(excluding.unwrap_or_else(Uuid::nil)))
            .count()
            .get_result(conn)?;
        Ok(matches > 0)
    }

    pub fn insert(conn: &mut PgConnection, new: &NewSector) -> Result<Sector, diesel::result::Error> {
        diesel::insert_into(crate::schema::sectors::table)
            .values(new)
            .returning(Sector::as_returning())
            .get_result(conn)
    }

    pub fn update(conn: &mut PgConnection, target: Uuid, changes: &UpdateSector) -> Result<Sector, diesel::result::Error> {
        use crate::schema::sectors::dsl::*;
        diesel::update(sectors.find(target))
            .set(changes)
            .returning(Sector::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, target: Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::sectors::dsl::*;
        diesel::delete(sectors.find(target)).execute(conn)
    }
}
