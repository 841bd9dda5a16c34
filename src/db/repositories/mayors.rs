use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::mayor::{Mayor, NewMayor, UpdateMayor};

pub struct MayorsRepo;

impl MayorsRepo {
    pub fn list(conn: &mut PgConnection, municipality: Option<Uuid>) -> Result<Vec<Mayor>, diesel::result::Error> {
        use crate::schema::mayors::dsl::*;
        let mut query = mayors.select(Mayor::as_select()).into_boxed();
        if let Some(target) = municipality {
            query = query.filter(municipality_id.eq(target));
        }
        query.order(term_start.desc()).load(conn)
    }

    pub fn list_for_municipality(conn: &mut PgConnection, municipality: Uuid) -> Result<Vec<Mayor>, diesel::result::Error> {
        Self::list(conn, Some(municipality))
    }

    pub fn find_by_id(conn: &mut PgConnection, target: Uuid) -> Result<Option<Mayor>, diesel::result::Error> {
        use crate::schema::mayors::dsl::*;
        mayors.find(target).select(Mayor::as_select()).first(conn).optional()
    }

    pub fn insert(conn: &mut PgConnection, new: &NewMayor) -> Result<Mayor, diesel::result::Error> {
        diesel::insert_into(crate::schema::mayors::table)
            .values(new)
            .returning(Mayor::as_returning())
            .get_result(conn)
    }

    pub fn update(conn: &mut PgConnection, target: Uuid, changes: &UpdateMayor) -> Result<Mayor, diesel::result::Error> {
        use crate::schema::mayors::dsl::*;
        diesel::update(mayors.find(target))
            .set(changes)
            .returning(Mayor::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, target: Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::mayors::dsl::*;
        diesel::delete(mayors.find(target)).execute(conn)
    }
}
