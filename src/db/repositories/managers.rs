use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::manager::{Manager, ManagerQuery, NewManager, UpdateManager};

pub struct ManagersRepo;

impl ManagersRepo {
    pub fn list(conn: &mut PgConnection, filter: &ManagerQuery) -> Result<Vec<Manager>, diesel::result::Error> {
        use crate::schema::managers::dsl::*;
        let mut query = managers.select(Manager::as_select()).into_boxed();
        if let Some(target) = filter.municipality_id {
            query = query.filter(municipality_id.eq(target));
        }
        if let Some(target) = filter.sector_id {
            query = query.filter(sector_id.eq(target));
        }
        query.order(name.asc()).load(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, target: Uuid) -> Result<Option<Manager>, diesel::result::Error> {
        use crate::schema::managers::dsl::*;
        managers.find(target).select(Manager::as_select()).first(conn).optional()
    }

    pub fn email_taken(
        conn: &mut PgConnection,
        target_email: &str,
        excluding: Option<Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::managers::dsl::*;
        let matches: i64 = managers
            .filter(email.eq(target_email))
            .filter(id.ne(excluding.unwrap_or_else(Uuid::nil)))
            .count()
            .get_result(conn)?;
        Ok(matches > 0)
    }

    pub fn insert(conn: &mut PgConnection, new: &NewManager) -> Result<Manager, diesel::result::Error> {
        diesel::insert_into(crate::schema::managers::table)
            .values(new)
            .returning(Manager::as_returning())
            .get_result(conn)
    }

    pub fn update(conn: &mut PgConnection, target: Uuid, changes: &UpdateManager) -> Result<Manager, diesel::result::Error> {
        use crate::schema::managers::dsl::*;
        diesel::update(managers.find(target))
            .set(changes)
            .returning(Manager::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, target: Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::managers::dsl::*;
        diesel::delete(managers.find(target)).execute(conn)
    }
}
