use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::auth::{NewUser, User, UserCredential, UserSector};

pub struct UsersRepo;

impl UsersRepo {
    pub fn find_by_email(conn: &mut PgConnection, target_email: &str) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(target_email))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_id(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.find(user_id).select(User::as_select()).first(conn).optional()
    }

    pub fn exists_by_email(conn: &mut PgConnection, target_email: &str) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(users.filter(email.eq(target_email)))).get_result(conn)
    }

    pub fn find_credential(
        conn: &mut PgConnection,
        target_user: Uuid,
    ) -> Result<Option<UserCredential>, diesel::result::Error> {
        use crate::schema::user_credentials::dsl::*;
        user_credentials
            .find(target_user)
            .select(UserCredential::as_select())
            .first(conn)
            .optional()
    }

    pub fn sector_ids(conn: &mut PgConnection, target_user: Uuid) -> Result<Vec<Uuid>, diesel::result::Error> {
        use crate::schema::user_sectors::dsl::*;
        user_sectors
            .filter(user_id.eq(target_user))
            .select(sector_id)
            .order(sector_id.asc())
            .load(conn)
    }

    /// Creates the user, its password and its sector links in one transaction.
    pub fn insert_with_credential(
        conn: &mut PgConnection,
        new_user: &NewUser,
        password_hash: &str,
        sectors: &[Uuid],
    ) -> Result<User, diesel::result::Error> {
        conn.transaction(|conn| {
            let user: User = diesel::insert_into(crate::schema::users::table)
                .values(new_user)
                .returning(User::as_returning())
                .get_result(conn)?;

            diesel::insert_into(crate::schema::user_credentials::table)
                .values(&UserCredential {
                    user_id: user.id,
                    password_hash: password_hash.to_string(),
                    updated_at: user.created_at,
                })
                .execute(conn)?;

            let links: Vec<UserSector> = sectors
                .iter()
                .map(|sector| UserSector {
                    user_id: user.id,
                    sector_id: *sector,
                })
                .collect();
            if !links.is_empty() {
                diesel::insert_into(crate::schema::user_sectors::table)
                    .values(&links)
                    .execute(conn)?;
            }
            Ok(user)
        })
    }
}
