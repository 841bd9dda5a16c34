use diesel::prelude::*;

use crate::db::enums::UserRole;
use crate::db::models::api::error_codes;
use crate::db::models::auth::{
    AuthenticatedUser, CreateUserRequest, LoginRequest, LoginResponse, NewUser, UserResponse,
};
use crate::db::repositories::users::UsersRepo;
use crate::error::{AppError, AppResult};
use crate::middleware::TokenService;
use crate::services::context::RequestContext;
use crate::services::permissions;

pub struct AuthService;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::auth("Invalid email or password")
}

impl AuthService {
    pub fn login(conn: &mut PgConnection, tokens: &TokenService, req: &LoginRequest) -> AppResult<LoginResponse> {
        let email = normalize_email(&req.email);
        let user = UsersRepo::find_by_email(conn, &email)?.ok_or_else(invalid_credentials)?;

        let credential = UsersRepo::find_credential(conn, user.id)?.ok_or_else(invalid_credentials)?;
        if !bcrypt::verify(&req.password, &credential.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid_credentials());
        }
        if !user.active {
            return Err(AppError::forbidden("Account is disabled"));
        }

        let sector_ids = UsersRepo::sector_ids(conn, user.id)?;
        let authenticated = AuthenticatedUser::from_user(user, sector_ids);
        let access_token = tokens.issue(&authenticated)?;
        tracing::info!(user_id = %authenticated.id, role = %authenticated.role, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in(),
            user: authenticated,
        })
    }

    pub fn create_user(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateUserRequest,
        bcrypt_cost: u32,
    ) -> AppResult<UserResponse> {
        permissions::require_admin(&ctx.user)?;
        if req.role != UserRole::Admin && req.sector_ids.is_empty() {
            return Err(AppError::validation("Managers and requesters need at least one sector"));
        }

        let email = normalize_email(&req.email);
        if UsersRepo::exists_by_email(conn, &email)? {
            return Err(AppError::conflict_with_code(
                "Email already exists",
                Some("email".to_string()),
                error_codes::USER_EMAIL_EXISTS,
            ));
        }

        let password_hash = bcrypt::hash(&req.password, bcrypt_cost)?;
        let mut sector_ids = req.sector_ids.clone();
        sector_ids.sort();
        sector_ids.dedup();

        let new_user = NewUser {
            email,
            name: req.name.trim().to_string(),
            role: req.role,
            active: true,
        };
        let user = UsersRepo::insert_with_credential(conn, &new_user, &password_hash, &sector_ids)?;
        tracing::info!(
            request_id = ?ctx.request_id,
            user_id = %user.id,
            role = %user.role,
            created_by = %ctx.user.id,
            "User created"
        );
        Ok(UserResponse::new(user, sector_ids))
    }
}
