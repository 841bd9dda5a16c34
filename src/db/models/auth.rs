use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::UserRole;
use crate::error::AppError;
use crate::validation::rules::validate_password_strength;

// User models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub active: bool,
}

#[derive(Queryable, Selectable, Insertable, Clone)]
#[diesel(table_name = crate::schema::user_credentials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserCredential {
    pub user_id: Uuid,
    pub password_hash: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::user_sectors)]
pub struct UserSector {
    pub user_id: Uuid,
    pub sector_id: Uuid,
}

/// The caller of a request, as proven by its access token. Every permission
/// check takes one of these explicitly.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub sector_ids: Vec<Uuid>,
}

impl AuthenticatedUser {
    pub fn from_user(user: User, sector_ids: Vec<Uuid>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            sector_ids,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn belongs_to(&self, sector_id: Uuid) -> bool {
        self.sector_ids.contains(&sector_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::auth("Missing or invalid access token"))
    }
}

// Authentication DTOs
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: AuthenticatedUser,
}

#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    pub role: UserRole,

    #[serde(default)]
    pub sector_ids: Vec<Uuid>,
}

#[derive(Serialize, Clone, Debug)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub active: bool,
    pub sector_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn new(user: User, sector_ids: Vec<Uuid>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            active: user.active,
            sector_ids,
            created_at: user.created_at,
        }
    }
}
