use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::validate_phone;

// Manager (gestor) models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::managers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Manager {
    pub id: Uuid,
    pub municipality_id: Uuid,
    pub sector_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::managers)]
pub struct NewManager {
    pub municipality_id: Uuid,
    pub sector_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub active: bool,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::managers)]
pub struct UpdateManager {
    pub sector_id: Option<Option<Uuid>>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub active: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Validate)]
pub struct CreateManagerRequest {
    pub municipality_id: Uuid,
    pub sector_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateManagerRequest {
    pub sector_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    pub active: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct ManagerQuery {
    pub municipality_id: Option<Uuid>,
    pub sector_id: Option<Uuid>,
}
