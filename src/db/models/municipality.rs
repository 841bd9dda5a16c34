use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::{validate_cnpj, validate_state_code};

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::municipalities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Municipality {
    pub id: Uuid,
    pub name: String,
    pub state: String,
    pub cnpj: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::municipalities)]
pub struct NewMunicipality {
    pub name: String,
    pub state: String,
    pub cnpj: String,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::municipalities)]
pub struct UpdateMunicipality {
    pub name: Option<String>,
    pub state: Option<String>,
    pub cnpj: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Validate)]
pub struct CreateMunicipalityRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_state_code"))]
    pub state: String,
    #[validate(custom(function = "validate_cnpj"))]
    pub cnpj: String,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateMunicipalityRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_state_code"))]
    pub state: Option<String>,
    #[validate(custom(function = "validate_cnpj"))]
    pub cnpj: Option<String>,
}
