use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Mayor (prefeito) models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::mayors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Mayor {
    pub id: Uuid,
    pub municipality_id: Uuid,
    pub name: String,
    pub email: String,
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mayor {
    pub fn in_office_on(&self, date: NaiveDate) -> bool {
        self.term_start <= date && date <= self.term_end
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::mayors)]
pub struct NewMayor {
    pub municipality_id: Uuid,
    pub name: String,
    pub email: String,
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::mayors)]
pub struct UpdateMayor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub term_start: Option<NaiveDate>,
    pub term_end: Option<NaiveDate>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Validate)]
pub struct CreateMayorRequest {
    pub municipality_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateMayorRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub term_start: Option<NaiveDate>,
    pub term_end: Option<NaiveDate>,
}

#[derive(Serialize, Clone, Debug)]
pub struct MayorResponse {
    #[serde(flatten)]
    pub mayor: Mayor,
    pub in_office: bool,
}

impl MayorResponse {
    pub fn new(mayor: Mayor, today: NaiveDate) -> Self {
        MayorResponse {
            in_office: mayor.in_office_on(today),
            mayor,
        }
    }
}
