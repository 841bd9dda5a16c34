use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::SectorKind;
use crate::dashboard::SectorBudget;

// Sector (secretaria) models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::sectors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Sector {
    pub id: Uuid,
    pub municipality_id: Uuid,
    pub name: String,
    pub kind: SectorKind,
    pub planned_budget: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sectors)]
pub struct NewSector {
    pub municipality_id: Uuid,
    pub name: String,
    pub kind: SectorKind,
    pub planned_budget: f64,
    pub active: bool,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::sectors)]
pub struct UpdateSector {
    pub name: Option<String>,
    pub kind: Option<SectorKind>,
    pub planned_budget: Option<f64>,
    pub active: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Validate)]
pub struct CreateSectorRequest {
    pub municipality_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    pub kind: SectorKind,
    #[validate(range(min = 0.0, max = 1e12, message = "Planned budget must be between 0 and 1e12"))]
    pub planned_budget: f64,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateSectorRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub kind: Option<SectorKind>,
    #[validate(range(min = 0.0, max = 1e12, message = "Planned budget must be between 0 and 1e12"))]
    pub planned_budget: Option<f64>,
    pub active: Option<bool>,
}

#[derive(Serialize, Clone, Debug)]
pub struct SectorResponse {
    #[serde(flatten)]
    pub sector: Sector,
    pub icon: &'static str,
}

impl From<Sector> for SectorResponse {
    fn from(sector: Sector) -> Self {
        SectorResponse {
            icon: sector.kind.icon(),
            sector,
        }
    }
}

impl From<&Sector> for SectorBudget {
    fn from(sector: &Sector) -> Self {
        SectorBudget {
            sector_id: sector.id,
            name: sector.name.clone(),
            planned_budget: sector.planned_budget,
        }
    }
}
