use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind} value: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Wires an enum with `as_str` and `FromStr` into a TEXT column and `Display`.
macro_rules! text_enum {
    ($ty:ty) => {
        impl FromSql<Text, Pg> for $ty {
            fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                s.parse::<$ty>().map_err(Into::into)
            }
        }

        impl ToSql<Text, Pg> for $ty {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Lifecycle status of a purchase request (DFD). The only authoritative
/// state of a request; the workflow is projected from it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    UnderReview,
    Approved,
    InProgress,
    Completed,
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 6] = [
        RequestStatus::Pending,
        RequestStatus::UnderReview,
        RequestStatus::Approved,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::UnderReview => "under_review",
            RequestStatus::Approved => "approved",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Display label shown in the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pendente",
            RequestStatus::UnderReview => "Em análise",
            RequestStatus::Approved => "Aprovado",
            RequestStatus::InProgress => "Em andamento",
            RequestStatus::Completed => "Concluído",
            RequestStatus::Rejected => "Rejeitado",
        }
    }

    /// Badge color token for the status pill.
    pub fn color(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "yellow",
            RequestStatus::UnderReview => "blue",
            RequestStatus::Approved => "green",
            RequestStatus::InProgress => "purple",
            RequestStatus::Completed => "emerald",
            RequestStatus::Rejected => "red",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Rejected)
    }

    /// Whether the request's value counts as committed spend.
    pub fn counts_as_spend(&self) -> bool {
        matches!(
            self,
            RequestStatus::Approved | RequestStatus::InProgress | RequestStatus::Completed
        )
    }
}

impl FromStr for RequestStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "under_review" => Ok(RequestStatus::UnderReview),
            "approved" => Ok(RequestStatus::Approved),
            "in_progress" => Ok(RequestStatus::InProgress),
            "completed" => Ok(RequestStatus::Completed),
            "rejected" => Ok(RequestStatus::Rejected),
            _ => Err(ParseEnumError {
                kind: "request status",
                value: s.to_string(),
            }),
        }
    }
}

text_enum!(RequestStatus);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
        }
    }
}

impl FromStr for StepStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(StepStatus::Pending),
            "in_progress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            _ => Err(ParseEnumError {
                kind: "step status",
                value: s.to_string(),
            }),
        }
    }
}

text_enum!(StepStatus);

/// The six fixed stages every request passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Request,
    Analysis,
    Approval,
    Quotation,
    Encumbrance,
    Delivery,
}

impl StepKind {
    pub const ALL: [StepKind; 6] = [
        StepKind::Request,
        StepKind::Analysis,
        StepKind::Approval,
        StepKind::Quotation,
        StepKind::Encumbrance,
        StepKind::Delivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Request => "request",
            StepKind::Analysis => "analysis",
            StepKind::Approval => "approval",
            StepKind::Quotation => "quotation",
            StepKind::Encumbrance => "encumbrance",
            StepKind::Delivery => "delivery",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Request => "Solicitação",
            StepKind::Analysis => "Análise",
            StepKind::Approval => "Aprovação",
            StepKind::Quotation => "Cotação",
            StepKind::Encumbrance => "Empenho",
            StepKind::Delivery => "Entrega",
        }
    }

    /// Zero-based position in the workflow.
    pub fn position(&self) -> usize {
        match self {
            StepKind::Request => 0,
            StepKind::Analysis => 1,
            StepKind::Approval => 2,
            StepKind::Quotation => 3,
            StepKind::Encumbrance => 4,
            StepKind::Delivery => 5,
        }
    }
}

impl FromStr for StepKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" => Ok(StepKind::Request),
            "analysis" => Ok(StepKind::Analysis),
            "approval" => Ok(StepKind::Approval),
            "quotation" => Ok(StepKind::Quotation),
            "encumbrance" => Ok(StepKind::Encumbrance),
            "delivery" => Ok(StepKind::Delivery),
            _ => Err(ParseEnumError {
                kind: "workflow stage",
                value: s.to_string(),
            }),
        }
    }
}

text_enum!(StepKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(ParseEnumError {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

text_enum!(Priority);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Requester,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Requester => "requester",
        }
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "requester" => Ok(UserRole::Requester),
            _ => Err(ParseEnumError {
                kind: "user role",
                value: s.to_string(),
            }),
        }
    }
}

text_enum!(UserRole);

/// Kind of municipal department; drives the icon shown on sector cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum SectorKind {
    Health,
    Education,
    Administration,
    Finance,
    Infrastructure,
    SocialAssistance,
    Environment,
    Culture,
    Other,
}

impl SectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectorKind::Health => "health",
            SectorKind::Education => "education",
            SectorKind::Administration => "administration",
            SectorKind::Finance => "finance",
            SectorKind::Infrastructure => "infrastructure",
            SectorKind::SocialAssistance => "social_assistance",
            SectorKind::Environment => "environment",
            SectorKind::Culture => "culture",
            SectorKind::Other => "other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SectorKind::Health => "heart-pulse",
            SectorKind::Education => "graduation-cap",
            SectorKind::Administration => "building",
            SectorKind::Finance => "wallet",
            SectorKind::Infrastructure => "hard-hat",
            SectorKind::SocialAssistance => "hand-heart",
            SectorKind::Environment => "leaf",
            SectorKind::Culture => "palette",
            SectorKind::Other => "folder",
        }
    }
}

impl FromStr for SectorKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "health" => Ok(SectorKind::Health),
            "education" => Ok(SectorKind::Education),
            "administration" => Ok(SectorKind::Administration),
            "finance" => Ok(SectorKind::Finance),
            "infrastructure" => Ok(SectorKind::Infrastructure),
            "social_assistance" => Ok(SectorKind::SocialAssistance),
            "environment" => Ok(SectorKind::Environment),
            "culture" => Ok(SectorKind::Culture),
            "other" => Ok(SectorKind::Other),
            _ => Err(ParseEnumError {
                kind: "sector kind",
                value: s.to_string(),
            }),
        }
    }
}

text_enum!(SectorKind);
