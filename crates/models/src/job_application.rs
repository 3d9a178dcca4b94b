use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors, job_offer};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub job_offer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub cover_letter: String,
    pub resume_path: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    JobOffer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::JobOffer => Entity::belongs_to(job_offer::Entity)
                .from(Column::JobOfferId)
                .to(job_offer::Column::Id)
                .into(),
        }
    }
}

impl Related<job_offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobOffer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Application workflow states. Transitions are deliberately unguarded:
/// any status may be set to any other, including re-opening a rejected one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    New,
    InReview,
    Interview,
    Accepted,
    Rejected,
    Archived,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::New,
        Status::InReview,
        Status::Interview,
        Status::Accepted,
        Status::Rejected,
        Status::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::InReview => "in_review",
            Status::Interview => "interview",
            Status::Accepted => "accepted",
            Status::Rejected => "rejected",
            Status::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

pub fn validate_status(s: &str) -> Result<(), errors::ModelError> {
    Status::parse(s)
        .map(|_| ())
        .ok_or_else(|| errors::ModelError::Validation(format!("unknown application status: {s}")))
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}
