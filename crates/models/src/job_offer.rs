use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors, job_application};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_offer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub missions: String,
    pub profile: String,
    pub benefits: String,
    pub contract_type: String,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub min_experience: Option<String>,
    pub start_date: Option<Date>,
    pub deadline: Option<Date>,
    pub urgent: bool,
    pub position: i32,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Applications,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Applications => Entity::has_many(job_application::Entity).into(),
        }
    }
}

impl Related<job_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// An offer with a deadline in the past is expired; still listed publicly,
    /// the flag is computed for display.
    pub fn is_expired(&self) -> bool {
        match self.deadline {
            Some(deadline) => Utc::now().date_naive() > deadline,
            None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractType {
    Permanent,
    FixedTerm,
    Internship,
    Apprenticeship,
    Freelance,
    Interim,
}

impl ContractType {
    pub const ALL: [ContractType; 6] = [
        ContractType::Permanent,
        ContractType::FixedTerm,
        ContractType::Internship,
        ContractType::Apprenticeship,
        ContractType::Freelance,
        ContractType::Interim,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Permanent => "permanent",
            ContractType::FixedTerm => "fixed_term",
            ContractType::Internship => "internship",
            ContractType::Apprenticeship => "apprenticeship",
            ContractType::Freelance => "freelance",
            ContractType::Interim => "interim",
        }
    }

    pub fn parse(s: &str) -> Option<ContractType> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

pub fn validate_contract_type(s: &str) -> Result<(), errors::ModelError> {
    ContractType::parse(s)
        .map(|_| ())
        .ok_or_else(|| errors::ModelError::Validation(format!("unknown contract type: {s}")))
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}
