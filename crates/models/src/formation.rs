use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "formation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub level: String,
    pub description: String,
    pub objectives: String,
    pub program: String,
    pub duration: String,
    pub price: f64,
    pub image_path: Option<String>,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Programming,
    Networks,
    Security,
    Cloud,
    Data,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Programming,
        Category::Networks,
        Category::Security,
        Category::Cloud,
        Category::Data,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Programming => "programming",
            Category::Networks => "networks",
            Category::Security => "security",
            Category::Cloud => "cloud",
            Category::Data => "data",
            Category::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Level> {
        Self::ALL.iter().copied().find(|l| l.as_str() == s)
    }
}

pub fn validate_category(s: &str) -> Result<(), errors::ModelError> {
    Category::parse(s)
        .map(|_| ())
        .ok_or_else(|| errors::ModelError::Validation(format!("unknown formation category: {s}")))
}

pub fn validate_level(s: &str) -> Result<(), errors::ModelError> {
    Level::parse(s)
        .map(|_| ())
        .ok_or_else(|| errors::ModelError::Validation(format!("unknown formation level: {s}")))
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}
