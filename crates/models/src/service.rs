use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub short_description: String,
    pub icon: String,
    pub image_path: Option<String>,
    pub position: i32,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Closed set of service categories; stored as a string column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Development,
    Infrastructure,
    Security,
    Consulting,
    Support,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Development,
        Category::Infrastructure,
        Category::Security,
        Category::Consulting,
        Category::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Development => "development",
            Category::Infrastructure => "infrastructure",
            Category::Security => "security",
            Category::Consulting => "consulting",
            Category::Support => "support",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

pub fn validate_category(s: &str) -> Result<(), errors::ModelError> {
    Category::parse(s)
        .map(|_| ())
        .ok_or_else(|| errors::ModelError::Validation(format!("unknown service category: {s}")))
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}
