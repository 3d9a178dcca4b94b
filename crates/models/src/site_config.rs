use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub site_name: String,
    pub logo_path: Option<String>,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image_path: Option<String>,
    pub about_title: String,
    pub about_description: String,
    pub about_image_path: Option<String>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub meta_title: String,
    pub meta_description: String,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Image fields of the configuration that the sync utility may target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageField {
    Logo,
    Hero,
    About,
}

impl ImageField {
    pub const ALL: [ImageField; 3] = [ImageField::Logo, ImageField::Hero, ImageField::About];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageField::Logo => "logo",
            ImageField::Hero => "hero_image",
            ImageField::About => "about_image",
        }
    }

    pub fn parse(s: &str) -> Option<ImageField> {
        Self::ALL.iter().copied().find(|f| f.as_str() == s)
    }
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}
