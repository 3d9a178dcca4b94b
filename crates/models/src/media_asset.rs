use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{admin_user, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media_asset")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub file_path: String,
    pub description: String,
    pub active: bool,
    pub position: i32,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Uploader,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Uploader => Entity::belongs_to(admin_user::Entity)
                .from(Column::UploadedBy)
                .to(admin_user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Intended use of an uploaded image. The tag drives the picker views only;
/// nothing prevents syncing a `service` asset into a carousel slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Carousel,
    Service,
    Formation,
    About,
    Contact,
    Other,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Carousel,
        Kind::Service,
        Kind::Formation,
        Kind::About,
        Kind::Contact,
        Kind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Carousel => "carousel",
            Kind::Service => "service",
            Kind::Formation => "formation",
            Kind::About => "about",
            Kind::Contact => "contact",
            Kind::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Kind> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

pub fn validate_kind(s: &str) -> Result<(), errors::ModelError> {
    Kind::parse(s)
        .map(|_| ())
        .ok_or_else(|| errors::ModelError::Validation(format!("unknown media kind: {s}")))
}
