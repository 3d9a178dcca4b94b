use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{admin_user, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub actor_id: Uuid,
    pub action: String,
    pub object_type: String,
    pub object_id: String,
    pub description: String,
    pub timestamp: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Actor,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Actor => Entity::belongs_to(admin_user::Entity)
                .from(Column::ActorId)
                .to(admin_user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    Upload,
    Activate,
    Deactivate,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Upload,
        Action::Activate,
        Action::Deactivate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Upload => "upload",
            Action::Activate => "activate",
            Action::Deactivate => "deactivate",
        }
    }

    pub fn parse(s: &str) -> Option<Action> {
        Self::ALL.iter().copied().find(|a| a.as_str() == s)
    }
}

pub fn validate_action(s: &str) -> Result<(), errors::ModelError> {
    Action::parse(s)
        .map(|_| ())
        .ok_or_else(|| errors::ModelError::Validation(format!("unknown action: {s}")))
}
