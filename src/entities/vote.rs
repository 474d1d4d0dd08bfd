use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single swipe on a candidate event. Votes are replaced wholesale per
/// user or session when resubmitted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "vote")]
#[schema(as = Vote)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub campaign_id: String,

    #[sea_orm(indexed)]
    pub event_id: String,

    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub weight: i32,
    pub is_super_like: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::campaign::Entity",
        from = "Column::CampaignId",
        to = "super::campaign::Column::Id",
        on_delete = "Cascade"
    )]
    Campaign,

    #[sea_orm(
        belongs_to = "super::event_option::Entity",
        from = "Column::EventId",
        to = "super::event_option::Column::Id"
    )]
    EventOption,
}

impl Related<super::campaign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl Related<super::event_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventOption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
