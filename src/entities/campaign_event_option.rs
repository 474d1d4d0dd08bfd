use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Link row tying an event option into a campaign's candidate list.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_event_options")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub campaign_id: String,

    #[sea_orm(indexed)]
    pub event_option_id: String,
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
        from = "Column::EventOptionId",
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
