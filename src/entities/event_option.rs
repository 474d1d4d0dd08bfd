use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::StringList;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EventCategory {
    #[sea_orm(string_value = "Action")]
    Action,
    #[sea_orm(string_value = "Food")]
    Food,
    #[sea_orm(string_value = "Relax")]
    Relax,
    #[sea_orm(string_value = "Party")]
    Party,
}

/// Catalogue entry for a bookable team event. Options are shared across
/// campaigns and referenced through the link table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "event_options")]
#[schema(as = EventOption)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub category: EventCategory,
    #[sea_orm(column_type = "Json")]
    pub tags: StringList,
    pub location_region: String,
    pub est_price_pp: f64,
    pub min_participants: Option<i32>,
    #[sea_orm(column_type = "Json")]
    pub accessibility_flags: StringList,
    pub weather_dependent: bool,
    pub image_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_mystery: bool,
    pub season: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::campaign_event_option::Entity")]
    CampaignEventOptions,

    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,
}

impl Related<super::campaign_event_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignEventOptions.def()
    }
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl Related<super::campaign::Entity> for Entity {
    fn to() -> RelationDef {
        super::campaign_event_option::Relation::Campaign.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::campaign_event_option::Relation::EventOption.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
