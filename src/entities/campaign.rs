use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a campaign: voting on candidate events, topping up the
/// budget, then booked once a winner is funded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[sea_orm(string_value = "voting")]
    Voting,
    #[sea_orm(string_value = "funding")]
    Funding,
    #[sea_orm(string_value = "booked")]
    Booked,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "campaign")]
#[schema(as = Campaign)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub dept_code: String,
    pub target_date_range: String,
    pub voting_deadline: Option<DateTime<Utc>>,
    pub status: CampaignStatus,
    pub total_budget_needed: f64,
    pub company_budget_available: f64,
    pub budget_per_participant: Option<f64>,
    pub external_sponsors: f64,
    pub winning_event_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DeptCode",
        to = "super::department::Column::DeptCode"
    )]
    Department,

    #[sea_orm(has_many = "super::campaign_event_option::Entity")]
    CampaignEventOptions,

    #[sea_orm(has_many = "super::stretch_goal::Entity")]
    StretchGoals,

    #[sea_orm(has_many = "super::private_contribution::Entity")]
    PrivateContributions,

    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,

    #[sea_orm(has_many = "super::availability::Entity")]
    Availability,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::stretch_goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StretchGoals.def()
    }
}

impl Related<super::private_contribution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrivateContributions.def()
    }
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl Related<super::availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Availability.def()
    }
}

impl Related<super::event_option::Entity> for Entity {
    fn to() -> RelationDef {
        super::campaign_event_option::Relation::EventOption.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::campaign_event_option::Relation::Campaign.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
