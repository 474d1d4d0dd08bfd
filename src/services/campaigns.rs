//! Campaign aggregate loading. Campaigns are always served fully hydrated:
//! the campaign row plus its linked event options, stretch goals and
//! contributions in one place.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{
    campaign, department, event_option, private_contribution, stretch_goal, Campaign, Department,
    EventOptions, PrivateContributions, StretchGoals,
};
use crate::error::AppError;

/// A campaign with all owned and linked rows loaded.
#[derive(Debug, Clone)]
pub struct CampaignBundle {
    pub campaign: campaign::Model,
    pub event_options: Vec<event_option::Model>,
    pub stretch_goals: Vec<stretch_goal::Model>,
    pub contributions: Vec<private_contribution::Model>,
}

/// Fetch a department, creating it on first reference.
pub async fn ensure_department(
    db: &DatabaseConnection,
    dept_code: &str,
) -> Result<department::Model, AppError> {
    if let Some(dept) = Department::find_by_id(dept_code).one(db).await? {
        return Ok(dept);
    }

    let dept = department::ActiveModel {
        dept_code: Set(dept_code.to_string()),
        name: Set(Some(dept_code.to_string())),
        region: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;
    tracing::info!(dept_code = %dept_code, "department auto-created");
    Ok(dept)
}

/// Load the associations of an already-fetched campaign.
pub async fn hydrate(
    db: &DatabaseConnection,
    campaign: campaign::Model,
) -> Result<CampaignBundle, AppError> {
    let event_options = campaign.find_related(EventOptions).all(db).await?;
    let stretch_goals = campaign.find_related(StretchGoals).all(db).await?;
    let contributions = campaign
        .find_related(PrivateContributions)
        .order_by_asc(private_contribution::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(CampaignBundle {
        campaign,
        event_options,
        stretch_goals,
        contributions,
    })
}

/// Load one campaign with all associations; `NotFound` when absent.
pub async fn load_campaign(
    db: &DatabaseConnection,
    campaign_id: &str,
) -> Result<CampaignBundle, AppError> {
    let campaign = Campaign::find_by_id(campaign_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign".to_string()))?;
    hydrate(db, campaign).await
}

/// All campaigns of a department, hydrated.
pub async fn list_by_department(
    db: &DatabaseConnection,
    dept_code: &str,
) -> Result<Vec<CampaignBundle>, AppError> {
    let campaigns = Campaign::find()
        .filter(campaign::Column::DeptCode.eq(dept_code))
        .all(db)
        .await?;

    let mut bundles = Vec::with_capacity(campaigns.len());
    for campaign in campaigns {
        bundles.push(hydrate(db, campaign).await?);
    }
    Ok(bundles)
}
