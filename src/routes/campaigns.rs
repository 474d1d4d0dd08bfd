use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::{
    campaign, campaign_event_option, event_option, gen_id, private_contribution, stretch_goal,
    vote, Campaign, CampaignStatus, EventCategory, EventOptions, StretchGoals, StringList, Votes,
};
use crate::error::AppError;
use crate::services::analytics::{build_team_analytics, TeamAnalytics};
use crate::services::campaigns::{ensure_department, hydrate, list_by_department, load_campaign, CampaignBundle};
use crate::services::funding::{add_contribution, NewContribution};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCampaignsQuery {
    /// Department code whose campaigns to list
    pub dept_code: String,
}

/// Voter identity for vote and availability submissions. Votes are replaced
/// per user when `user_id` is given, per session otherwise.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdentityQuery {
    /// User identifier (optional)
    #[serde(default)]
    pub user_id: Option<String>,
    /// Client session identifier (optional)
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EventOptionCreate {
    /// Existing catalogue id to link instead of creating a new option
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub category: EventCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location_region: String,
    pub est_price_pp: f64,
    #[serde(default)]
    pub min_participants: Option<i32>,
    #[serde(default)]
    pub accessibility_flags: Vec<String>,
    #[serde(default)]
    pub weather_dependent: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_mystery: bool,
    #[serde(default = "default_season")]
    pub season: String,
}

fn default_season() -> String {
    "all_year".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StretchGoalCreate {
    /// Percentage of the funding target at which the reward unlocks
    pub amount_threshold: f64,
    pub reward_description: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CampaignCreate {
    pub name: String,
    pub dept_code: String,
    pub target_date_range: String,
    #[serde(default)]
    pub voting_deadline: Option<DateTime<Utc>>,
    #[serde(default = "default_status")]
    pub status: CampaignStatus,
    pub total_budget_needed: f64,
    pub company_budget_available: f64,
    #[serde(default)]
    pub budget_per_participant: Option<f64>,
    #[serde(default)]
    pub external_sponsors: f64,
    #[serde(default)]
    pub winning_event_id: Option<String>,
    /// Candidate events: linked by id when the option already exists,
    /// created otherwise
    #[serde(default)]
    pub event_options: Vec<EventOptionCreate>,
    #[serde(default)]
    pub stretch_goals: Vec<StretchGoalCreate>,
}

fn default_status() -> CampaignStatus {
    CampaignStatus::Voting
}

/// Partial campaign update; absent fields are left untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CampaignUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target_date_range: Option<String>,
    #[serde(default)]
    pub voting_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
    #[serde(default)]
    pub total_budget_needed: Option<f64>,
    #[serde(default)]
    pub company_budget_available: Option<f64>,
    #[serde(default)]
    pub budget_per_participant: Option<f64>,
    #[serde(default)]
    pub external_sponsors: Option<f64>,
    #[serde(default)]
    pub winning_event_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PrivateContributionCreate {
    /// Contributor display name
    pub user_name: String,
    /// Contributed amount, must be strictly positive
    pub amount: f64,
    #[serde(default)]
    pub is_hero: bool,
    #[serde(default)]
    pub is_anonymous: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VotePayload {
    pub event_id: String,
    #[serde(default = "default_weight")]
    pub weight: i32,
    #[serde(default)]
    pub is_super_like: bool,
}

fn default_weight() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityPayload {
    pub date: String,
    pub slots: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiMessage {
    pub message: String,
}

/// Campaign with all owned and linked rows, as served by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct CampaignRead {
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
    pub event_options: Vec<event_option::Model>,
    pub stretch_goals: Vec<stretch_goal::Model>,
    pub private_contributions: Vec<private_contribution::Model>,
}

impl From<CampaignBundle> for CampaignRead {
    fn from(bundle: CampaignBundle) -> Self {
        let campaign = bundle.campaign;
        CampaignRead {
            id: campaign.id,
            name: campaign.name,
            dept_code: campaign.dept_code,
            target_date_range: campaign.target_date_range,
            voting_deadline: campaign.voting_deadline,
            status: campaign.status,
            total_budget_needed: campaign.total_budget_needed,
            company_budget_available: campaign.company_budget_available,
            budget_per_participant: campaign.budget_per_participant,
            external_sponsors: campaign.external_sponsors,
            winning_event_id: campaign.winning_event_id,
            created_at: campaign.created_at,
            event_options: bundle.event_options,
            stretch_goals: bundle.stretch_goals,
            private_contributions: bundle.contributions,
        }
    }
}

/// List all campaigns of a department
#[utoipa::path(
    get,
    path = "/api/campaigns",
    params(ListCampaignsQuery),
    responses(
        (status = 200, description = "Campaigns of the department", body = Vec<CampaignRead>)
    )
)]
#[tracing::instrument(skip(state, query), fields(dept_code = %query.dept_code))]
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<ListCampaignsQuery>,
) -> Result<Json<Vec<CampaignRead>>, AppError> {
    let bundles = list_by_department(&state.db, &query.dept_code).await?;
    Ok(Json(bundles.into_iter().map(CampaignRead::from).collect()))
}

/// Get one campaign with event options, stretch goals and contributions
#[utoipa::path(
    get,
    path = "/api/campaigns/{campaign_id}",
    params(("campaign_id" = String, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Campaign detail", body = CampaignRead),
        (status = 404, description = "Campaign not found")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_campaign_detail(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<CampaignRead>, AppError> {
    let bundle = load_campaign(&state.db, &campaign_id).await?;
    Ok(Json(bundle.into()))
}

/// Create a campaign together with its candidate events and stretch goals
#[utoipa::path(
    post,
    path = "/api/campaigns",
    request_body = CampaignCreate,
    responses(
        (status = 201, description = "Campaign created", body = CampaignRead)
    )
)]
#[tracing::instrument(skip(state, payload), fields(dept_code = %payload.dept_code, name = %payload.name))]
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(payload): Json<CampaignCreate>,
) -> Result<(StatusCode, Json<CampaignRead>), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation(
            "campaign name must not be empty".to_string(),
        ));
    }

    ensure_department(&state.db, &payload.dept_code).await?;

    let campaign = campaign::ActiveModel {
        id: Set(gen_id()),
        name: Set(payload.name),
        dept_code: Set(payload.dept_code),
        target_date_range: Set(payload.target_date_range),
        voting_deadline: Set(payload.voting_deadline),
        status: Set(payload.status),
        total_budget_needed: Set(payload.total_budget_needed),
        company_budget_available: Set(payload.company_budget_available),
        budget_per_participant: Set(payload.budget_per_participant),
        external_sponsors: Set(payload.external_sponsors),
        winning_event_id: Set(payload.winning_event_id),
        created_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    for option in payload.event_options {
        let existing = match &option.id {
            Some(id) => EventOptions::find_by_id(id).one(&state.db).await?,
            None => None,
        };
        let event_option_id = match existing {
            Some(event) => event.id,
            None => {
                event_option::ActiveModel {
                    id: Set(option.id.unwrap_or_else(gen_id)),
                    title: Set(option.title),
                    category: Set(option.category),
                    tags: Set(StringList(option.tags)),
                    location_region: Set(option.location_region),
                    est_price_pp: Set(option.est_price_pp),
                    min_participants: Set(option.min_participants),
                    accessibility_flags: Set(StringList(option.accessibility_flags)),
                    weather_dependent: Set(option.weather_dependent),
                    image_url: Set(option.image_url),
                    description: Set(option.description),
                    is_mystery: Set(option.is_mystery),
                    season: Set(option.season),
                }
                .insert(&state.db)
                .await?
                .id
            }
        };
        campaign_event_option::ActiveModel {
            id: Set(gen_id()),
            campaign_id: Set(campaign.id.clone()),
            event_option_id: Set(event_option_id),
        }
        .insert(&state.db)
        .await?;
    }

    for goal in payload.stretch_goals {
        stretch_goal::ActiveModel {
            id: Set(gen_id()),
            campaign_id: Set(campaign.id.clone()),
            amount_threshold: Set(goal.amount_threshold),
            reward_description: Set(goal.reward_description),
            unlocked: Set(goal.unlocked),
            icon: Set(goal.icon),
        }
        .insert(&state.db)
        .await?;
    }

    let bundle = hydrate(&state.db, campaign).await?;
    Ok((StatusCode::CREATED, Json(bundle.into())))
}

/// Update scalar fields of a campaign
#[utoipa::path(
    put,
    path = "/api/campaigns/{campaign_id}",
    params(("campaign_id" = String, Path, description = "Campaign id")),
    request_body = CampaignUpdate,
    responses(
        (status = 200, description = "Campaign updated", body = CampaignRead),
        (status = 404, description = "Campaign not found")
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Json(payload): Json<CampaignUpdate>,
) -> Result<Json<CampaignRead>, AppError> {
    let campaign = Campaign::find_by_id(&campaign_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign".to_string()))?;

    let mut changed = false;
    let mut active = campaign.clone().into_active_model();
    if let Some(name) = payload.name {
        active.name = Set(name);
        changed = true;
    }
    if let Some(range) = payload.target_date_range {
        active.target_date_range = Set(range);
        changed = true;
    }
    if let Some(deadline) = payload.voting_deadline {
        active.voting_deadline = Set(Some(deadline));
        changed = true;
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
        changed = true;
    }
    if let Some(total) = payload.total_budget_needed {
        active.total_budget_needed = Set(total);
        changed = true;
    }
    if let Some(company) = payload.company_budget_available {
        active.company_budget_available = Set(company);
        changed = true;
    }
    if let Some(per_participant) = payload.budget_per_participant {
        active.budget_per_participant = Set(Some(per_participant));
        changed = true;
    }
    if let Some(sponsors) = payload.external_sponsors {
        active.external_sponsors = Set(sponsors);
        changed = true;
    }
    if let Some(winner) = payload.winning_event_id {
        active.winning_event_id = Set(Some(winner));
        changed = true;
    }
    let campaign = if changed {
        active.update(&state.db).await?
    } else {
        campaign
    };

    let bundle = hydrate(&state.db, campaign).await?;
    Ok(Json(bundle.into()))
}

/// Replace the campaign's stretch goals wholesale
#[utoipa::path(
    put,
    path = "/api/campaigns/{campaign_id}/stretch-goals",
    params(("campaign_id" = String, Path, description = "Campaign id")),
    request_body = Vec<StretchGoalCreate>,
    responses(
        (status = 200, description = "Stretch goals replaced", body = CampaignRead),
        (status = 404, description = "Campaign not found")
    )
)]
#[tracing::instrument(skip(state, goals))]
pub async fn replace_stretch_goals(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Json(goals): Json<Vec<StretchGoalCreate>>,
) -> Result<Json<CampaignRead>, AppError> {
    let campaign = Campaign::find_by_id(&campaign_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign".to_string()))?;

    StretchGoals::delete_many()
        .filter(stretch_goal::Column::CampaignId.eq(campaign_id.as_str()))
        .exec(&state.db)
        .await?;

    for goal in goals {
        stretch_goal::ActiveModel {
            id: Set(gen_id()),
            campaign_id: Set(campaign_id.clone()),
            amount_threshold: Set(goal.amount_threshold),
            reward_description: Set(goal.reward_description),
            unlocked: Set(goal.unlocked),
            icon: Set(goal.icon),
        }
        .insert(&state.db)
        .await?;
    }

    let bundle = hydrate(&state.db, campaign).await?;
    Ok(Json(bundle.into()))
}

/// Store the caller's votes, replacing any earlier submission
#[utoipa::path(
    post,
    path = "/api/campaigns/{campaign_id}/votes",
    params(
        ("campaign_id" = String, Path, description = "Campaign id"),
        IdentityQuery
    ),
    request_body = Vec<VotePayload>,
    responses(
        (status = 200, description = "Votes stored", body = ApiMessage),
        (status = 404, description = "Campaign not found")
    )
)]
#[tracing::instrument(skip(state, votes))]
pub async fn submit_votes(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Query(identity): Query<IdentityQuery>,
    Json(votes): Json<Vec<VotePayload>>,
) -> Result<Json<ApiMessage>, AppError> {
    Campaign::find_by_id(&campaign_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign".to_string()))?;

    if let Some(user_id) = &identity.user_id {
        Votes::delete_many()
            .filter(vote::Column::CampaignId.eq(campaign_id.as_str()))
            .filter(vote::Column::UserId.eq(user_id.as_str()))
            .exec(&state.db)
            .await?;
    } else if let Some(session_id) = &identity.session_id {
        Votes::delete_many()
            .filter(vote::Column::CampaignId.eq(campaign_id.as_str()))
            .filter(vote::Column::SessionId.eq(session_id.as_str()))
            .exec(&state.db)
            .await?;
    }

    for payload in votes {
        vote::ActiveModel {
            id: Set(gen_id()),
            campaign_id: Set(campaign_id.clone()),
            event_id: Set(payload.event_id),
            user_id: Set(identity.user_id.clone()),
            session_id: Set(identity.session_id.clone()),
            weight: Set(payload.weight),
            is_super_like: Set(payload.is_super_like),
            created_at: Set(Utc::now()),
        }
        .insert(&state.db)
        .await?;
    }

    Ok(Json(ApiMessage {
        message: "Votes stored".to_string(),
    }))
}

/// Store the caller's availability, replacing any earlier submission
#[utoipa::path(
    post,
    path = "/api/campaigns/{campaign_id}/availability",
    params(
        ("campaign_id" = String, Path, description = "Campaign id"),
        IdentityQuery
    ),
    request_body = Vec<AvailabilityPayload>,
    responses(
        (status = 200, description = "Availability stored", body = ApiMessage),
        (status = 404, description = "Campaign not found")
    )
)]
#[tracing::instrument(skip(state, availability))]
pub async fn submit_availability(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Query(identity): Query<IdentityQuery>,
    Json(availability): Json<Vec<AvailabilityPayload>>,
) -> Result<Json<ApiMessage>, AppError> {
    use crate::entities::{availability as availability_entity, Availability};

    Campaign::find_by_id(&campaign_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign".to_string()))?;

    if let Some(user_id) = &identity.user_id {
        Availability::delete_many()
            .filter(availability_entity::Column::CampaignId.eq(campaign_id.as_str()))
            .filter(availability_entity::Column::UserId.eq(user_id.as_str()))
            .exec(&state.db)
            .await?;
    } else if let Some(session_id) = &identity.session_id {
        Availability::delete_many()
            .filter(availability_entity::Column::CampaignId.eq(campaign_id.as_str()))
            .filter(availability_entity::Column::SessionId.eq(session_id.as_str()))
            .exec(&state.db)
            .await?;
    }

    for slot in availability {
        availability_entity::ActiveModel {
            id: Set(gen_id()),
            campaign_id: Set(campaign_id.clone()),
            user_id: Set(identity.user_id.clone()),
            session_id: Set(identity.session_id.clone()),
            date: Set(slot.date),
            slots: Set(StringList(slot.slots)),
            created_at: Set(Utc::now()),
        }
        .insert(&state.db)
        .await?;
    }

    Ok(Json(ApiMessage {
        message: "Availability stored".to_string(),
    }))
}

/// Add a private contribution and recompute badges and stretch goals
#[utoipa::path(
    post,
    path = "/api/campaigns/{campaign_id}/contributions",
    params(("campaign_id" = String, Path, description = "Campaign id")),
    request_body = PrivateContributionCreate,
    responses(
        (status = 201, description = "Contribution recorded", body = CampaignRead),
        (status = 404, description = "Campaign not found"),
        (status = 422, description = "Invalid contribution")
    )
)]
#[tracing::instrument(skip(state, contribution))]
pub async fn add_campaign_contribution(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Json(contribution): Json<PrivateContributionCreate>,
) -> Result<(StatusCode, Json<CampaignRead>), AppError> {
    let (campaign, _, _) = add_contribution(
        &state.db,
        &campaign_id,
        NewContribution {
            user_name: contribution.user_name,
            amount: contribution.amount,
            is_hero: contribution.is_hero,
            is_anonymous: contribution.is_anonymous,
        },
    )
    .await?;

    let bundle = hydrate(&state.db, campaign).await?;
    Ok((StatusCode::CREATED, Json(bundle.into())))
}

/// Team persona summary built from the campaign's votes
#[utoipa::path(
    get,
    path = "/api/campaigns/{campaign_id}/analytics",
    params(("campaign_id" = String, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Vote analytics", body = TeamAnalytics),
        (status = 404, description = "Campaign not found")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_campaign_analytics(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<TeamAnalytics>, AppError> {
    let bundle = load_campaign(&state.db, &campaign_id).await?;

    let votes = Votes::find()
        .filter(vote::Column::CampaignId.eq(campaign_id.as_str()))
        .all(&state.db)
        .await?;

    Ok(Json(build_team_analytics(&bundle.event_options, &votes)))
}
