//! Contribution ledger: funding totals, badge assignment and stretch-goal
//! unlocking. All derived state is recomputed from the full ordered
//! contribution history inside one transaction per contribution.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::{
    campaign, gen_id, private_contribution, stretch_goal, BadgeType, Campaign,
    PrivateContributions, StretchGoals,
};
use crate::error::AppError;

/// Minimum amount for the whale badge.
const WHALE_MIN_AMOUNT: f64 = 100.0;

/// Incoming contribution as accepted by the API. Badges are never taken
/// from the caller.
#[derive(Debug, Clone)]
pub struct NewContribution {
    pub user_name: String,
    pub amount: f64,
    pub is_hero: bool,
    pub is_anonymous: bool,
}

/// Total funds raised: company budget plus external sponsors plus the sum
/// of private contributions.
pub fn total_funded(
    campaign: &campaign::Model,
    contributions: &[private_contribution::Model],
) -> f64 {
    let private_total: f64 = contributions.iter().map(|c| c.amount).sum();
    campaign.company_budget_available + campaign.external_sponsors + private_total
}

/// Funded percentage of the campaign target. A target of zero funds to 0%.
pub fn funded_percentage(campaign: &campaign::Model, total_funded: f64) -> f64 {
    if campaign.total_budget_needed == 0.0 {
        0.0
    } else {
        100.0 * total_funded / campaign.total_budget_needed
    }
}

/// A stretch goal unlocks once the funded percentage reaches its threshold.
pub fn goal_unlocked(goal: &stretch_goal::Model, percent_funded: f64) -> bool {
    percent_funded >= goal.amount_threshold
}

/// Recompute badges over the full contribution history, ordered by creation
/// time ascending.
///
/// Per contribution, first match wins:
/// 1. a persisted `closer` badge is kept (the funding goal is crossed at
///    most once, by exactly one contribution),
/// 2. `closer_id` marks the contribution that crossed the goal just now,
/// 3. `whale` for every holder of the maximum amount, if that maximum is
///    at least 100; this also strips `whale` from any previous holder
///    whose amount is no longer maximal,
/// 4. `early_bird` for the earliest contribution.
pub fn recompute_badges(
    contributions: &[private_contribution::Model],
    closer_id: Option<&str>,
) -> Vec<Option<BadgeType>> {
    let max_amount = contributions
        .iter()
        .map(|c| c.amount)
        .fold(f64::NEG_INFINITY, f64::max);

    contributions
        .iter()
        .enumerate()
        .map(|(index, c)| {
            if c.badge == Some(BadgeType::Closer) || closer_id == Some(c.id.as_str()) {
                Some(BadgeType::Closer)
            } else if c.amount == max_amount && c.amount >= WHALE_MIN_AMOUNT {
                Some(BadgeType::Whale)
            } else if index == 0 {
                Some(BadgeType::EarlyBird)
            } else {
                None
            }
        })
        .collect()
}

/// Add one contribution and update all derived state as a single atomic
/// unit of work.
///
/// The campaign row is locked exclusively for the duration of the
/// transaction, so concurrent contributions to the same campaign serialize
/// and never recompute against a stale contribution snapshot. Any failure
/// rolls the whole transaction back.
#[tracing::instrument(skip(db, input), fields(campaign_id = %campaign_id, amount = %input.amount))]
pub async fn add_contribution(
    db: &DatabaseConnection,
    campaign_id: &str,
    input: NewContribution,
) -> Result<
    (
        campaign::Model,
        Vec<private_contribution::Model>,
        Vec<stretch_goal::Model>,
    ),
    AppError,
> {
    if !input.amount.is_finite() || input.amount <= 0.0 {
        return Err(AppError::Validation(
            "contribution amount must be positive".to_string(),
        ));
    }
    if input.user_name.trim().is_empty() {
        return Err(AppError::Validation(
            "contributor name must not be empty".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let campaign = Campaign::find_by_id(campaign_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign".to_string()))?;

    let new_id = gen_id();
    private_contribution::ActiveModel {
        id: Set(new_id.clone()),
        campaign_id: Set(campaign.id.clone()),
        user_name: Set(input.user_name),
        amount: Set(input.amount),
        is_hero: Set(input.is_hero),
        is_anonymous: Set(input.is_anonymous),
        badge: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(&txn)
    .await?;

    let mut contributions = PrivateContributions::find()
        .filter(private_contribution::Column::CampaignId.eq(campaign.id.as_str()))
        .order_by_asc(private_contribution::Column::CreatedAt)
        .all(&txn)
        .await?;

    let total_after = total_funded(&campaign, &contributions);
    let total_before = total_after - input.amount;
    let percent_after = funded_percentage(&campaign, total_after);

    let crossed_goal = total_before < campaign.total_budget_needed
        && campaign.total_budget_needed <= total_after;

    let badges = recompute_badges(&contributions, crossed_goal.then_some(new_id.as_str()));
    for (contribution, badge) in contributions.iter_mut().zip(badges) {
        if contribution.badge != badge {
            let mut active = contribution.clone().into_active_model();
            active.badge = Set(badge);
            active.update(&txn).await?;
            contribution.badge = badge;
        }
    }

    let mut goals = StretchGoals::find()
        .filter(stretch_goal::Column::CampaignId.eq(campaign.id.as_str()))
        .all(&txn)
        .await?;
    for goal in goals.iter_mut() {
        let unlocked = goal_unlocked(goal, percent_after);
        if goal.unlocked != unlocked {
            let mut active = goal.clone().into_active_model();
            active.unlocked = Set(unlocked);
            active.update(&txn).await?;
            goal.unlocked = unlocked;
        }
    }

    txn.commit().await?;

    tracing::info!(
        total = total_after,
        percent = percent_after,
        crossed = crossed_goal,
        "contribution recorded"
    );

    Ok((campaign, contributions, goals))
}
