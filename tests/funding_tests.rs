use chrono::{TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};

use eventhorizon::entities::{
    campaign, private_contribution, stretch_goal, BadgeType, CampaignStatus, PrivateContributions,
    StretchGoals,
};
use eventhorizon::error::AppError;
use eventhorizon::services::campaigns::ensure_department;
use eventhorizon::services::funding::{
    add_contribution, funded_percentage, goal_unlocked, recompute_badges, total_funded,
    NewContribution,
};

fn campaign_model(target: f64, company: f64, sponsors: f64) -> campaign::Model {
    campaign::Model {
        id: "c1".to_string(),
        name: "Sommerfest".to_string(),
        dept_code: "FIN-01".to_string(),
        target_date_range: "2025-07".to_string(),
        voting_deadline: None,
        status: CampaignStatus::Funding,
        total_budget_needed: target,
        company_budget_available: company,
        budget_per_participant: None,
        external_sponsors: sponsors,
        winning_event_id: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn contribution(
    id: &str,
    amount: f64,
    day: u32,
    badge: Option<BadgeType>,
) -> private_contribution::Model {
    private_contribution::Model {
        id: id.to_string(),
        campaign_id: "c1".to_string(),
        user_name: id.to_string(),
        amount,
        is_hero: false,
        is_anonymous: false,
        badge,
        created_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
    }
}

fn goal(threshold: f64, unlocked: bool) -> stretch_goal::Model {
    stretch_goal::Model {
        id: "g1".to_string(),
        campaign_id: "c1".to_string(),
        amount_threshold: threshold,
        reward_description: "Cocktails".to_string(),
        unlocked,
        icon: None,
    }
}

#[test]
fn test_total_funded_sums_all_sources() {
    let campaign = campaign_model(1000.0, 200.0, 50.0);
    let contributions = vec![
        contribution("a", 40.0, 1, None),
        contribution("b", 70.0, 2, None),
    ];
    assert_eq!(total_funded(&campaign, &contributions), 360.0);
    assert_eq!(total_funded(&campaign, &[]), 250.0);
}

#[test]
fn test_funded_percentage_zero_target() {
    let campaign = campaign_model(0.0, 0.0, 0.0);
    assert_eq!(funded_percentage(&campaign, 500.0), 0.0);

    let campaign = campaign_model(200.0, 0.0, 0.0);
    assert_eq!(funded_percentage(&campaign, 50.0), 25.0);
}

#[test]
fn test_goal_unlocked_threshold_inclusive() {
    let goal = goal(50.0, false);
    assert!(!goal_unlocked(&goal, 49.9));
    assert!(goal_unlocked(&goal, 50.0));
    assert!(goal_unlocked(&goal, 120.0));
}

#[test]
fn test_early_bird_on_earliest() {
    let contributions = vec![
        contribution("a", 10.0, 1, None),
        contribution("b", 20.0, 2, None),
        contribution("c", 30.0, 3, None),
    ];
    let badges = recompute_badges(&contributions, None);
    assert_eq!(
        badges,
        vec![Some(BadgeType::EarlyBird), None, None],
    );
}

#[test]
fn test_whale_needs_at_least_100() {
    // Spec scenario: A contributed 40, B contributes 70 against a 1000 target.
    // B holds the maximum but stays below 100, so no whale is assigned.
    let contributions = vec![
        contribution("a", 40.0, 1, None),
        contribution("b", 70.0, 2, None),
    ];
    let badges = recompute_badges(&contributions, None);
    assert_eq!(badges, vec![Some(BadgeType::EarlyBird), None]);
}

#[test]
fn test_whale_ties_share_the_badge() {
    let contributions = vec![
        contribution("a", 150.0, 1, None),
        contribution("b", 150.0, 2, None),
        contribution("c", 20.0, 3, None),
    ];
    let badges = recompute_badges(&contributions, None);
    assert_eq!(
        badges,
        vec![Some(BadgeType::Whale), Some(BadgeType::Whale), None],
    );
}

#[test]
fn test_whale_revoked_when_no_longer_maximal() {
    // "a" earned whale at 120, then "b" contributed 300.
    let contributions = vec![
        contribution("a", 120.0, 1, Some(BadgeType::Whale)),
        contribution("b", 300.0, 2, None),
    ];
    let badges = recompute_badges(&contributions, None);
    assert_eq!(
        badges,
        vec![Some(BadgeType::EarlyBird), Some(BadgeType::Whale)],
    );
}

#[test]
fn test_closer_assigned_to_crossing_contribution() {
    // Spec scenario: target 100, contributions 30, 40, 35 in order.
    let contributions = vec![
        contribution("a", 30.0, 1, Some(BadgeType::EarlyBird)),
        contribution("b", 40.0, 2, None),
        contribution("c", 35.0, 3, None),
    ];
    let badges = recompute_badges(&contributions, Some("c"));
    assert_eq!(
        badges,
        vec![Some(BadgeType::EarlyBird), None, Some(BadgeType::Closer)],
    );
}

#[test]
fn test_closer_survives_later_recomputation() {
    let contributions = vec![
        contribution("a", 30.0, 1, Some(BadgeType::EarlyBird)),
        contribution("b", 75.0, 2, Some(BadgeType::Closer)),
        contribution("c", 10.0, 3, None),
    ];
    let badges = recompute_badges(&contributions, None);
    assert_eq!(
        badges,
        vec![Some(BadgeType::EarlyBird), Some(BadgeType::Closer), None],
    );
}

#[test]
fn test_closer_takes_priority_over_whale() {
    let contributions = vec![
        contribution("a", 30.0, 1, Some(BadgeType::EarlyBird)),
        contribution("b", 500.0, 2, None),
    ];
    let badges = recompute_badges(&contributions, Some("b"));
    assert_eq!(
        badges,
        vec![Some(BadgeType::EarlyBird), Some(BadgeType::Closer)],
    );
}

async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    // A single connection keeps every query on the same in-memory database
    options.max_connections(1);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

async fn seed_campaign(db: &DatabaseConnection, target: f64) -> String {
    // Campaign.dept_code is a foreign key into department; the HTTP create path
    // calls ensure_department first, so mirror that here before inserting.
    ensure_department(db, "FIN-01").await.unwrap();

    let campaign = campaign::ActiveModel {
        id: Set("camp-1".to_string()),
        name: Set("Sommerfest".to_string()),
        dept_code: Set("FIN-01".to_string()),
        target_date_range: Set("2025-07".to_string()),
        voting_deadline: Set(None),
        status: Set(CampaignStatus::Funding),
        total_budget_needed: Set(target),
        company_budget_available: Set(0.0),
        budget_per_participant: Set(None),
        external_sponsors: Set(0.0),
        winning_event_id: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();

    stretch_goal::ActiveModel {
        id: Set("goal-50".to_string()),
        campaign_id: Set(campaign.id.clone()),
        amount_threshold: Set(50.0),
        reward_description: Set("Cocktails".to_string()),
        unlocked: Set(false),
        icon: Set(None),
    }
    .insert(db)
    .await
    .unwrap();

    campaign.id
}

fn new_contribution(name: &str, amount: f64) -> NewContribution {
    NewContribution {
        user_name: name.to_string(),
        amount,
        is_hero: false,
        is_anonymous: false,
    }
}

#[tokio::test]
async fn test_add_contribution_full_flow() {
    let db = test_db().await;
    let campaign_id = seed_campaign(&db, 100.0).await;

    let (_, contributions, goals) =
        add_contribution(&db, &campaign_id, new_contribution("Anna", 30.0))
            .await
            .unwrap();
    assert_eq!(contributions.len(), 1);
    assert_eq!(contributions[0].badge, Some(BadgeType::EarlyBird));
    // 30% funded: the 50% goal stays locked
    assert!(!goals[0].unlocked);

    let (_, contributions, goals) =
        add_contribution(&db, &campaign_id, new_contribution("Ben", 40.0))
            .await
            .unwrap();
    assert_eq!(contributions.len(), 2);
    assert_eq!(contributions[0].badge, Some(BadgeType::EarlyBird));
    assert_eq!(contributions[1].badge, None);
    // 70% funded unlocks the 50% goal
    assert!(goals[0].unlocked);

    let (_, contributions, _) =
        add_contribution(&db, &campaign_id, new_contribution("Cleo", 35.0))
            .await
            .unwrap();
    assert_eq!(contributions.len(), 3);
    assert_eq!(contributions[0].badge, Some(BadgeType::EarlyBird));
    assert_eq!(contributions[1].badge, None);
    // 105 >= 100: Cleo crossed the goal
    assert_eq!(contributions[2].badge, Some(BadgeType::Closer));
}

#[tokio::test]
async fn test_add_contribution_whale_handover() {
    let db = test_db().await;
    let campaign_id = seed_campaign(&db, 10_000.0).await;

    add_contribution(&db, &campaign_id, new_contribution("Anna", 120.0))
        .await
        .unwrap();
    let (_, contributions, _) =
        add_contribution(&db, &campaign_id, new_contribution("Ben", 300.0))
            .await
            .unwrap();

    // Anna held whale at 120 but keeps early_bird once Ben out-contributes her
    assert_eq!(contributions[0].badge, Some(BadgeType::EarlyBird));
    assert_eq!(contributions[1].badge, Some(BadgeType::Whale));
}

#[tokio::test]
async fn test_add_contribution_validation() {
    let db = test_db().await;
    let campaign_id = seed_campaign(&db, 100.0).await;

    let err = add_contribution(&db, &campaign_id, new_contribution("Anna", 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = add_contribution(&db, &campaign_id, new_contribution("  ", 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Nothing was written
    let stored = PrivateContributions::find().all(&db).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_add_contribution_unknown_campaign() {
    let db = test_db().await;

    let err = add_contribution(&db, "missing", new_contribution("Anna", 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_state_round_trips_through_the_store() {
    let db = test_db().await;
    let campaign_id = seed_campaign(&db, 100.0).await;

    add_contribution(&db, &campaign_id, new_contribution("Anna", 30.0))
        .await
        .unwrap();
    let (_, contributions, goals) =
        add_contribution(&db, &campaign_id, new_contribution("Ben", 40.0))
            .await
            .unwrap();

    let stored_contributions = PrivateContributions::find().all(&db).await.unwrap();
    let stored_goals = StretchGoals::find().all(&db).await.unwrap();

    for contribution in &contributions {
        let stored = stored_contributions
            .iter()
            .find(|c| c.id == contribution.id)
            .unwrap();
        assert_eq!(stored, contribution);
    }
    assert_eq!(stored_goals, goals);
}
