//! Vote tally heuristics: condenses a campaign's votes into a team
//! "persona" summary. Read-only; malformed votes (unknown events,
//! non-positive weights) are skipped rather than rejected.

use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::entities::{event_option, vote};

/// Aggregate sentiment summary for a campaign's team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeamAnalytics {
    /// Share of vote weight on Action events, 0-100
    pub action_level: i32,
    /// Share of vote weight on Food events, 0-100
    pub food_focus: i32,
    /// Share of vote weight on outdoor-tagged events, 0-100
    pub outdoor_wish: i32,
    /// How evenly spread the category tallies are, 40-100
    pub compromise_score: i32,
    /// Persona headline for the team
    pub persona_label: String,
    /// One-line persona description
    pub persona_description: String,
    /// Up to two highest-scoring category names
    pub top_categories: Vec<String>,
    /// Static participation proxy, 80 or 90
    pub participation_rate: i32,
}

fn percentage(numerator: i64, denominator: i64) -> i32 {
    (100.0 * numerator as f64 / denominator as f64).round() as i32
}

/// Build the team analytics summary from a campaign's candidate events and
/// all votes cast. Votes referencing unknown events or carrying
/// non-positive weight are ignored.
pub fn build_team_analytics(
    events: &[event_option::Model],
    votes: &[vote::Model],
) -> TeamAnalytics {
    let event_lookup: HashMap<&str, &event_option::Model> =
        events.iter().map(|e| (e.id.as_str(), e)).collect();

    // Category tallies keep first-encounter order so ranking ties stay stable.
    let mut category_scores: Vec<(String, i64)> = Vec::new();
    let mut outdoor_votes: i64 = 0;
    let mut positive_votes: i64 = 0;

    for vote in votes {
        let Some(event) = event_lookup.get(vote.event_id.as_str()) else {
            continue;
        };
        if vote.weight <= 0 {
            continue;
        }
        let weight = i64::from(vote.weight);
        let category = event.category.to_value();
        match category_scores.iter().position(|(name, _)| *name == category) {
            Some(index) => category_scores[index].1 += weight,
            None => category_scores.push((category, weight)),
        }
        positive_votes += weight;
        if event.tags.0.iter().any(|t| t.eq_ignore_ascii_case("outdoor")) {
            outdoor_votes += weight;
        }
    }

    let score_of = |name: &str| -> i64 {
        category_scores
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| *s)
            .unwrap_or(0)
    };

    let total_score: i64 = category_scores.iter().map(|(_, s)| s).sum();
    let action_level = if total_score > 0 {
        percentage(score_of("Action"), total_score)
    } else {
        25
    };
    let food_focus = if total_score > 0 {
        percentage(score_of("Food"), total_score)
    } else {
        30
    };
    let outdoor_wish = if positive_votes > 0 {
        percentage(outdoor_votes, positive_votes)
    } else {
        20
    };

    let compromise_score = if category_scores.is_empty() {
        85
    } else {
        let top = category_scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        let bottom = category_scores.iter().map(|(_, s)| *s).min().unwrap_or(0);
        let spread = percentage(top - bottom, top + bottom + 1);
        (100 - spread).clamp(40, 100)
    };

    let (persona_label, persona_description) = if action_level > 50 {
        (
            "Team Adrenalin-Junkies",
            "Action und Abenteuer stehen ganz oben.",
        )
    } else if food_focus > 50 {
        ("Team Foodies", "Essen und Genuss priorisieren alles.")
    } else if score_of("Relax") > score_of("Action") {
        (
            "Team Chill & Grill",
            "Entspannung und gutes Essen sind Favoriten.",
        )
    } else {
        (
            "Die Ausgewogenen",
            "Euer Team mag Vielfalt und findet Kompromisse.",
        )
    };

    let mut ranked = category_scores.clone();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let mut top_categories: Vec<String> = ranked.into_iter().take(2).map(|(name, _)| name).collect();
    if top_categories.is_empty() {
        top_categories = vec!["Action".to_string(), "Food".to_string()];
    }

    let participation_rate = if positive_votes > 0 { 90 } else { 80 };

    TeamAnalytics {
        action_level,
        food_focus,
        outdoor_wish,
        compromise_score,
        persona_label: persona_label.to_string(),
        persona_description: persona_description.to_string(),
        top_categories,
        participation_rate,
    }
}
