use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::entities::{gen_id, room, Campaign, Rooms};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoomCreate {
    pub dept_code: String,
    #[serde(default)]
    pub campaign_id: Option<String>,
}

/// Mint a room token for QR onboarding
#[utoipa::path(
    post,
    path = "/api/rooms",
    request_body = RoomCreate,
    responses(
        (status = 201, description = "Room created", body = room::Model)
    )
)]
#[tracing::instrument(skip(state, payload), fields(dept_code = %payload.dept_code))]
pub async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<RoomCreate>,
) -> Result<(StatusCode, Json<room::Model>), AppError> {
    let token: String = gen_id().chars().take(8).collect();
    let room = room::ActiveModel {
        token: Set(token),
        dept_code: Set(payload.dept_code),
        campaign_id: Set(payload.campaign_id),
        created_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(room)))
}

/// Resolve a room token back to its department and campaign
#[utoipa::path(
    get,
    path = "/api/rooms/{room_token}",
    params(("room_token" = String, Path, description = "Room token")),
    responses(
        (status = 200, description = "Room detail", body = room::Model),
        (status = 404, description = "Room or its campaign not found")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_token): Path<String>,
) -> Result<Json<room::Model>, AppError> {
    let room = Rooms::find_by_id(&room_token)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Room".to_string()))?;

    if let Some(campaign_id) = &room.campaign_id {
        Campaign::find_by_id(campaign_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Campaign for room".to_string()))?;
    }

    Ok(Json(room))
}
