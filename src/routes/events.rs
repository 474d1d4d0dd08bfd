use axum::{
    extract::{Query, State},
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::entities::{event_option, EventOptions};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventOptionsQuery {
    /// Region code filter
    #[serde(default)]
    pub region: Option<String>,
}

/// List the event catalogue, optionally filtered by region
#[utoipa::path(
    get,
    path = "/api/event-options",
    params(EventOptionsQuery),
    responses(
        (status = 200, description = "Available event options", body = Vec<event_option::Model>)
    )
)]
#[tracing::instrument(skip(state, query))]
pub async fn list_event_options(
    State(state): State<AppState>,
    Query(query): Query<EventOptionsQuery>,
) -> Result<Json<Vec<event_option::Model>>, AppError> {
    let mut stmt = EventOptions::find();
    if let Some(region) = &query.region {
        stmt = stmt.filter(event_option::Column::LocationRegion.eq(region.as_str()));
    }
    let options = stmt.all(&state.db).await?;
    Ok(Json(options))
}
