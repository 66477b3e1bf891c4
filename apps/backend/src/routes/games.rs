//! Game endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/games
/// Builds the shuffled deck once and starts a session
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>)> {
    let entry = state.games.create(payload).await?;
    Ok((StatusCode::CREATED, Json(entry.to_response())))
}

/// GET /api/games/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResponse>> {
    let entry = state.games.get(id).await?;
    Ok(Json(entry.to_response()))
}

/// POST /api/games/:id/select
/// Flips a card; ignored selections are reported in the outcome
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<SelectResponse>> {
    let entry = state.games.get(id).await?;
    let outcome = entry.session.select(payload.position);

    if let SelectOutcome::Matched { pair_id, .. } = &outcome {
        tracing::debug!("Game {} matched pair {:?}", id, pair_id);
    }

    Ok(Json(SelectResponse {
        outcome,
        game: entry.session.snapshot(),
    }))
}

/// POST /api/games/:id/flip-back
/// Turns unresolved cards face-down without waiting for the timer
pub async fn flip_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResponse>> {
    let entry = state.games.get(id).await?;
    entry.session.flip_back_now();
    Ok(Json(entry.to_response()))
}

/// DELETE /api/games/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteGameResponse>> {
    let deleted = state.games.remove(id).await;
    Ok(Json(DeleteGameResponse { deleted }))
}
