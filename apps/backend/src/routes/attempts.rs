//! Quiz attempt and winner endpoints

use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/attempts
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Attempt>>> {
    Ok(Json(state.db.list_attempts().await?))
}

/// GET /api/winners
pub async fn winners(State(state): State<AppState>) -> Result<Json<Vec<Winner>>> {
    Ok(Json(state.db.list_winners().await?))
}

/// POST /api/attempts
/// Records a finished quiz run; winning runs also enter the winners list
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<AttemptRequest>,
) -> Result<Json<Attempt>> {
    if payload.total_questions == 0 {
        return Err(ApiError::BadRequest(
            "total_questions must be at least 1".to_string(),
        ));
    }
    if payload.score > payload.total_questions {
        return Err(ApiError::BadRequest(format!(
            "score {} exceeds total_questions {}",
            payload.score, payload.total_questions
        )));
    }

    let now = Utc::now();
    let attempt = Attempt {
        id: state.ids.next_id(),
        player_name: payload.player_name.clone(),
        score: payload.score,
        total_questions: payload.total_questions,
        percentage: Attempt::percentage(payload.score, payload.total_questions),
        answers: payload.answers,
        is_winner: payload.is_winner,
        timestamp: now,
    };

    let winner = payload.is_winner.then(|| Winner {
        id: state.ids.next_id(),
        player_name: payload.player_name,
        score: payload.score,
        total_questions: payload.total_questions,
        timestamp: now,
    });

    state.db.record_attempt(attempt.clone(), winner).await?;
    tracing::info!(
        "Recorded attempt {} for {} ({}%)",
        attempt.id,
        attempt.player_name,
        attempt.percentage
    );

    Ok(Json(attempt))
}
