//! Quiz endpoints

use axum::{extract::State, Json};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{ApiError, Result};
use crate::models::Question;
use crate::AppState;

/// GET /api/questions
/// Returns a random selection of questions for one quiz run
pub async fn questions(State(state): State<AppState>) -> Result<Json<Vec<Question>>> {
    let questions = state.db.all_questions().await?;
    if questions.is_empty() {
        return Err(ApiError::BadRequest(
            "No questions available. Please ask admin to upload questions.".to_string(),
        ));
    }

    let selected = pick_questions(questions, state.config.quiz_size, &mut rand::thread_rng());
    tracing::info!("Returning {} questions", selected.len());

    Ok(Json(selected))
}

/// Shuffle and keep at most `count` questions.
pub fn pick_questions<R: Rng + ?Sized>(
    mut questions: Vec<Question>,
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    questions.shuffle(rng);
    questions.truncate(count);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn bank(n: i64) -> Vec<Question> {
        (1..=n)
            .map(|id| Question {
                id,
                question: format!("Q{}", id),
                options: vec!["a".to_string(), "b".to_string()],
                correct: 0,
            })
            .collect()
    }

    #[test]
    fn test_pick_limits_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_questions(bank(25), 10, &mut rng);
        assert_eq!(picked.len(), 10);

        let ids: HashSet<i64> = picked.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_pick_returns_all_when_fewer() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_questions(bank(3), 10, &mut rng);

        let mut ids: Vec<i64> = picked.iter().map(|q| q.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
